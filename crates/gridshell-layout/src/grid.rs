#![forbid(unsafe_code)]

//! Viewport→grid conversion.
//!
//! A fixed-cell grid divides the framebuffer into identical cells. Column
//! and row counts are the floor of the viewport over the cell metrics;
//! leftover pixels become right/bottom padding.

use gridshell_core::geometry::PxSize;
use gridshell_core::settings::{PaddingPolicy, Settings};

/// Errors from grid construction.
///
/// These are caller contract violations (bad cell metrics), not
/// recoverable runtime conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridConfigError {
    /// Cell width was zero or negative.
    InvalidCellWidth {
        /// The offending value.
        value: f32,
    },
    /// Cell height was zero or negative.
    InvalidCellHeight {
        /// The offending value.
        value: f32,
    },
}

impl std::fmt::Display for GridConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCellWidth { value } => {
                write!(f, "cell width must be positive, got {value}")
            }
            Self::InvalidCellHeight { value } => {
                write!(f, "cell height must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for GridConfigError {}

/// Fixed-cell grid geometry for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCellGrid {
    /// Column count.
    pub cols: usize,
    /// Row count visible in the viewport.
    pub rows: usize,
    /// Cell width in pixels.
    pub cell_width: f32,
    /// Cell height in pixels.
    pub cell_height: f32,
    /// Framebuffer size the grid was computed for.
    pub viewport: PxSize,
    /// Left padding in pixels.
    pub pad_left: f32,
    /// Top padding in pixels.
    pub pad_top: f32,
}

impl FixedCellGrid {
    /// Compute the grid for a viewport.
    ///
    /// # Errors
    ///
    /// Returns [`GridConfigError`] when either cell metric is not
    /// positive.
    pub fn from_viewport(viewport: PxSize, settings: &Settings) -> Result<Self, GridConfigError> {
        if settings.cell_width <= 0.0 {
            return Err(GridConfigError::InvalidCellWidth {
                value: settings.cell_width,
            });
        }
        if settings.cell_height <= 0.0 {
            return Err(GridConfigError::InvalidCellHeight {
                value: settings.cell_height,
            });
        }

        let cols = (viewport.width / settings.cell_width).floor().max(0.0) as usize;
        let rows = (viewport.height / settings.cell_height).floor().max(0.0) as usize;

        // Center is declared but leftover pixels always go right/bottom.
        let (pad_left, pad_top) = match settings.padding {
            PaddingPolicy::None | PaddingPolicy::Center => (0.0, 0.0),
        };

        Ok(Self {
            cols,
            rows,
            cell_width: settings.cell_width,
            cell_height: settings.cell_height,
            viewport,
            pad_left,
            pad_top,
        })
    }

    /// Width of the populated cell area in pixels.
    #[inline]
    #[must_use]
    pub fn content_width_px(&self) -> f32 {
        self.cols as f32 * self.cell_width
    }

    /// Height of the populated cell area in pixels.
    #[inline]
    #[must_use]
    pub fn content_height_px(&self) -> f32 {
        self.rows as f32 * self.cell_height
    }
}
