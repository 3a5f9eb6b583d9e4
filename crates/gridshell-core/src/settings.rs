#![forbid(unsafe_code)]

//! Layout and interaction configuration, supplied explicitly by the host.

/// Where leftover viewport pixels go after the grid is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingPolicy {
    /// All leftover pixels become right/bottom padding.
    #[default]
    None,
    /// Declared centering policy. Viewport→grid conversion currently
    /// behaves identically to `None`; see the grid module.
    Center,
}

/// Host-supplied configuration for layout and interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Cell width in pixels. Must be positive.
    pub cell_width: f32,
    /// Cell height in pixels. Must be positive.
    pub cell_height: f32,
    /// Leftover-pixel policy.
    pub padding: PaddingPolicy,
    /// Scrollbar track thickness in pixels; zero or negative disables the
    /// scrollbar entirely.
    pub scrollbar_thickness: f32,
    /// Minimum thumb height in pixels.
    pub scrollbar_min_thumb: f32,
    /// Extra pixels around scrollbar hit rectangles.
    pub scrollbar_hit_slop: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_width: 9.0,
            cell_height: 18.0,
            padding: PaddingPolicy::None,
            scrollbar_thickness: 10.0,
            scrollbar_min_thumb: 24.0,
            scrollbar_hit_slop: 6.0,
        }
    }
}

impl Settings {
    /// Set the cell metrics (builder).
    #[must_use]
    pub fn with_cell_metrics(mut self, width: f32, height: f32) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    /// Set the padding policy (builder).
    #[must_use]
    pub fn with_padding(mut self, padding: PaddingPolicy) -> Self {
        self.padding = padding;
        self
    }

    /// Set the scrollbar thickness (builder).
    #[must_use]
    pub fn with_scrollbar_thickness(mut self, thickness: f32) -> Self {
        self.scrollbar_thickness = thickness;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert!(settings.cell_width > 0.0);
        assert!(settings.cell_height > 0.0);
        assert_eq!(settings.padding, PaddingPolicy::None);
        assert_eq!(settings.scrollbar_hit_slop, 6.0);
    }

    #[test]
    fn builders_chain() {
        let settings = Settings::default()
            .with_cell_metrics(8.0, 16.0)
            .with_padding(PaddingPolicy::Center)
            .with_scrollbar_thickness(0.0);
        assert_eq!(settings.cell_width, 8.0);
        assert_eq!(settings.padding, PaddingPolicy::Center);
        assert_eq!(settings.scrollbar_thickness, 0.0);
    }
}
