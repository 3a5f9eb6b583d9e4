#![forbid(unsafe_code)]

//! The per-tick layout pass.
//!
//! Walks the document's blocks in transcript order, wraps each block's
//! display text at the grid's column count, and assigns global row
//! indices from a single monotone counter. The resulting [`LayoutFrame`]
//! is the single source of truth for the tick: the renderer draws from
//! it, the hit tester queries it, and scroll anchoring reconciles against
//! it. It carries no identity across ticks.

use gridshell_core::block::BlockId;
use gridshell_core::document::Document;
use gridshell_core::geometry::PxSize;
use gridshell_core::settings::Settings;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::grid::{FixedCellGrid, GridConfigError};
use crate::scrollbar::{self, ScrollbarLayout};
use crate::wrap;

/// One wrapped line, render-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutLine {
    /// Index of the owning block in document order.
    pub block_index: usize,
    /// Char offset of the line's first char in the block's display text.
    pub start: usize,
    /// Line length in chars.
    pub len: usize,
    /// Global row index.
    pub row: usize,
}

/// One wrapped line, hit-test-facing. Index-identical to [`LayoutLine`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTestLine {
    /// Id of the owning block.
    pub block: BlockId,
    /// Char offset of the line's first char in the block's display text.
    pub start: usize,
    /// Line length in chars.
    pub len: usize,
}

/// Pixel→row lookup table plus the geometry needed to use it.
///
/// The scroll row offset is captured at layout time so a query against a
/// stale frame stays consistent with the pixels that frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct HitTestMap {
    /// One entry per row, in row order.
    pub lines: Vec<HitTestLine>,
    /// Cell width in pixels.
    pub cell_width: f32,
    /// Cell height in pixels.
    pub cell_height: f32,
    /// Left padding in pixels.
    pub pad_left: f32,
    /// Top padding in pixels.
    pub pad_top: f32,
    /// Scroll offset the frame was laid out with.
    pub scroll_offset_rows: usize,
}

/// Immutable snapshot of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFrame {
    /// The grid geometry the pass ran against.
    pub grid: FixedCellGrid,
    /// All wrapped lines in row order.
    pub lines: Vec<LayoutLine>,
    /// Index-identical hit-test table.
    pub hits: HitTestMap,
    /// Total row count across all blocks.
    pub total_rows: usize,
    /// Scrollbar geometry for this frame.
    pub scrollbar: ScrollbarLayout,
    /// First row occupied by each block index.
    first_rows: FxHashMap<usize, usize>,
}

impl LayoutFrame {
    /// First row occupied by the block at `block_index`, if it produced
    /// any rows this pass.
    #[must_use]
    pub fn first_row_of_block(&self, block_index: usize) -> Option<usize> {
        self.first_rows.get(&block_index).copied()
    }
}

/// Lay out the document for one tick.
///
/// # Errors
///
/// Returns [`GridConfigError`] when the settings carry non-positive cell
/// metrics.
pub fn layout(
    document: &Document,
    settings: &Settings,
    viewport: PxSize,
) -> Result<LayoutFrame, GridConfigError> {
    let grid = FixedCellGrid::from_viewport(viewport, settings)?;

    let mut lines = Vec::new();
    let mut hit_lines = Vec::new();
    let mut first_rows = FxHashMap::default();
    let mut row = 0usize;

    for (block_index, block) in document.blocks.iter().enumerate() {
        let text = block.display_text();
        for span in wrap::wrap(&text, grid.cols) {
            first_rows.entry(block_index).or_insert(row);
            lines.push(LayoutLine {
                block_index,
                start: span.start,
                len: span.len,
                row,
            });
            hit_lines.push(HitTestLine {
                block: block.id,
                start: span.start,
                len: span.len,
            });
            row += 1;
        }
    }

    let total_rows = lines.len();
    let scrollbar = scrollbar::layout(&grid, total_rows, document.scroll.offset_rows, settings);

    trace!(
        blocks = document.blocks.len(),
        total_rows,
        cols = grid.cols,
        viewport_rows = grid.rows,
        "layout pass"
    );

    Ok(LayoutFrame {
        hits: HitTestMap {
            lines: hit_lines,
            cell_width: grid.cell_width,
            cell_height: grid.cell_height,
            pad_left: grid.pad_left,
            pad_top: grid.pad_top,
            scroll_offset_rows: document.scroll.offset_rows,
        },
        grid,
        lines,
        total_rows,
        scrollbar,
        first_rows,
    })
}
