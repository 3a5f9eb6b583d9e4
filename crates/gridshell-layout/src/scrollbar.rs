#![forbid(unsafe_code)]

//! Scrollbar track/thumb geometry.
//!
//! The scrollbar is an overlay: the track is always flush to the
//! framebuffer's right edge, independent of any reserved text-grid
//! width. Hit rectangles are the visual rectangles grown by a slop so
//! the thin bar is easier to grab than it looks.

use gridshell_core::geometry::PxRect;
use gridshell_core::settings::Settings;
use tracing::trace;

use crate::grid::FixedCellGrid;

/// Scrollbar geometry for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollbarLayout {
    /// Whether the content overflows the viewport at all. When false,
    /// every rectangle is the default (empty) rect.
    pub is_scrollable: bool,
    /// Visual track rectangle.
    pub track: PxRect,
    /// Visual thumb rectangle.
    pub thumb: PxRect,
    /// Slop-expanded track rectangle for hit-testing.
    pub hit_track: PxRect,
    /// Slop-expanded thumb rectangle for hit-testing.
    pub hit_thumb: PxRect,
}

/// Compute scrollbar geometry from row counts.
#[must_use]
pub fn layout(
    grid: &FixedCellGrid,
    total_rows: usize,
    offset_rows: usize,
    settings: &Settings,
) -> ScrollbarLayout {
    let thickness = settings.scrollbar_thickness;
    if thickness <= 0.0 || total_rows == 0 || grid.rows == 0 || total_rows <= grid.rows {
        trace!(total_rows, viewport_rows = grid.rows, "scrollbar disabled");
        return ScrollbarLayout::default();
    }

    let framebuffer = PxRect::new(0.0, 0.0, grid.viewport.width, grid.viewport.height);
    let track = PxRect::new(
        grid.viewport.width - thickness,
        0.0,
        thickness,
        grid.viewport.height,
    );

    let content_px = total_rows as f32 * grid.cell_height;
    let thumb_height = (track.height * grid.viewport.height / content_px)
        .max(settings.scrollbar_min_thumb)
        .min(track.height);

    let max_offset = total_rows - grid.rows;
    let progress = offset_rows.min(max_offset) as f32 / max_offset as f32;
    let travel = track.height - thumb_height;
    let thumb = PxRect::new(track.x, progress * travel, thickness, thumb_height);

    let slop = settings.scrollbar_hit_slop;
    ScrollbarLayout {
        is_scrollable: true,
        track,
        thumb,
        hit_track: track.expand(slop).clamp_to(&framebuffer),
        hit_thumb: thumb.expand(slop).clamp_to(&framebuffer),
    }
}

/// Invert the thumb-position mapping: which row offset puts the thumb's
/// top edge at `thumb_top`?
///
/// Used for thumb dragging; the result is clamped into the valid offset
/// range.
#[must_use]
pub fn offset_rows_for_thumb_top(
    layout: &ScrollbarLayout,
    total_rows: usize,
    viewport_rows: usize,
    thumb_top: f32,
) -> usize {
    let travel = layout.track.height - layout.thumb.height;
    if !layout.is_scrollable || travel <= 0.0 {
        return 0;
    }
    let max_offset = total_rows.saturating_sub(viewport_rows);
    let progress = ((thumb_top - layout.track.y) / travel).clamp(0.0, 1.0);
    (progress * max_offset as f32).round() as usize
}
