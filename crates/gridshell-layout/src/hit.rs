#![forbid(unsafe_code)]

//! Pixel → document position mapping.

use gridshell_core::document::DocumentPosition;

use crate::engine::HitTestMap;

/// Map a framebuffer pixel to a document position.
///
/// Pixels above or left of the grid, or below the last content row, yield
/// no hit. Pixels right of a line's last char clamp to its end-of-line
/// position.
#[must_use]
pub fn hit_test(map: &HitTestMap, x: f32, y: f32) -> Option<DocumentPosition> {
    let local_x = x - map.pad_left;
    let local_y = y - map.pad_top;
    if local_x < 0.0 || local_y < 0.0 {
        return None;
    }

    let col = (local_x / map.cell_width) as usize;
    let row = (local_y / map.cell_height) as usize + map.scroll_offset_rows;

    let line = map.lines.get(row)?;
    let col = col.min(line.len);
    Some(DocumentPosition::new(line.block, line.start + col))
}
