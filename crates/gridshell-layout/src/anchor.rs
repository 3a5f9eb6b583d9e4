#![forbid(unsafe_code)]

//! Content-relative scroll anchoring.
//!
//! A raw row offset goes stale the moment content above it grows or
//! rewraps. Before mutating the document the host captures an anchor —
//! the (block, char-offset) identity of the line at the top of the
//! viewport — and after the next layout pass restores the offset by
//! finding where that content landed. Tail-follow always wins over the
//! anchor.

use gridshell_core::document::{ScrollAnchor, ScrollState};
use tracing::debug;

use crate::engine::LayoutFrame;

/// Record the current top visible line as a content-relative anchor.
///
/// Also clamps `offset_rows` into the frame's valid range and recomputes
/// `rows_from_bottom`.
pub fn capture_anchor(scroll: &mut ScrollState, frame: &LayoutFrame) {
    if frame.lines.is_empty() {
        scroll.anchor = None;
        scroll.offset_rows = 0;
        scroll.rows_from_bottom = 0;
        return;
    }

    let max = ScrollState::max_offset(frame.total_rows, frame.grid.rows);
    scroll.offset_rows = scroll.offset_rows.min(max);
    scroll.rows_from_bottom = max - scroll.offset_rows;

    let top = &frame.lines[scroll.offset_rows.min(frame.lines.len() - 1)];
    scroll.anchor = Some(ScrollAnchor {
        block_index: top.block_index,
        char_index: top.start,
    });
}

/// Restore the scroll offset against a freshly laid-out frame.
///
/// When `follow_tail` is set the offset snaps to the bottom and the
/// anchor is ignored. Otherwise the anchored content is located by a
/// greedy match: exact containment of the anchored char wins immediately;
/// failing that, the line with the greatest `start` not past the anchor;
/// failing that, the first row the anchored block index produced; failing
/// everything, row 0.
pub fn restore_from_anchor(scroll: &mut ScrollState, frame: &LayoutFrame) {
    let max = ScrollState::max_offset(frame.total_rows, frame.grid.rows);

    if scroll.follow_tail {
        scroll.offset_rows = max;
        scroll.rows_from_bottom = 0;
        return;
    }

    let Some(anchor) = scroll.anchor else {
        scroll.offset_rows = scroll.offset_rows.min(max);
        scroll.rows_from_bottom = max - scroll.offset_rows;
        return;
    };

    let mut candidate: Option<usize> = None;
    let mut exact = false;
    for line in &frame.lines {
        if line.block_index != anchor.block_index {
            continue;
        }
        if line.start <= anchor.char_index {
            candidate = Some(line.row);
            if anchor.char_index < line.start + line.len {
                exact = true;
                break;
            }
        }
    }

    let row = candidate
        .or_else(|| frame.first_row_of_block(anchor.block_index))
        .unwrap_or(0);
    debug!(
        block_index = anchor.block_index,
        char_index = anchor.char_index,
        row,
        exact,
        "anchor restore"
    );

    scroll.offset_rows = row.min(max);
    scroll.rows_from_bottom = max - scroll.offset_rows;
}
