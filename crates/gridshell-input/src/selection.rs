#![forbid(unsafe_code)]

//! Selection normalization and text export.

use gridshell_core::block::{PromptBlock, TextSelectable};
use gridshell_core::document::{Document, SelectionRange};

/// Export the selected text in document order.
///
/// Anchor and caret are normalized by (block index, char index). The
/// first spanned block contributes from the start position to its end
/// (or to the end position when the selection is single-block), interior
/// blocks contribute in full, and the last block contributes from 0 to
/// the end position. Prompt blocks clamp the effective start to the
/// prompt's prefix length so the prompt glyph is never exported.
///
/// Returns `None` when either endpoint's block no longer exists.
#[must_use]
pub fn try_get_selected_text(document: &Document, selection: &SelectionRange) -> Option<String> {
    let anchor_index = document.block_index(selection.anchor.block)?;
    let caret_index = document.block_index(selection.caret.block)?;

    let anchor_key = (anchor_index, selection.anchor.char_index);
    let caret_key = (caret_index, selection.caret.char_index);
    let ((start_index, start_char), (end_index, end_char)) = if anchor_key <= caret_key {
        (anchor_key, caret_key)
    } else {
        (caret_key, anchor_key)
    };

    let mut out = String::new();
    for index in start_index..=end_index {
        let block = &document.blocks[index];
        let prefix_clamp = block.as_prompt().map_or(0, PromptBlock::prefix_len);
        let from = if index == start_index { start_char } else { 0 }.max(prefix_clamp);
        let to = if index == end_index {
            end_char
        } else {
            block.text_len()
        };
        if to > from {
            out.push_str(&block.export_text(from, to - from));
        }
    }
    Some(out)
}
