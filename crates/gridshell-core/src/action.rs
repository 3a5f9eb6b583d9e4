#![forbid(unsafe_code)]

//! Host actions: data-only descriptions of intended document mutations.
//!
//! The interaction reducer emits these; it never applies them. The host
//! executes them against the live document (and clipboard, and command
//! dispatch) within the same tick, then the next layout pass observes the
//! result.

use crate::block::BlockId;

/// An intended mutation, deferred to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    /// Insert text at the caret of the target prompt.
    InsertText(BlockId, String),

    /// Remove the char before the caret of the target prompt.
    Backspace(BlockId),

    /// Move the target prompt's caret by a signed delta.
    MoveCaret(BlockId, i32),

    /// Place the target prompt's caret at an absolute index.
    SetCaret(BlockId, usize),

    /// Submit the target prompt's input to command dispatch.
    SubmitPrompt(BlockId),

    /// Copy the current selection to the OS clipboard.
    CopySelectionToClipboard,

    /// Paste clipboard text into the newest prompt. The clipboard text is
    /// supplied by the host at apply time.
    PasteFromClipboardIntoLastPrompt,

    /// Request completion for the focused prompt.
    Autocomplete,

    /// Scroll by a relative number of rows; negative scrolls up.
    ScrollBy(i32),

    /// Scroll to an absolute row offset.
    ScrollTo(usize),
}
