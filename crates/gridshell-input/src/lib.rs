#![forbid(unsafe_code)]

//! Input: the interaction reducer and selection export.

pub mod reducer;
pub mod selection;

pub use reducer::{Capture, CaptureKind, InteractionReducer, InteractionState};
pub use selection::try_get_selected_text;
