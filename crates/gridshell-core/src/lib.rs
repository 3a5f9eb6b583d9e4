#![forbid(unsafe_code)]

//! Core: document model, pixel geometry, canonical input events, and settings.

pub mod action;
pub mod block;
pub mod document;
pub mod event;
pub mod geometry;
pub mod settings;

pub use action::HostAction;
pub use block::{Block, BlockBody, BlockId, JobId, TextEditable, TextSelectable};
pub use document::{Document, DocumentPosition, ScrollAnchor, ScrollState, SelectionRange};
pub use event::{InputEvent, KeyCode, KeyEvent, Modifiers, MouseButton, MouseEvent, WheelEvent};
pub use geometry::{PxRect, PxSize};
pub use settings::{PaddingPolicy, Settings};
