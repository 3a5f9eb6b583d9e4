#![forbid(unsafe_code)]

//! Layout: viewport→grid geometry, line wrapping, the per-tick layout
//! pass, hit-testing, scroll anchoring, and scrollbar geometry.

pub mod anchor;
pub mod engine;
pub mod grid;
pub mod hit;
pub mod scrollbar;
pub mod wrap;

pub use anchor::{capture_anchor, restore_from_anchor};
pub use engine::{HitTestLine, HitTestMap, LayoutFrame, LayoutLine, layout};
pub use grid::{FixedCellGrid, GridConfigError};
pub use hit::hit_test;
pub use scrollbar::{ScrollbarLayout, offset_rows_for_thumb_top};
pub use wrap::{LineSpan, wrap};
