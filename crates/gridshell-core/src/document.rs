#![forbid(unsafe_code)]

//! The document aggregate and scroll/selection state.
//!
//! The document is owned exclusively by the host. The layout engine and
//! interaction reducer borrow it read-only; every intended mutation is
//! expressed as a [`crate::HostAction`] and applied by the host.

use crate::block::{Block, BlockId};
use crate::settings::Settings;

/// A position inside the document: a block plus a char offset into its
/// display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentPosition {
    /// The block containing the position.
    pub block: BlockId,
    /// Char offset into the block's display text.
    pub char_index: usize,
}

impl DocumentPosition {
    /// Create a new position.
    #[must_use]
    pub const fn new(block: BlockId, char_index: usize) -> Self {
        Self { block, char_index }
    }
}

/// A selection span between two document positions.
///
/// Anchor and caret are order-independent; normalization into document
/// order happens only when the selection is exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    /// The fixed end, set where the drag began.
    pub anchor: DocumentPosition,
    /// The moving end, following the pointer.
    pub caret: DocumentPosition,
}

impl SelectionRange {
    /// Create a collapsed selection at a single position.
    #[must_use]
    pub const fn collapsed(at: DocumentPosition) -> Self {
        Self {
            anchor: at,
            caret: at,
        }
    }

    /// Whether anchor and caret coincide.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.caret
    }
}

/// Content-relative scroll anchor: the line at the top of the viewport,
/// identified by block index and the char offset where that line starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollAnchor {
    /// Index of the anchored block in document order.
    pub block_index: usize,
    /// Char offset of the anchored line's first char.
    pub char_index: usize,
}

/// Scroll position in layout rows, plus the tail-follow policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    /// First visible row.
    pub offset_rows: usize,
    /// Tail mode: stick to the bottom and follow new output.
    pub follow_tail: bool,
    /// Distance from the bottom in rows, recomputed at anchor capture.
    pub rows_from_bottom: usize,
    /// Content-relative anchor for the top visible line.
    pub anchor: Option<ScrollAnchor>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollState {
    /// Create a tail-following scroll state at the top.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset_rows: 0,
            follow_tail: true,
            rows_from_bottom: 0,
            anchor: None,
        }
    }

    /// Largest valid `offset_rows` for the given content/viewport sizes.
    #[inline]
    #[must_use]
    pub fn max_offset(total_rows: usize, viewport_rows: usize) -> usize {
        total_rows.saturating_sub(viewport_rows)
    }
}

/// The mutable, block-structured document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Blocks in transcript order.
    pub blocks: Vec<Block>,
    /// Scroll position and tail-follow policy.
    pub scroll: ScrollState,
    /// Layout/interaction configuration.
    pub settings: Settings,
}

impl Document {
    /// Create an empty document with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a block at the end of the transcript.
    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Insert a block before `index`, clamped to the transcript length.
    pub fn insert_block(&mut self, index: usize, block: Block) {
        let index = index.min(self.blocks.len());
        self.blocks.insert(index, block);
    }

    /// Index of the block with the given id, in document order.
    #[must_use]
    pub fn block_index(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    /// Borrow the block with the given id.
    #[must_use]
    pub fn block_by_id(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Mutably borrow the block with the given id.
    #[must_use]
    pub fn block_by_id_mut(&mut self, id: BlockId) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    /// Id of the newest prompt in the transcript, if any.
    #[must_use]
    pub fn last_prompt_id(&self) -> Option<BlockId> {
        self.blocks.iter().rev().find(|b| b.is_prompt()).map(|b| b.id)
    }
}
