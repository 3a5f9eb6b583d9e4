#![forbid(unsafe_code)]

//! Block variants and their capabilities.
//!
//! A document is an ordered sequence of blocks. The variant set is closed:
//! exhaustive matching over [`BlockBody`] is the dispatch mechanism, and
//! per-capability behavior lives in small traits ([`TextSelectable`],
//! [`TextEditable`]) implemented per variant.
//!
//! Only [`TextBlock`] and [`PromptBlock`] contribute characters to layout.
//! Activity, Image, and Scene3d blocks occupy exactly one placeholder row;
//! reconciling their real pixel height is the renderer's concern.
//!
//! All offsets and lengths are char indices. The host renderer draws a
//! monospaced glyph atlas, so one char is one cell by construction.

use std::borrow::Cow;

/// Stable identity of a block, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u64);

impl BlockId {
    /// Create a block id from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Identity of the job driving an owned prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JobId(u64);

impl JobId {
    /// Create a job id from a raw value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

/// Capability: the block's text can be selected and exported.
pub trait TextSelectable {
    /// Whether this block participates in selection at all.
    fn can_select(&self) -> bool;

    /// Display text length in chars.
    fn text_len(&self) -> usize;

    /// Export `len` chars of display text starting at char `start`.
    ///
    /// Out-of-range input is a caller contract violation; the
    /// implementation clamps saturating instead of panicking, so callers
    /// that clamp first always get exactly what they asked for.
    fn export_text(&self, start: usize, len: usize) -> String;
}

/// Capability: the block's text can be edited in place.
///
/// Applied by the host when executing [`crate::HostAction`]s; the layout
/// and interaction core never calls the mutating methods itself.
pub trait TextEditable {
    /// Insert text at the caret, advancing it past the insertion.
    fn insert_text(&mut self, text: &str);

    /// Remove the char before the caret, if any.
    fn backspace(&mut self);

    /// Move the caret by `delta` chars, clamped to the editable range.
    fn move_caret(&mut self, delta: i32);

    /// Place the caret at `index`, clamped to the editable range.
    fn set_caret(&mut self, index: usize);
}

/// Immutable transcript text, accumulated as streamed spans.
#[derive(Debug, Clone, Default)]
pub struct TextBlock {
    spans: Vec<String>,
}

impl TextBlock {
    /// Create a text block with one initial span.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            spans: vec![text.into()],
        }
    }

    /// Append a streamed span.
    pub fn push_span(&mut self, text: impl Into<String>) {
        self.spans.push(text.into());
    }

    /// The accumulated spans, in arrival order.
    #[must_use]
    pub fn spans(&self) -> &[String] {
        &self.spans
    }

    /// Concatenated display text.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self.spans.as_slice() {
            [] => Cow::Borrowed(""),
            [single] => Cow::Borrowed(single.as_str()),
            many => Cow::Owned(many.concat()),
        }
    }
}

impl TextSelectable for TextBlock {
    fn can_select(&self) -> bool {
        true
    }

    fn text_len(&self) -> usize {
        self.spans.iter().map(|s| s.chars().count()).sum()
    }

    fn export_text(&self, start: usize, len: usize) -> String {
        self.text().chars().skip(start).take(len).collect()
    }
}

/// The editable prompt: a fixed prefix glyph followed by user input.
#[derive(Debug, Clone)]
pub struct PromptBlock {
    /// Prompt glyph shown before the input (e.g. `"> "`).
    pub prefix: String,
    /// Current user input.
    pub input: String,
    /// Caret position as a char index into `input`.
    pub caret: usize,
    /// Job driving this prompt interactively, if any. Owned prompts do
    /// not participate in completion.
    pub owner: Option<JobId>,
}

impl PromptBlock {
    /// Create an empty prompt with the given prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            input: String::new(),
            caret: 0,
            owner: None,
        }
    }

    /// Hand the prompt to an interactive job.
    #[must_use]
    pub fn with_owner(mut self, owner: JobId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Prefix length in chars.
    #[must_use]
    pub fn prefix_len(&self) -> usize {
        self.prefix.chars().count()
    }

    /// Input length in chars.
    #[must_use]
    pub fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Full display text: prefix followed by input.
    #[must_use]
    pub fn display_text(&self) -> String {
        let mut text = String::with_capacity(self.prefix.len() + self.input.len());
        text.push_str(&self.prefix);
        text.push_str(&self.input);
        text
    }

    /// Byte offset of the char at `char_index` in `input`.
    fn byte_at(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map_or(self.input.len(), |(byte, _)| byte)
    }
}

impl TextSelectable for PromptBlock {
    fn can_select(&self) -> bool {
        true
    }

    fn text_len(&self) -> usize {
        self.prefix_len() + self.input_len()
    }

    fn export_text(&self, start: usize, len: usize) -> String {
        self.prefix
            .chars()
            .chain(self.input.chars())
            .skip(start)
            .take(len)
            .collect()
    }
}

impl TextEditable for PromptBlock {
    fn insert_text(&mut self, text: &str) {
        let byte = self.byte_at(self.caret);
        self.input.insert_str(byte, text);
        self.caret += text.chars().count();
    }

    fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        let start = self.byte_at(self.caret - 1);
        let end = self.byte_at(self.caret);
        self.input.replace_range(start..end, "");
        self.caret -= 1;
    }

    fn move_caret(&mut self, delta: i32) {
        let target = self.caret as i64 + i64::from(delta);
        self.caret = target.clamp(0, self.input_len() as i64) as usize;
    }

    fn set_caret(&mut self, index: usize) {
        self.caret = index.min(self.input_len());
    }
}

/// A running-activity indicator (spinner line).
#[derive(Debug, Clone)]
pub struct ActivityBlock {
    /// Label shown next to the indicator.
    pub label: String,
}

/// An inline image placeholder.
#[derive(Debug, Clone)]
pub struct ImageBlock {
    /// Host-resolved image source.
    pub source: String,
}

/// An embedded 3D viewport placeholder.
#[derive(Debug, Clone)]
pub struct SceneBlock {
    /// Host-resolved scene source.
    pub source: String,
}

/// The closed set of block variants.
#[derive(Debug, Clone)]
pub enum BlockBody {
    /// Transcript text.
    Text(TextBlock),
    /// The editable prompt.
    Prompt(PromptBlock),
    /// Activity indicator.
    Activity(ActivityBlock),
    /// Inline image.
    Image(ImageBlock),
    /// Embedded 3D viewport.
    Scene3d(SceneBlock),
}

/// One node of the document: a stable id plus its variant body.
#[derive(Debug, Clone)]
pub struct Block {
    /// Stable identity, assigned by the host.
    pub id: BlockId,
    /// Variant payload.
    pub body: BlockBody,
}

impl Block {
    /// Create a text block.
    #[must_use]
    pub fn text(id: BlockId, content: impl Into<String>) -> Self {
        Self {
            id,
            body: BlockBody::Text(TextBlock::new(content)),
        }
    }

    /// Create an empty prompt block.
    #[must_use]
    pub fn prompt(id: BlockId, prefix: impl Into<String>) -> Self {
        Self {
            id,
            body: BlockBody::Prompt(PromptBlock::new(prefix)),
        }
    }

    /// Create an activity block.
    #[must_use]
    pub fn activity(id: BlockId, label: impl Into<String>) -> Self {
        Self {
            id,
            body: BlockBody::Activity(ActivityBlock {
                label: label.into(),
            }),
        }
    }

    /// Create an image block.
    #[must_use]
    pub fn image(id: BlockId, source: impl Into<String>) -> Self {
        Self {
            id,
            body: BlockBody::Image(ImageBlock {
                source: source.into(),
            }),
        }
    }

    /// Create a 3D scene block.
    #[must_use]
    pub fn scene(id: BlockId, source: impl Into<String>) -> Self {
        Self {
            id,
            body: BlockBody::Scene3d(SceneBlock {
                source: source.into(),
            }),
        }
    }

    /// Whether this block is a prompt.
    #[must_use]
    pub fn is_prompt(&self) -> bool {
        matches!(self.body, BlockBody::Prompt(_))
    }

    /// Borrow the prompt payload, if this is a prompt.
    #[must_use]
    pub fn as_prompt(&self) -> Option<&PromptBlock> {
        match &self.body {
            BlockBody::Prompt(prompt) => Some(prompt),
            _ => None,
        }
    }

    /// Mutably borrow the prompt payload, if this is a prompt.
    #[must_use]
    pub fn as_prompt_mut(&mut self) -> Option<&mut PromptBlock> {
        match &mut self.body {
            BlockBody::Prompt(prompt) => Some(prompt),
            _ => None,
        }
    }

    /// Display text fed to the layout engine.
    ///
    /// Non-text variants lay out as a single zero-length placeholder row.
    #[must_use]
    pub fn display_text(&self) -> Cow<'_, str> {
        match &self.body {
            BlockBody::Text(text) => text.text(),
            BlockBody::Prompt(prompt) => Cow::Owned(prompt.display_text()),
            BlockBody::Activity(_) | BlockBody::Image(_) | BlockBody::Scene3d(_) => {
                Cow::Borrowed("")
            }
        }
    }
}

impl TextSelectable for Block {
    fn can_select(&self) -> bool {
        match &self.body {
            BlockBody::Text(text) => text.can_select(),
            BlockBody::Prompt(prompt) => prompt.can_select(),
            BlockBody::Activity(_) | BlockBody::Image(_) | BlockBody::Scene3d(_) => false,
        }
    }

    fn text_len(&self) -> usize {
        match &self.body {
            BlockBody::Text(text) => text.text_len(),
            BlockBody::Prompt(prompt) => prompt.text_len(),
            BlockBody::Activity(_) | BlockBody::Image(_) | BlockBody::Scene3d(_) => 0,
        }
    }

    fn export_text(&self, start: usize, len: usize) -> String {
        match &self.body {
            BlockBody::Text(text) => text.export_text(start, len),
            BlockBody::Prompt(prompt) => prompt.export_text(start, len),
            BlockBody::Activity(_) | BlockBody::Image(_) | BlockBody::Scene3d(_) => String::new(),
        }
    }
}
