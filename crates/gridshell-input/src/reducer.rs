#![forbid(unsafe_code)]

//! The interaction state machine.
//!
//! [`InteractionReducer::handle`] turns one raw input event, interpreted
//! against the current layout frame and document, into an ordered list of
//! [`HostAction`]s. The reducer owns its state exclusively and mutates it
//! in place; the document is only ever read. Every call is total:
//! out-of-range pointer coordinates fail hit-testing and degrade to a
//! no-op, never an error.
//!
//! # Pointer capture
//!
//! A mouse-down that lands on a selectable block or the scrollbar thumb
//! captures the pointer: subsequent move/up events route to the captor
//! regardless of where the pointer is, and further mouse-downs are
//! ignored until the capturing button is released. Escape discards any
//! in-flight capture.

use gridshell_core::action::HostAction;
use gridshell_core::block::{Block, BlockId, TextSelectable};
use gridshell_core::document::{Document, SelectionRange};
use gridshell_core::event::{InputEvent, KeyCode, KeyEvent, MouseButton, MouseEvent, WheelEvent};
use gridshell_layout::{LayoutFrame, hit_test, offset_rows_for_thumb_top};
use tracing::debug;

/// What an active pointer capture is doing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureKind {
    /// Drag-selecting text.
    Selection,
    /// Dragging the scrollbar thumb. `grab_dy` is the pixel offset from
    /// the thumb's top edge where it was grabbed, so the thumb doesn't
    /// jump under the pointer.
    ScrollThumb {
        /// Grab offset from the thumb top, in pixels.
        grab_dy: f32,
    },
}

/// Pointer-capture token held while a button-driven drag is in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capture {
    /// The button that initiated the capture; only its release ends it.
    pub button: MouseButton,
    /// What the capture is doing.
    pub kind: CaptureKind,
}

/// Reducer-internal state. Mutated only through
/// [`InteractionReducer::handle`] and [`InteractionReducer::initialize`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    /// A selection drag is in progress.
    pub is_selecting: bool,
    /// Active pointer capture, if any.
    pub capture: Option<Capture>,
    /// Current selection; survives the drag that created it until
    /// cleared by a keystroke, paste, or Escape.
    pub selection: Option<SelectionRange>,
    /// Block receiving keyboard input, normally the newest prompt.
    pub focused: Option<BlockId>,
    /// Newest prompt seen, the target for Escape refocus and paste.
    pub last_prompt: Option<BlockId>,
}

/// The interaction reducer.
#[derive(Debug, Clone, Default)]
pub struct InteractionReducer {
    state: InteractionState,
}

impl InteractionReducer {
    /// Create a reducer with empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a fresh reducer to a document: focus the newest prompt.
    ///
    /// Hosts also call this after structural mutations that replace the
    /// prompt, so keyboard focus lands on the replacement.
    pub fn initialize(&mut self, document: &Document) {
        let last = document.last_prompt_id();
        self.state.focused = last;
        self.state.last_prompt = last;
    }

    /// The reducer's current state, read-only.
    #[must_use]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// The current selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&SelectionRange> {
        self.state.selection.as_ref()
    }

    /// Reduce one input event into host actions.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        frame: &LayoutFrame,
        document: &Document,
    ) -> Vec<HostAction> {
        // Track the newest prompt so Escape/paste route correctly even if
        // the host never re-initializes.
        if let Some(last) = document.last_prompt_id() {
            self.state.last_prompt = Some(last);
            if self.state.focused.is_none() {
                self.state.focused = Some(last);
            }
        }

        match event {
            InputEvent::Text(c) => self.on_text(*c, document),
            InputEvent::KeyDown(key) => self.on_key(key, document),
            InputEvent::MouseDown(ev) => self.on_mouse_down(ev, frame, document),
            InputEvent::MouseMove(ev) => self.on_mouse_move(ev, frame),
            InputEvent::MouseUp(ev) => self.on_mouse_up(ev),
            InputEvent::Wheel(ev) => Self::on_wheel(ev),
        }
    }

    /// The focused block's id, when it is an editable prompt.
    fn editable_focus(&self, document: &Document) -> Option<BlockId> {
        let id = self.state.focused?;
        document.block_by_id(id)?.is_prompt().then_some(id)
    }

    fn on_text(&mut self, c: char, document: &Document) -> Vec<HostAction> {
        let Some(target) = self.editable_focus(document) else {
            return Vec::new();
        };
        self.state.selection = None;
        vec![HostAction::InsertText(target, c.to_string())]
    }

    fn on_key(&mut self, key: &KeyEvent, document: &Document) -> Vec<HostAction> {
        match key.code {
            KeyCode::Escape => {
                self.state.is_selecting = false;
                self.state.capture = None;
                self.state.selection = None;
                self.state.focused = self.state.last_prompt;
                debug!("escape: capture and selection discarded");
                Vec::new()
            }
            KeyCode::Char(c) if key.ctrl() && c.eq_ignore_ascii_case(&'c') => {
                if self.state.selection.is_some() {
                    vec![HostAction::CopySelectionToClipboard]
                } else {
                    Vec::new()
                }
            }
            KeyCode::Char(c) if key.ctrl() && c.eq_ignore_ascii_case(&'v') => {
                self.state.selection = None;
                vec![HostAction::PasteFromClipboardIntoLastPrompt]
            }
            KeyCode::Enter => match self.state.focused {
                Some(id) if document.block_by_id(id).is_some_and(Block::is_prompt) => {
                    vec![HostAction::SubmitPrompt(id)]
                }
                _ => Vec::new(),
            },
            KeyCode::Tab => {
                let Some(id) = self.editable_focus(document) else {
                    return Vec::new();
                };
                let owned = document
                    .block_by_id(id)
                    .and_then(Block::as_prompt)
                    .is_some_and(|p| p.owner.is_some());
                if owned {
                    // Interactive jobs own their prompt; completion never
                    // fires into them.
                    Vec::new()
                } else {
                    vec![HostAction::Autocomplete]
                }
            }
            KeyCode::Backspace => self.edit_key(document, HostAction::Backspace),
            KeyCode::Left => self.edit_key(document, |id| HostAction::MoveCaret(id, -1)),
            KeyCode::Right => self.edit_key(document, |id| HostAction::MoveCaret(id, 1)),
            KeyCode::Home => self.edit_key(document, |id| HostAction::SetCaret(id, 0)),
            KeyCode::End => {
                let Some(id) = self.editable_focus(document) else {
                    return Vec::new();
                };
                let len = document
                    .block_by_id(id)
                    .and_then(Block::as_prompt)
                    .map_or(0, |p| p.input_len());
                self.state.selection = None;
                vec![HostAction::SetCaret(id, len)]
            }
            KeyCode::Char(_) => Vec::new(),
        }
    }

    /// Shared path for editing keys: requires an editable focus, clears
    /// any selection, then emits the action for the focused prompt.
    fn edit_key(
        &mut self,
        document: &Document,
        action: impl FnOnce(BlockId) -> HostAction,
    ) -> Vec<HostAction> {
        let Some(target) = self.editable_focus(document) else {
            return Vec::new();
        };
        self.state.selection = None;
        vec![action(target)]
    }

    fn on_mouse_down(
        &mut self,
        ev: &MouseEvent,
        frame: &LayoutFrame,
        document: &Document,
    ) -> Vec<HostAction> {
        if self.state.capture.is_some() {
            // Spurious second press while a drag is in flight.
            return Vec::new();
        }

        let sb = &frame.scrollbar;
        if sb.is_scrollable {
            if sb.hit_thumb.contains(ev.x, ev.y) {
                self.state.capture = Some(Capture {
                    button: ev.button,
                    kind: CaptureKind::ScrollThumb {
                        grab_dy: ev.y - sb.thumb.y,
                    },
                });
                debug!(y = ev.y, "scrollbar thumb captured");
                return Vec::new();
            }
            if sb.hit_track.contains(ev.x, ev.y) {
                // Track click pages toward the pointer.
                let page = frame.grid.rows as i32;
                let delta = if ev.y < sb.thumb.y { -page } else { page };
                return vec![HostAction::ScrollBy(delta)];
            }
        }

        let Some(pos) = hit_test(&frame.hits, ev.x, ev.y) else {
            return Vec::new();
        };
        let selectable = document
            .block_by_id(pos.block)
            .is_some_and(TextSelectable::can_select);
        if !selectable {
            return Vec::new();
        }

        self.state.capture = Some(Capture {
            button: ev.button,
            kind: CaptureKind::Selection,
        });
        self.state.is_selecting = true;
        self.state.selection = Some(SelectionRange {
            anchor: pos,
            caret: pos,
        });
        debug!(
            block = pos.block.get(),
            char_index = pos.char_index,
            "selection capture"
        );
        Vec::new()
    }

    fn on_mouse_move(&mut self, ev: &MouseEvent, frame: &LayoutFrame) -> Vec<HostAction> {
        match self.state.capture {
            Some(Capture {
                kind: CaptureKind::Selection,
                ..
            }) => {
                if let Some(pos) = hit_test(&frame.hits, ev.x, ev.y)
                    && let Some(selection) = self.state.selection.as_mut()
                {
                    selection.caret = pos;
                }
                Vec::new()
            }
            Some(Capture {
                kind: CaptureKind::ScrollThumb { grab_dy },
                ..
            }) => {
                let rows = offset_rows_for_thumb_top(
                    &frame.scrollbar,
                    frame.total_rows,
                    frame.grid.rows,
                    ev.y - grab_dy,
                );
                vec![HostAction::ScrollTo(rows)]
            }
            None => Vec::new(),
        }
    }

    fn on_mouse_up(&mut self, ev: &MouseEvent) -> Vec<HostAction> {
        match self.state.capture {
            Some(capture) if capture.button == ev.button => {
                self.state.capture = None;
                self.state.is_selecting = false;
                // The selection survives as the frozen drag result.
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn on_wheel(ev: &WheelEvent) -> Vec<HostAction> {
        vec![HostAction::ScrollBy(ev.delta_rows)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridshell_core::event::Modifiers;
    use gridshell_core::geometry::PxSize;
    use gridshell_core::settings::Settings;
    use gridshell_layout::layout;

    fn settings() -> Settings {
        Settings::default().with_cell_metrics(10.0, 20.0)
    }

    // 40 cols x 10 rows.
    fn viewport() -> PxSize {
        PxSize::new(400.0, 200.0)
    }

    fn test_doc() -> Document {
        let mut doc = Document::new();
        doc.push_block(Block::text(BlockId::new(1), "HELLO"));
        doc.push_block(Block::prompt(BlockId::new(2), "> "));
        doc
    }

    fn frame_for(doc: &Document) -> LayoutFrame {
        layout(doc, &settings(), viewport()).unwrap()
    }

    fn down(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseDown(MouseEvent::new(x, y, MouseButton::Left))
    }

    fn mv(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseMove(MouseEvent::new(x, y, MouseButton::Left))
    }

    fn up(x: f32, y: f32) -> InputEvent {
        InputEvent::MouseUp(MouseEvent::new(x, y, MouseButton::Left))
    }

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::KeyDown(KeyEvent::new(code))
    }

    fn ctrl(c: char) -> InputEvent {
        InputEvent::KeyDown(KeyEvent::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL))
    }

    #[test]
    fn initialize_focuses_newest_prompt() {
        let doc = test_doc();
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);
        assert_eq!(reducer.state().focused, Some(BlockId::new(2)));
        assert_eq!(reducer.state().last_prompt, Some(BlockId::new(2)));
    }

    #[test]
    fn mouse_down_on_text_begins_capture() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        let actions = reducer.handle(&down(5.0, 10.0), &frame, &doc);
        assert!(actions.is_empty());
        assert!(reducer.state().is_selecting);
        assert!(reducer.state().capture.is_some());
        let sel = reducer.selection().unwrap();
        assert_eq!(sel.anchor, sel.caret);
        assert_eq!(sel.anchor.block, BlockId::new(1));
        assert_eq!(sel.anchor.char_index, 0);
    }

    #[test]
    fn second_mouse_down_while_captured_is_ignored() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        reducer.handle(&down(5.0, 10.0), &frame, &doc);
        let before = reducer.state().clone();
        let actions = reducer.handle(&down(25.0, 10.0), &frame, &doc);
        assert!(actions.is_empty());
        assert_eq!(reducer.state(), &before);
    }

    #[test]
    fn move_while_capturing_extends_caret_only() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        reducer.handle(&down(5.0, 10.0), &frame, &doc);
        reducer.handle(&mv(55.0, 10.0), &frame, &doc);
        let sel = reducer.selection().unwrap();
        assert_eq!(sel.anchor.char_index, 0);
        assert_eq!(sel.caret.char_index, 5);
    }

    #[test]
    fn move_without_capture_is_noop() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        let actions = reducer.handle(&mv(55.0, 10.0), &frame, &doc);
        assert!(actions.is_empty());
        assert!(reducer.selection().is_none());
    }

    #[test]
    fn mouse_up_releases_capture_but_keeps_selection() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        reducer.handle(&down(5.0, 10.0), &frame, &doc);
        reducer.handle(&mv(55.0, 10.0), &frame, &doc);
        reducer.handle(&up(55.0, 10.0), &frame, &doc);
        assert!(reducer.state().capture.is_none());
        assert!(!reducer.state().is_selecting);
        assert!(reducer.selection().is_some());
    }

    #[test]
    fn mismatched_button_up_does_not_release() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        reducer.handle(&down(5.0, 10.0), &frame, &doc);
        let other = InputEvent::MouseUp(MouseEvent::new(55.0, 10.0, MouseButton::Right));
        reducer.handle(&other, &frame, &doc);
        assert!(reducer.state().capture.is_some());
    }

    #[test]
    fn mouse_down_on_placeholder_does_not_select() {
        let mut doc = Document::new();
        doc.push_block(Block::activity(BlockId::new(1), "working"));
        doc.push_block(Block::prompt(BlockId::new(2), "> "));
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        reducer.handle(&down(5.0, 10.0), &frame, &doc);
        assert!(reducer.state().capture.is_none());
        assert!(reducer.selection().is_none());
    }

    #[test]
    fn mouse_down_outside_content_is_noop() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        // Below the last row (2 rows of content).
        let actions = reducer.handle(&down(5.0, 190.0), &frame, &doc);
        assert!(actions.is_empty());
        assert!(reducer.state().capture.is_none());
    }

    #[test]
    fn escape_clears_everything_and_refocuses() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        reducer.handle(&down(5.0, 10.0), &frame, &doc);
        reducer.handle(&key(KeyCode::Escape), &frame, &doc);
        let state = reducer.state();
        assert!(!state.is_selecting);
        assert!(state.capture.is_none());
        assert!(state.selection.is_none());
        assert_eq!(state.focused, Some(BlockId::new(2)));
    }

    #[test]
    fn text_clears_selection_and_targets_focused_prompt() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        reducer.handle(&down(5.0, 10.0), &frame, &doc);
        reducer.handle(&up(5.0, 10.0), &frame, &doc);
        assert!(reducer.selection().is_some());

        let actions = reducer.handle(&InputEvent::Text('a'), &frame, &doc);
        assert_eq!(
            actions,
            vec![HostAction::InsertText(BlockId::new(2), "a".into())]
        );
        assert!(reducer.selection().is_none());
    }

    #[test]
    fn ctrl_c_requires_selection() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        assert!(reducer.handle(&ctrl('c'), &frame, &doc).is_empty());

        reducer.handle(&down(5.0, 10.0), &frame, &doc);
        reducer.handle(&up(5.0, 10.0), &frame, &doc);
        let actions = reducer.handle(&ctrl('c'), &frame, &doc);
        assert_eq!(actions, vec![HostAction::CopySelectionToClipboard]);
        // Copy does not clear the selection.
        assert!(reducer.selection().is_some());
    }

    #[test]
    fn ctrl_v_clears_selection_and_pastes() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        reducer.handle(&down(5.0, 10.0), &frame, &doc);
        reducer.handle(&up(5.0, 10.0), &frame, &doc);
        let actions = reducer.handle(&ctrl('v'), &frame, &doc);
        assert_eq!(actions, vec![HostAction::PasteFromClipboardIntoLastPrompt]);
        assert!(reducer.selection().is_none());
    }

    #[test]
    fn enter_submits_focused_prompt() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        let actions = reducer.handle(&key(KeyCode::Enter), &frame, &doc);
        assert_eq!(actions, vec![HostAction::SubmitPrompt(BlockId::new(2))]);
    }

    #[test]
    fn tab_completes_only_unowned_prompts() {
        use gridshell_core::block::JobId;

        let mut doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        let actions = reducer.handle(&key(KeyCode::Tab), &frame, &doc);
        assert_eq!(actions, vec![HostAction::Autocomplete]);

        doc.block_by_id_mut(BlockId::new(2))
            .unwrap()
            .as_prompt_mut()
            .unwrap()
            .owner = Some(JobId::new(9));
        let actions = reducer.handle(&key(KeyCode::Tab), &frame, &doc);
        assert!(actions.is_empty());
    }

    #[test]
    fn arrows_and_home_end_move_the_caret() {
        let mut doc = test_doc();
        doc.block_by_id_mut(BlockId::new(2))
            .unwrap()
            .as_prompt_mut()
            .unwrap()
            .input
            .push_str("abc");
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        let id = BlockId::new(2);
        assert_eq!(
            reducer.handle(&key(KeyCode::Left), &frame, &doc),
            vec![HostAction::MoveCaret(id, -1)]
        );
        assert_eq!(
            reducer.handle(&key(KeyCode::Right), &frame, &doc),
            vec![HostAction::MoveCaret(id, 1)]
        );
        assert_eq!(
            reducer.handle(&key(KeyCode::Home), &frame, &doc),
            vec![HostAction::SetCaret(id, 0)]
        );
        assert_eq!(
            reducer.handle(&key(KeyCode::End), &frame, &doc),
            vec![HostAction::SetCaret(id, 3)]
        );
    }

    #[test]
    fn wheel_scrolls_by_rows() {
        let doc = test_doc();
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        let actions = reducer.handle(&InputEvent::Wheel(WheelEvent::new(10.0, 10.0, -3)), &frame, &doc);
        assert_eq!(actions, vec![HostAction::ScrollBy(-3)]);
    }

    #[test]
    fn thumb_drag_emits_scroll_to() {
        // Tall content so the scrollbar engages: 100 rows in a 10-row
        // viewport.
        let mut doc = Document::new();
        let text: Vec<String> = (0..100).map(|i| format!("row {i}")).collect();
        doc.push_block(Block::text(BlockId::new(1), text.join("\n")));
        let frame = frame_for(&doc);
        assert!(frame.scrollbar.is_scrollable);

        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        let thumb = frame.scrollbar.thumb;
        let grab = (thumb.x + 1.0, thumb.y + 2.0);
        reducer.handle(&down(grab.0, grab.1), &frame, &doc);
        assert!(matches!(
            reducer.state().capture,
            Some(Capture {
                kind: CaptureKind::ScrollThumb { .. },
                ..
            })
        ));

        // Drag halfway down the track.
        let target_y = thumb.y + 2.0 + frame.scrollbar.track.height / 2.0;
        let actions = reducer.handle(&mv(grab.0, target_y), &frame, &doc);
        assert_eq!(actions.len(), 1);
        let HostAction::ScrollTo(rows) = &actions[0] else {
            panic!("expected ScrollTo, got {:?}", actions[0]);
        };
        assert!(*rows > 0);

        reducer.handle(&up(grab.0, target_y), &frame, &doc);
        assert!(reducer.state().capture.is_none());
        // A thumb drag is not a text selection.
        assert!(reducer.selection().is_none());
    }

    #[test]
    fn track_click_pages_toward_pointer() {
        let mut doc = Document::new();
        let text: Vec<String> = (0..100).map(|i| format!("row {i}")).collect();
        doc.push_block(Block::text(BlockId::new(1), text.join("\n")));
        doc.scroll.offset_rows = 50;
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        let track_x = frame.scrollbar.track.x + 1.0;
        // Click above the thumb pages up; below pages down.
        let above = reducer.handle(&down(track_x, frame.scrollbar.thumb.y - 20.0), &frame, &doc);
        assert_eq!(above, vec![HostAction::ScrollBy(-10)]);
        let below = reducer.handle(
            &down(track_x, frame.scrollbar.thumb.bottom() + 20.0),
            &frame,
            &doc,
        );
        assert_eq!(below, vec![HostAction::ScrollBy(10)]);
    }

    #[test]
    fn text_without_prompt_focus_is_noop() {
        let mut doc = Document::new();
        doc.push_block(Block::text(BlockId::new(1), "just output"));
        let frame = frame_for(&doc);
        let mut reducer = InteractionReducer::new();
        reducer.initialize(&doc);

        let actions = reducer.handle(&InputEvent::Text('x'), &frame, &doc);
        assert!(actions.is_empty());
    }
}
