#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! The host's window/event loop translates raw windowing events into these
//! types before handing them to the interaction reducer. Mouse coordinates
//! are framebuffer pixels (0-indexed, origin top-left); the reducer maps
//! them to document positions through the current layout frame.
//!
//! # Design Notes
//!
//! - Typed characters arrive as [`InputEvent::Text`], separate from
//!   [`InputEvent::KeyDown`], so keymap-dependent translation stays in the
//!   host.
//! - [`Modifiers`] use bitflags for easy combination.
//! - Wheel deltas are pre-quantized to rows by the host.

use bitflags::bitflags;

/// Canonical input event consumed by the interaction reducer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A typed character (post-keymap translation).
    Text(char),

    /// A non-text key press.
    KeyDown(KeyEvent),

    /// Mouse button pressed.
    MouseDown(MouseEvent),

    /// Mouse moved (button state carried from the initiating press).
    MouseMove(MouseEvent),

    /// Mouse button released.
    MouseUp(MouseEvent),

    /// Mouse wheel turned.
    Wheel(WheelEvent),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if Ctrl is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }
}

/// Key codes routed by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key carried with a chord (e.g. Ctrl+C).
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

bitflags! {
    /// Modifier keys that can be held during a key or mouse event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left/primary button.
    Left,
    /// Right/secondary button.
    Right,
    /// Middle button.
    Middle,
}

/// A mouse button or movement event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// X coordinate in framebuffer pixels.
    pub x: f32,

    /// Y coordinate in framebuffer pixels.
    pub y: f32,

    /// The button driving this event.
    pub button: MouseButton,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a new mouse event.
    #[must_use]
    pub const fn new(x: f32, y: f32, button: MouseButton) -> Self {
        Self {
            x,
            y,
            button,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Get the position as a tuple.
    #[must_use]
    pub const fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// A mouse wheel event, quantized to rows by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// X coordinate in framebuffer pixels.
    pub x: f32,

    /// Y coordinate in framebuffer pixels.
    pub y: f32,

    /// Rows to scroll; negative scrolls toward the top of the transcript.
    pub delta_rows: i32,
}

impl WheelEvent {
    /// Create a new wheel event.
    #[must_use]
    pub const fn new(x: f32, y: f32, delta_rows: i32) -> Self {
        Self { x, y, delta_rows }
    }
}
