#![forbid(unsafe_code)]

//! Canonical keyboard event types.
//!
//! The host page delivers raw key events to the engine as [`KeyEvent`]
//! values. All types derive `Clone`, `PartialEq`, and `Eq` for use in tests
//! and pattern matching.
//!
//! # Design Notes
//!
//! - `KeyCode::Char` carries the already-shifted character (`Shift+t`
//!   arrives as `Char('T')`), so chord matching never has to re-apply
//!   shift state itself.
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish
//!   press/repeat/release.
//! - `Modifiers` use bitflags for easy combination.

use bitflags::bitflags;

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event for a character key.
    #[must_use]
    pub const fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c))
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if Super/Meta/Cmd modifier is held.
    #[must_use]
    pub const fn super_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SUPER)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Delete key.
    Delete,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Function key (F1-F24).
    F(u8),
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
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

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
