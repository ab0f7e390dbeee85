//! Backend-neutral input events consumed by the widgets in this crate.
//!
//! Only what a table screen reacts to is modelled: keys, bracketed paste, mouse buttons and
//! wheels on both axes, and terminal resizes. Backends convert into these
//! (see [`crate::crossterm_input`]); anything they cannot express is dropped there.

use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl KeyModifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    /// Ctrl or alt held. Shift alone does not count: it is part of typing.
    pub fn is_command(self) -> bool {
        self.ctrl || self.alt
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Esc,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::none(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The character this key would type into a text field, if any.
    pub fn typed_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.modifiers.is_command() => Some(c),
            _ => None,
        }
    }

    pub fn is_ctrl(&self, c: char) -> bool {
        self.modifiers.ctrl && self.code == KeyCode::Char(c)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Key(KeyEvent),
    Paste(String),
    Mouse(MouseEvent),
    /// New terminal size in cells.
    Resize(u16, u16),
}

impl InputEvent {
    pub fn key_code(&self) -> Option<KeyCode> {
        match self {
            InputEvent::Key(k) => Some(k.code),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseEventKind {
    Down(MouseButton),
    Drag(MouseButton),
    Up(MouseButton),
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: u16,
    pub y: u16,
    pub kind: MouseEventKind,
    pub modifiers: KeyModifiers,
}

impl MouseEvent {
    /// A plain left-button press at `(x, y)`.
    pub fn left_click(x: u16, y: u16) -> Self {
        Self {
            x,
            y,
            kind: MouseEventKind::Down(MouseButton::Left),
            modifiers: KeyModifiers::none(),
        }
    }

    pub fn is_left_click(&self) -> bool {
        self.kind == MouseEventKind::Down(MouseButton::Left)
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_char_ignores_command_chords() {
        let k = KeyEvent::new(KeyCode::Char('a'));
        assert_eq!(k.typed_char(), Some('a'));
        assert_eq!(k.with_modifiers(KeyModifiers::ctrl()).typed_char(), None);
        let shifted = KeyEvent::new(KeyCode::Char('A')).with_modifiers(KeyModifiers {
            shift: true,
            ..KeyModifiers::none()
        });
        assert_eq!(shifted.typed_char(), Some('A'));
        assert_eq!(KeyEvent::new(KeyCode::Enter).typed_char(), None);
    }

    #[test]
    fn ctrl_chord() {
        let k = KeyEvent::new(KeyCode::Char('c')).with_modifiers(KeyModifiers::ctrl());
        assert!(k.is_ctrl('c'));
        assert!(!KeyEvent::new(KeyCode::Char('c')).is_ctrl('c'));
    }

    #[test]
    fn left_click_helpers() {
        let m = MouseEvent::left_click(3, 4);
        assert!(m.is_left_click());
        assert_eq!(m.position(), Position::new(3, 4));
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..m
        };
        assert!(!wheel.is_left_click());
        assert_eq!(InputEvent::Mouse(m).key_code(), None);
    }
}
