//! Conversion from crossterm events. Enabled by the `crossterm` feature.

use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crossterm::event as ct;

/// Maps one terminal event, or `None` for events the table never reacts to (key release
/// and repeat, focus changes, media keys, function keys).
pub fn input_event_from_crossterm(ev: ct::Event) -> Option<InputEvent> {
    match ev {
        ct::Event::Key(key) if key.kind == ct::KeyEventKind::Press => {
            key_event_from_crossterm(key).map(InputEvent::Key)
        }
        ct::Event::Mouse(m) => mouse_event_from_crossterm(m).map(InputEvent::Mouse),
        ct::Event::Paste(text) => Some(InputEvent::Paste(text)),
        ct::Event::Resize(w, h) => Some(InputEvent::Resize(w, h)),
        _ => None,
    }
}

pub fn key_event_from_crossterm(key: ct::KeyEvent) -> Option<KeyEvent> {
    use ct::KeyCode as C;

    let code = match key.code {
        C::Char(c) => KeyCode::Char(c),
        C::Enter => KeyCode::Enter,
        C::Backspace => KeyCode::Backspace,
        C::Delete => KeyCode::Delete,
        C::Tab => KeyCode::Tab,
        C::BackTab => KeyCode::BackTab,
        C::Esc => KeyCode::Esc,
        C::Left => KeyCode::Left,
        C::Right => KeyCode::Right,
        C::Up => KeyCode::Up,
        C::Down => KeyCode::Down,
        C::Home => KeyCode::Home,
        C::End => KeyCode::End,
        C::PageUp => KeyCode::PageUp,
        C::PageDown => KeyCode::PageDown,
        _ => return None,
    };
    Some(KeyEvent::new(code).with_modifiers(key.modifiers.into()))
}

pub fn mouse_event_from_crossterm(m: ct::MouseEvent) -> Option<MouseEvent> {
    use ct::MouseEventKind as K;

    let kind = match m.kind {
        K::Down(b) => MouseEventKind::Down(b.into()),
        K::Up(b) => MouseEventKind::Up(b.into()),
        K::Drag(b) => MouseEventKind::Drag(b.into()),
        K::ScrollUp => MouseEventKind::ScrollUp,
        K::ScrollDown => MouseEventKind::ScrollDown,
        K::ScrollLeft => MouseEventKind::ScrollLeft,
        K::ScrollRight => MouseEventKind::ScrollRight,
        _ => return None,
    };
    Some(MouseEvent {
        x: m.column,
        y: m.row,
        kind,
        modifiers: m.modifiers.into(),
    })
}

impl From<ct::KeyModifiers> for KeyModifiers {
    fn from(m: ct::KeyModifiers) -> Self {
        Self {
            shift: m.contains(ct::KeyModifiers::SHIFT),
            ctrl: m.contains(ct::KeyModifiers::CONTROL),
            alt: m.contains(ct::KeyModifiers::ALT),
        }
    }
}

impl From<ct::MouseButton> for MouseButton {
    fn from(b: ct::MouseButton) -> Self {
        match b {
            ct::MouseButton::Left => MouseButton::Left,
            ct::MouseButton::Right => MouseButton::Right,
            ct::MouseButton::Middle => MouseButton::Middle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_is_forwarded() {
        let ev = ct::Event::Resize(120, 40);
        assert_eq!(input_event_from_crossterm(ev), Some(InputEvent::Resize(120, 40)));
    }

    #[test]
    fn release_events_are_dropped() {
        let mut key = ct::KeyEvent::new(ct::KeyCode::Char('q'), ct::KeyModifiers::NONE);
        key.kind = ct::KeyEventKind::Release;
        assert_eq!(input_event_from_crossterm(ct::Event::Key(key)), None);
    }

    #[test]
    fn ctrl_chords_keep_their_modifier() {
        let key = ct::KeyEvent::new(ct::KeyCode::Char('u'), ct::KeyModifiers::CONTROL);
        let ev = input_event_from_crossterm(ct::Event::Key(key));
        assert!(matches!(ev, Some(InputEvent::Key(k)) if k.is_ctrl('u')));
    }

    #[test]
    fn wheel_and_clicks_map_with_position() {
        let m = ct::MouseEvent {
            kind: ct::MouseEventKind::Down(ct::MouseButton::Left),
            column: 7,
            row: 2,
            modifiers: ct::KeyModifiers::NONE,
        };
        assert_eq!(
            input_event_from_crossterm(ct::Event::Mouse(m)),
            Some(InputEvent::Mouse(MouseEvent::left_click(7, 2)))
        );

        let moved = ct::MouseEvent {
            kind: ct::MouseEventKind::Moved,
            ..m
        };
        assert_eq!(mouse_event_from_crossterm(moved), None);
    }
}
