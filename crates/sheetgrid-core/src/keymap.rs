use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

/// A named set of keys, with the label shown for it in a help bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub keys: Vec<KeyEvent>,
    pub help_key: String,
    pub help_desc: String,
}

impl Binding {
    pub fn new(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        keys: Vec<KeyEvent>,
    ) -> Self {
        Self {
            keys,
            help_key: help_key.into(),
            help_desc: help_desc.into(),
        }
    }

    /// One plain key per character, e.g. `1`..=`9` for column shortcuts.
    pub fn chars(
        help_key: impl Into<String>,
        help_desc: impl Into<String>,
        chars: impl IntoIterator<Item = char>,
    ) -> Self {
        Self::new(help_key, help_desc, chars.into_iter().map(key_char).collect())
    }

    /// Help-bar entry for keys handled elsewhere; never matches.
    pub fn label(help_key: impl Into<String>, help_desc: impl Into<String>) -> Self {
        Self::new(help_key, help_desc, Vec::new())
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.keys.iter().any(|k| key_event_matches(k, event))
    }
}

/// Exact match on key code and modifiers, except that shift is ignored for characters
/// (terminals already report `G` rather than shift+`g`).
pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    if pattern.code != event.code {
        return false;
    }
    let shift_matters = !matches!(pattern.code, KeyCode::Char(_));
    (!shift_matters || pattern.modifiers.shift == event.modifiers.shift)
        && pattern.modifiers.ctrl == event.modifiers.ctrl
        && pattern.modifiers.alt == event.modifiers.alt
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers::ctrl())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_matches_exact_modifiers() {
        let b = Binding::new("q", "quit", vec![key_char('q')]);
        assert!(b.matches(&key_char('q')));
        assert!(!b.matches(&key_ctrl('q')));
    }

    #[test]
    fn shifted_characters_match_plain_pattern() {
        let b = Binding::new("G", "bottom", vec![key_char('G')]);
        let shifted = key_char('G').with_modifiers(KeyModifiers {
            shift: true,
            ..KeyModifiers::none()
        });
        assert!(b.matches(&shifted));
    }

    #[test]
    fn char_ranges_and_labels() {
        let digits = Binding::chars("1-9", "sort", '1'..='9');
        assert!(digits.matches(&key_char('4')));
        assert!(!digits.matches(&key_char('0')));
        assert!(!Binding::label("j/k", "move").matches(&key_char('j')));
    }
}
