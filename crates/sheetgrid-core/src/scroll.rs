use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;
use crate::viewport::ViewportState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollAction {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Top,
    Bottom,
}

#[derive(Clone, Debug)]
pub struct ScrollBindings {
    pub horiz_step: i32,
    pub up: Vec<KeyEvent>,
    pub down: Vec<KeyEvent>,
    pub left: Vec<KeyEvent>,
    pub right: Vec<KeyEvent>,
    pub page_up: Vec<KeyEvent>,
    pub page_down: Vec<KeyEvent>,
    pub top: Vec<KeyEvent>,
    pub bottom: Vec<KeyEvent>,
}

impl Default for ScrollBindings {
    fn default() -> Self {
        Self {
            horiz_step: 4,
            up: vec![KeyEvent::new(KeyCode::Up), keymap::key_char('k')],
            down: vec![KeyEvent::new(KeyCode::Down), keymap::key_char('j')],
            left: vec![KeyEvent::new(KeyCode::Left), keymap::key_char('h')],
            right: vec![KeyEvent::new(KeyCode::Right), keymap::key_char('l')],
            page_up: vec![KeyEvent::new(KeyCode::PageUp), keymap::key_ctrl('u')],
            page_down: vec![KeyEvent::new(KeyCode::PageDown), keymap::key_ctrl('d')],
            top: vec![KeyEvent::new(KeyCode::Home), keymap::key_char('g')],
            bottom: vec![KeyEvent::new(KeyCode::End), keymap::key_char('G')],
        }
    }
}

impl ScrollBindings {
    pub fn action_for(&self, key: &KeyEvent) -> Option<ScrollAction> {
        let table: [(&[KeyEvent], ScrollAction); 8] = [
            (self.up.as_slice(), ScrollAction::Up),
            (self.down.as_slice(), ScrollAction::Down),
            (self.left.as_slice(), ScrollAction::Left),
            (self.right.as_slice(), ScrollAction::Right),
            (self.page_up.as_slice(), ScrollAction::PageUp),
            (self.page_down.as_slice(), ScrollAction::PageDown),
            (self.top.as_slice(), ScrollAction::Top),
            (self.bottom.as_slice(), ScrollAction::Bottom),
        ];
        table
            .into_iter()
            .find(|(keys, _)| keys.iter().any(|p| keymap::key_event_matches(p, key)))
            .map(|(_, action)| action)
    }
}

/// Keeps a fixed header band horizontally aligned with the scrollable body.
///
/// Only the body drives the header; the header is never scrolled vertically.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScrollSync {
    header_x: u32,
}

impl ScrollSync {
    pub fn header_x(&self) -> u32 {
        self.header_x
    }

    /// Call after every body scroll.
    pub fn on_body_scroll(&mut self, body: &ViewportState) {
        self.header_x = body.x;
    }
}
