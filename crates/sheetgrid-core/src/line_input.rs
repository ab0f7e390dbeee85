use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::render;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug)]
pub struct LineInputOptions {
    pub style: Style,
    pub placeholder: String,
    pub placeholder_style: Style,
    /// Render every character as this one (password fields).
    pub mask: Option<char>,
}

impl Default for LineInputOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            placeholder: String::new(),
            placeholder_style: Style::default(),
            mask: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineInputAction {
    None,
    Changed,
    Submitted(String),
}

/// A single-line text field with cursor movement and horizontal scrolling.
#[derive(Clone, Debug, Default)]
pub struct LineInput {
    text: String,
    cursor: usize, // char index
    scroll_x: u32,
    options: LineInputOptions,
}

impl LineInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: LineInputOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = single_line(&text.into());
        self.cursor = self.text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.scroll_x = 0;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn input(&mut self, event: InputEvent) -> LineInputAction {
        match event {
            InputEvent::Paste(s) => {
                let s = single_line(&s);
                if s.is_empty() {
                    return LineInputAction::None;
                }
                for c in s.chars() {
                    self.insert_char(c);
                }
                LineInputAction::Changed
            }
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(_) | InputEvent::Resize(..) => LineInputAction::None,
        }
    }

    /// Screen position of the terminal cursor when this input is rendered in `area`.
    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if area.width == 0 || area.height == 0 {
            return None;
        }
        let x = self.cursor_display_x().saturating_sub(self.scroll_x);
        if x >= area.width as u32 {
            return None;
        }
        Some((area.x + x as u16, area.y))
    }

    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.ensure_cursor_visible(area.width);
        buf.set_style(area, self.options.style);

        if self.text.is_empty() {
            render::render_str_clipped(
                area.x,
                area.y,
                0,
                area.width,
                buf,
                &self.options.placeholder,
                self.options.placeholder_style,
            );
            return;
        }

        let shown = match self.options.mask {
            Some(m) => std::iter::repeat_n(m, self.text.chars().count()).collect(),
            None => self.text.clone(),
        };
        render::render_str_clipped(
            area.x,
            area.y,
            self.scroll_x,
            area.width,
            buf,
            &shown,
            self.options.style,
        );
    }

    fn handle_key(&mut self, key: KeyEvent) -> LineInputAction {
        if key.modifiers.ctrl {
            return match key.code {
                KeyCode::Char('u') => {
                    if self.text.is_empty() {
                        LineInputAction::None
                    } else {
                        self.clear();
                        LineInputAction::Changed
                    }
                }
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    LineInputAction::None
                }
                KeyCode::Char('e') => {
                    self.cursor = self.char_len();
                    LineInputAction::None
                }
                _ => LineInputAction::None,
            };
        }

        match key.code {
            KeyCode::Char(_) => match key.typed_char() {
                Some(c) => {
                    self.insert_char(c);
                    LineInputAction::Changed
                }
                None => LineInputAction::None,
            },
            KeyCode::Enter => LineInputAction::Submitted(self.text.clone()),
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return LineInputAction::None;
                }
                self.cursor -= 1;
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
                LineInputAction::Changed
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_len() {
                    return LineInputAction::None;
                }
                let at = self.byte_index(self.cursor);
                self.text.remove(at);
                LineInputAction::Changed
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                LineInputAction::None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                LineInputAction::None
            }
            KeyCode::Home => {
                self.cursor = 0;
                LineInputAction::None
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                LineInputAction::None
            }
            KeyCode::Tab
            | KeyCode::BackTab
            | KeyCode::Esc
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::PageUp
            | KeyCode::PageDown => LineInputAction::None,
        }
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.text.insert(at, c);
        self.cursor += 1;
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn cursor_display_x(&self) -> u32 {
        if self.options.mask.is_some() {
            return self.cursor as u32;
        }
        self.text
            .chars()
            .take(self.cursor)
            .map(|c| UnicodeWidthChar::width(c).unwrap_or(0) as u32)
            .sum()
    }

    fn ensure_cursor_visible(&mut self, width: u16) {
        let cx = self.cursor_display_x();
        let w = width.max(1) as u32;
        if cx < self.scroll_x {
            self.scroll_x = cx;
        } else if cx >= self.scroll_x + w {
            self.scroll_x = cx + 1 - w;
        }
        let total = if self.options.mask.is_some() {
            self.char_len() as u32
        } else {
            self.text.width() as u32
        };
        if total < w {
            self.scroll_x = 0;
        }
    }
}

fn single_line(s: &str) -> String {
    s.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap;

    fn press(input: &mut LineInput, code: KeyCode) -> LineInputAction {
        input.input(InputEvent::Key(KeyEvent::new(code)))
    }

    fn rendered(input: &mut LineInput, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        input.render_ref(area, &mut buf);
        (0..width)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn typing_and_editing() {
        let mut i = LineInput::new();
        for c in "a.cm".chars() {
            assert_eq!(press(&mut i, KeyCode::Char(c)), LineInputAction::Changed);
        }
        press(&mut i, KeyCode::Left);
        assert_eq!(press(&mut i, KeyCode::Char('o')), LineInputAction::Changed);
        assert_eq!(i.text(), "a.com");
        press(&mut i, KeyCode::Home);
        assert_eq!(press(&mut i, KeyCode::Backspace), LineInputAction::None);
        assert_eq!(press(&mut i, KeyCode::Delete), LineInputAction::Changed);
        assert_eq!(i.text(), ".com");
    }

    #[test]
    fn enter_submits_without_clearing() {
        let mut i = LineInput::new();
        i.set_text("admin");
        assert_eq!(
            press(&mut i, KeyCode::Enter),
            LineInputAction::Submitted("admin".to_string())
        );
        assert_eq!(i.text(), "admin");
    }

    #[test]
    fn ctrl_u_clears() {
        let mut i = LineInput::new();
        i.set_text("query");
        let action = i.input(InputEvent::Key(keymap::key_ctrl('u')));
        assert_eq!(action, LineInputAction::Changed);
        assert!(i.is_empty());
    }

    #[test]
    fn paste_strips_newlines() {
        let mut i = LineInput::new();
        i.input(InputEvent::Paste("a\nb\r\n".to_string()));
        assert_eq!(i.text(), "ab");
    }

    #[test]
    fn mask_hides_text() {
        let mut i = LineInput::with_options(LineInputOptions {
            mask: Some('*'),
            ..Default::default()
        });
        i.set_text("secret");
        assert_eq!(rendered(&mut i, 8), "******  ");
    }

    #[test]
    fn placeholder_when_empty() {
        let mut i = LineInput::with_options(LineInputOptions {
            placeholder: "Search".to_string(),
            ..Default::default()
        });
        assert_eq!(rendered(&mut i, 6), "Search");
    }

    #[test]
    fn long_text_scrolls_to_cursor() {
        let mut i = LineInput::new();
        i.set_text("abcdefghij");
        assert_eq!(rendered(&mut i, 4), "hij ");
        assert_eq!(i.cursor_pos(Rect::new(0, 0, 4, 1)), Some((3, 0)));
    }
}
