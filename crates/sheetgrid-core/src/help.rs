use crate::keymap::Binding;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

#[derive(Clone, Debug)]
pub struct HelpBarOptions {
    pub style: Style,
    pub key_style: Style,
    pub separator: String,
}

impl Default for HelpBarOptions {
    fn default() -> Self {
        Self {
            style: Style::default(),
            key_style: Style::default(),
            separator: " • ".to_string(),
        }
    }
}

/// One-line summary of key bindings: `key desc • key desc`.
#[derive(Clone, Debug, Default)]
pub struct HelpBar {
    bindings: Vec<Binding>,
    options: HelpBarOptions,
}

impl HelpBar {
    pub fn new(bindings: Vec<Binding>) -> Self {
        Self {
            bindings,
            options: HelpBarOptions::default(),
        }
    }

    pub fn with_options(bindings: Vec<Binding>, options: HelpBarOptions) -> Self {
        Self { bindings, options }
    }

    pub fn set_bindings(&mut self, bindings: Vec<Binding>) {
        self.bindings = bindings;
    }

    pub fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        buf.set_style(area, self.options.style);
        let line = Line::from(self.spans_within(area.width));
        buf.set_line(area.x, area.y, &line, area.width);
    }

    /// Whole entries that fit in `width` cells, in order. Entries that do not fit are
    /// dropped rather than cut, with a trailing `…` when there is room for it.
    fn spans_within(&self, width: u16) -> Vec<Span<'static>> {
        let width = width as usize;
        let sep_w = self.options.separator.width();
        let mut spans = Vec::new();
        let mut used = 0;
        for (i, b) in self.bindings.iter().enumerate() {
            let lead = if i > 0 { sep_w } else { 0 };
            let entry_w = lead + b.help_key.width() + 1 + b.help_desc.width();
            if used + entry_w > width {
                if i > 0 && used + 2 <= width {
                    spans.push(Span::styled(" …", self.options.style));
                }
                break;
            }
            if i > 0 {
                spans.push(Span::styled(
                    self.options.separator.clone(),
                    self.options.style,
                ));
            }
            spans.push(Span::styled(b.help_key.clone(), self.options.key_style));
            spans.push(Span::styled(format!(" {}", b.help_desc), self.options.style));
            used += entry_w;
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap;

    #[test]
    fn renders_bindings_in_order() {
        let hb = HelpBar::new(vec![
            keymap::Binding::new("/", "search", vec![keymap::key_char('/')]),
            keymap::Binding::new("q", "quit", vec![keymap::key_char('q')]),
        ]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 1));
        hb.render_ref(Rect::new(0, 0, 20, 1), &mut buf);
        let text: String = (0..20)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert!(text.starts_with("/ search • q quit"));
    }

    #[test]
    fn drops_entries_that_do_not_fit() {
        let hb = HelpBar::new(vec![
            keymap::Binding::new("/", "search", vec![keymap::key_char('/')]),
            keymap::Binding::new("r", "refresh", vec![keymap::key_char('r')]),
        ]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 14, 1));
        hb.render_ref(Rect::new(0, 0, 14, 1), &mut buf);
        let text: String = (0..14)
            .map(|x| buf.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert_eq!(text, "/ search …    ");
    }

    #[test]
    fn narrow_width_does_not_panic() {
        let hb = HelpBar::new(vec![keymap::Binding::new(
            "q",
            "quit",
            vec![keymap::key_char('q')],
        )]);
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        hb.render_ref(Rect::new(0, 0, 3, 1), &mut buf);
    }
}
