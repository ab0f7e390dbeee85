use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::viewport::ViewportState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Right,
}

pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if state.content_h <= state.viewport_h as u32 || state.content_h == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((state.viewport_h as f64 / state.content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_y = state.max_y().max(1) as f64;
    let thumb_top = ((state.y as f64 / max_y) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            " "
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

/// Writes `input` starting at display column `start_col`, at most `max_cols` wide.
///
/// Wide characters cut by either edge are skipped rather than split.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    if max_cols == 0 {
        return;
    }

    let start_col = start_col as usize;
    let max_cols = max_cols as usize;
    let mut col = 0usize;
    let mut out_cols = 0usize;
    let mut dx = 0u16;
    let mut tmp = [0u8; 4];

    for ch in input.chars() {
        let ch = if ch == '\t' { ' ' } else { ch };
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if col < start_col {
            col += w;
            continue;
        }
        if out_cols + w > max_cols {
            return;
        }

        let s = ch.encode_utf8(&mut tmp);
        if let Some(cell) = buf.cell_mut((x + dx, y)) {
            cell.set_style(style);
            cell.set_symbol(s);
        }
        dx += 1;
        out_cols += 1;
        col += w;

        if w == 2 {
            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
            dx += 1;
            out_cols += 1;
        }
    }
}

/// Renders one table cell: one space of padding, then `text` aligned inside the column,
/// truncated with `…` when it does not fit.
///
/// `clip_left` is how many columns of the cell are scrolled off the left edge of `area`.
pub fn render_cell_text(
    area: Rect,
    buf: &mut Buffer,
    clip_left: u32,
    col_width: u16,
    text: &str,
    align: Align,
    style: Style,
) {
    if area.width == 0 || area.height == 0 || col_width == 0 {
        return;
    }
    let inner = col_width.saturating_sub(2) as usize;
    let fitted = fit_to_width(text, inner);
    let pad = match align {
        Align::Left => 0,
        Align::Right => inner.saturating_sub(fitted.width()),
    };
    let mut line = String::with_capacity(col_width as usize);
    line.push(' ');
    line.extend(std::iter::repeat_n(' ', pad));
    line.push_str(&fitted);
    render_str_clipped(area.x, area.y, clip_left, area.width, buf, &line, style);
}

/// Truncates `input` to `max_cols` display columns, ending in `…` when anything was cut.
pub fn fit_to_width(input: &str, max_cols: usize) -> String {
    if input.width() <= max_cols {
        return input.to_string();
    }
    if max_cols == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_cols - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Draws a bordered, centered message box over `area`.
pub fn render_overlay(area: Rect, buf: &mut Buffer, message: &str, style: Style) {
    let w = (message.width() as u16 + 4).min(area.width);
    let h = 3u16.min(area.height);
    if w < 3 || h == 0 {
        return;
    }
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    let rect = Rect::new(x, y, w, h);
    buf.set_style(rect, style);
    for dy in 0..h {
        for dx in 0..w {
            let top = dy == 0;
            let bottom = dy + 1 == h && h > 1;
            let left = dx == 0;
            let right = dx + 1 == w;
            let sym = match (top, bottom, left, right) {
                (true, _, true, _) => "┌",
                (true, _, _, true) => "┐",
                (_, true, true, _) => "└",
                (_, true, _, true) => "┘",
                (true, _, _, _) | (_, true, _, _) => "─",
                (_, _, true, _) | (_, _, _, true) => "│",
                _ => " ",
            };
            if let Some(cell) = buf.cell_mut((x + dx, y + dy)) {
                cell.set_symbol(sym);
            }
        }
    }
    if h >= 3 {
        render_str_clipped(x + 2, y + 1, 0, w.saturating_sub(4), buf, message, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn clipped_render_skips_leading_columns() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        render_str_clipped(0, 0, 2, 4, &mut buf, "abcdef", Style::default());
        assert_eq!(row_text(&buf, 0), "cdef");
    }

    #[test]
    fn cell_text_aligns_right() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 1));
        render_cell_text(
            Rect::new(0, 0, 8, 1),
            &mut buf,
            0,
            8,
            "42",
            Align::Right,
            Style::default(),
        );
        assert_eq!(row_text(&buf, 0), "     42 ");
    }

    #[test]
    fn fit_adds_ellipsis() {
        assert_eq!(fit_to_width("abcdef", 4), "abc…");
        assert_eq!(fit_to_width("abc", 4), "abc");
        assert_eq!(fit_to_width("你好世界", 5), "你好…");
    }

    #[test]
    fn overlay_is_centered() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 5));
        render_overlay(buf.area, &mut buf, "Loading", Style::default());
        assert!(row_text(&buf, 2).contains("Loading"));
        assert_eq!(row_text(&buf, 0).trim(), "");
    }

    #[test]
    fn scrollbar_does_not_panic() {
        let mut state = ViewportState::default();
        state.set_viewport(10, 5);
        state.set_content(10, 50);
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 5));
        render_scrollbar(Rect::new(0, 0, 1, 5), &mut buf, &state, Style::default());
    }
}
