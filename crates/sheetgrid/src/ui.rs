//! Dashboard and login drawing.

use crate::app::App;
use crate::app::Focus;
use crate::app::Screen;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::text::Span;
use sheetgrid_core::sort::SortDirection;

const SEARCH_LABEL: &str = "Search ";
const SEP: &str = "  ·  ";

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    match app.screen() {
        Screen::Login => {
            app.login.render(area, frame.buffer_mut(), &app.theme);
            if let Some(pos) = app.login.cursor_pos(area) {
                frame.set_cursor_position(pos);
            }
        }
        Screen::Dashboard => draw_dashboard(frame, app),
    }
}

fn draw_dashboard(frame: &mut Frame, app: &mut App) {
    let [title, search, body, status, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let buf = frame.buffer_mut();
    render_title(app, title, buf);

    let label_w = (SEARCH_LABEL.len() as u16).min(search.width);
    let label_style = if app.focus() == Focus::Search {
        app.theme.accent
    } else {
        app.theme.text_muted
    };
    buf.set_span(
        search.x,
        search.y,
        &Span::styled(SEARCH_LABEL, label_style),
        label_w,
    );
    let input = Rect {
        x: search.x + label_w,
        width: search.width - label_w,
        ..search
    };
    app.search_area = input;
    app.search.render_ref(input, buf);

    app.table.render(body, buf, &app.theme);
    buf.set_line(status.x, status.y, &status_line(app), status.width);
    app.help.render_ref(help, buf);

    if app.focus() == Focus::Search {
        if let Some(pos) = app.search.cursor_pos(input) {
            frame.set_cursor_position(pos);
        }
    }
}

fn render_title(app: &App, area: Rect, buf: &mut Buffer) {
    let mut spans = vec![
        Span::styled(" sheetgrid", app.theme.header),
        Span::styled(format!("{SEP}{}", app.loader.describe()), app.theme.text_muted),
    ];
    if let Some(user) = &app.user {
        spans.push(Span::styled(
            format!("{SEP}signed in as {user}"),
            app.theme.text_muted,
        ));
    }
    buf.set_line(area.x, area.y, &Line::from(spans), area.width);
}

/// Row counts, active sort, search state, last fetch error and scroll position.
pub fn status_line(app: &App) -> Line<'static> {
    let theme = &app.theme;
    let table = &app.table;
    let mut spans = vec![Span::styled(
        format!(
            " {} of {} rows",
            table.visible_row_count(),
            table.total_row_count()
        ),
        theme.text_primary,
    )];

    if let Some(spec) = table.sort() {
        let name = table
            .grid()
            .headers()
            .get(spec.column)
            .cloned()
            .unwrap_or_default();
        let arrow = match spec.direction {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        };
        spans.push(Span::styled(
            format!("{SEP}sorted by {name} {arrow}"),
            theme.text_muted,
        ));
    }

    let search = table.search();
    if search.is_settling() {
        spans.push(Span::styled(format!("{SEP}searching…"), theme.accent));
    } else if !search.effective().is_empty() {
        spans.push(Span::styled(
            format!("{SEP}matching \"{}\"", search.effective()),
            theme.text_muted,
        ));
    }

    if let Some(err) = &app.loader.state().error {
        spans.push(Span::styled(
            format!("{SEP}fetch failed: {err} (r to retry)"),
            theme.danger,
        ));
    }

    let position = match table.state.percent_y() {
        Some(pct) => format!("{pct}%"),
        None => "All".to_string(),
    };
    spans.push(Span::styled(format!("{SEP}{position}"), theme.text_muted));
    Line::from(spans)
}
