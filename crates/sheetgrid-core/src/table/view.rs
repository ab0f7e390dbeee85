use crate::classify;
use crate::classify::ColumnKind;
use crate::classify::ColumnKinds;
use crate::debounce::SEARCH_DEBOUNCE;
use crate::debounce::SearchState;
use crate::filter;
use crate::grid::Grid;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crate::input::MouseEventKind;
use crate::layout;
use crate::layout::LayoutCache;
use crate::layout::ViewportClass;
use crate::layout::WidthStrategy;
use crate::render;
use crate::render::Align;
use crate::scroll::ScrollAction;
use crate::scroll::ScrollBindings;
use crate::scroll::ScrollSync;
use crate::sort;
use crate::sort::SortSpec;
use crate::theme::Theme;
use crate::viewport::ViewportState;
use crate::window::RowWindow;
use crate::window::RowWindowOptions;
use crate::window::VisibleWindow;
use log::debug;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use std::time::Duration;
use std::time::Instant;

/// Cells between two columns, drawn as a separator.
pub const COL_GAP: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableAction {
    None,
    Redraw,
    SortChanged(SortSpec),
    /// Enter on the cursor row; carries the row's index in the source grid.
    Activated(usize),
}

/// Horizontal extent of one column in cells, relative to the left edge of the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpan {
    pub start: u32,
    pub width: u16,
}

impl ColumnSpan {
    pub fn end(&self) -> u32 {
        self.start + self.width as u32
    }
}

/// Options for [`TableView`].
#[derive(Clone, Debug)]
pub struct TableViewOptions {
    pub window: RowWindowOptions,
    pub compact_breakpoint_px: u32,
    /// Column the search box matches against.
    pub key_column: usize,
    pub search_debounce: Duration,
    pub width_strategy: WidthStrategy,
    pub column_kinds: ColumnKinds,
    pub show_scrollbar: bool,
    /// Rows moved per mouse wheel notch.
    pub wheel_rows: u32,
    pub loading_message: String,
    pub bindings: ScrollBindings,
}

impl Default for TableViewOptions {
    fn default() -> Self {
        Self {
            window: RowWindowOptions::default(),
            compact_breakpoint_px: layout::COMPACT_BREAKPOINT_PX,
            key_column: filter::DEFAULT_KEY_COLUMN,
            search_debounce: SEARCH_DEBOUNCE,
            width_strategy: WidthStrategy::default(),
            column_kinds: ColumnKinds::default(),
            show_scrollbar: true,
            wheel_rows: 3,
            loading_message: "Loading…".to_string(),
            bindings: ScrollBindings::default(),
        }
    }
}

/// A searchable, sortable table over a [`Grid`] that only renders the rows in view.
///
/// The working row array is a vector of indices into the grid: the rows that pass the
/// current search, in sort order. It is rebuilt whenever the grid, the effective query or
/// the sort spec changes. Rendering is driven by [`RowWindow`], so drawing a frame costs the
/// same for ten rows as for a hundred thousand.
///
/// Like the other widgets in this crate, the view does not own an event loop. Feed it events
/// with [`TableView::handle_event`], call [`TableView::tick`] so debounced search input can
/// settle, and draw it with [`TableView::render`].
pub struct TableView {
    /// Horizontal scroll of the body. `y` mirrors the row window's scroll offset.
    pub state: ViewportState,
    options: TableViewOptions,
    grid: Grid,
    generation: u64,
    kinds: Vec<ColumnKind>,
    filtered: Vec<usize>,
    rows: Vec<usize>,
    search: SearchState,
    sort: Option<SortSpec>,
    layout: LayoutCache,
    class: ViewportClass,
    window: RowWindow,
    sync: ScrollSync,
    cursor: Option<usize>,
    loading: bool,
    header_area: Rect,
    body_area: Rect,
}

impl Default for TableView {
    fn default() -> Self {
        Self::with_options(TableViewOptions::default())
    }
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TableViewOptions) -> Self {
        Self {
            state: ViewportState::default(),
            search: SearchState::new(options.search_debounce),
            window: RowWindow::new(options.window.clone()),
            options,
            grid: Grid::default(),
            generation: 0,
            kinds: Vec::new(),
            filtered: Vec::new(),
            rows: Vec::new(),
            sort: None,
            layout: LayoutCache::default(),
            class: ViewportClass::default(),
            sync: ScrollSync::default(),
            cursor: None,
            loading: false,
            header_area: Rect::default(),
            body_area: Rect::default(),
        }
    }

    pub fn options(&self) -> &TableViewOptions {
        &self.options
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Replaces the grid and reapplies the current search and sort to it.
    pub fn set_grid(&mut self, grid: Grid) {
        self.generation += 1;
        self.kinds = self.options.column_kinds.kinds_for(grid.headers());
        if self
            .sort
            .is_some_and(|spec| spec.column >= grid.column_count())
        {
            self.sort = None;
        }
        debug!(
            "grid generation {}: {} columns, {} rows",
            self.generation,
            grid.column_count(),
            grid.row_count()
        );
        self.grid = grid;
        self.refilter();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn column_kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    /// Rows passing the current search.
    pub fn visible_row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn total_row_count(&self) -> usize {
        self.grid.row_count()
    }

    /// Source-grid indices of the working rows, in display order.
    pub fn row_order(&self) -> &[usize] {
        &self.rows
    }

    /// The `n`th displayed row.
    pub fn displayed_row(&self, n: usize) -> Option<&[String]> {
        self.rows
            .get(n)
            .and_then(|&i| self.grid.rows().get(i))
            .map(Vec::as_slice)
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    pub fn toggle_sort(&mut self, column: usize) -> Option<SortSpec> {
        if column >= self.grid.column_count() {
            return None;
        }
        let spec = sort::toggle_sort(self.sort, column);
        debug!("sort by column {} {:?}", spec.column, spec.direction);
        self.sort = Some(spec);
        self.resort();
        Some(spec)
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Records a keystroke's worth of search text. Nothing is filtered until [`Self::tick`]
    /// sees the value settle.
    pub fn set_search_input(&mut self, raw: impl Into<String>, now: Instant) {
        self.search.set_raw(raw, now);
    }

    /// Applies the search query once it has been quiet for the debounce delay. Returns `true`
    /// when the working rows changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.search.tick(now) {
            return false;
        }
        self.refilter();
        self.window.set_scroll_offset(0);
        self.sync_state_y();
        true
    }

    pub fn search_due_in(&self, now: Instant) -> Option<Duration> {
        self.search.time_until_due(now)
    }

    /// Applies `query` immediately, discarding any pending input. Returns `true` when the
    /// working rows changed.
    pub fn apply_search(&mut self, query: impl Into<String>) -> bool {
        if !self.search.apply_now(query) {
            return false;
        }
        self.refilter();
        self.window.set_scroll_offset(0);
        self.sync_state_y();
        true
    }

    /// Drops the query and any pending input, restoring every row.
    pub fn clear_search(&mut self) -> bool {
        self.apply_search("")
    }

    pub fn viewport_class(&self) -> ViewportClass {
        self.class
    }

    /// Re-evaluates the viewport class for a terminal `width_cells` wide. Returns `true` when
    /// it changed.
    pub fn set_viewport_width(&mut self, width_cells: u16) -> bool {
        let class = ViewportClass::from_cells(width_cells, self.options.compact_breakpoint_px);
        if class == self.class {
            return false;
        }
        debug!("viewport class {:?} -> {:?}", self.class, class);
        self.class = class;
        self.window.set_viewport_class(class);
        true
    }

    /// Cursor position within the displayed rows.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = clamp_cursor(cursor, self.rows.len());
        if let Some(c) = self.cursor {
            self.window.scroll_to_index(c);
            self.sync_state_y();
        }
    }

    pub fn scroll_offset(&self) -> u64 {
        self.window.scroll_offset()
    }

    pub fn scroll_rows_by(&mut self, rows: i64) {
        let step = self.window.row_height() as i64;
        self.window.scroll_by(rows.saturating_mul(step));
        self.sync_state_y();
    }

    pub fn scroll_x_by(&mut self, delta: i32) {
        self.state.scroll_x_by(delta);
        self.sync.on_body_scroll(&self.state);
    }

    pub fn header_offset(&self) -> u32 {
        self.sync.header_x()
    }

    /// Column widths in cells for the current grid and viewport class.
    pub fn column_spans(&mut self) -> Vec<ColumnSpan> {
        let widths = self.layout.widths(
            self.generation,
            self.class,
            self.grid.headers(),
            self.grid.rows(),
            &self.options.width_strategy,
        );
        spans_for(widths)
    }

    /// Column under screen column `x` in the header band of the last render.
    pub fn column_at_x(&mut self, x: u16) -> Option<usize> {
        let area = self.header_area;
        if x < area.x || x >= area.x + area.width {
            return None;
        }
        let rel = (x - area.x) as u32 + self.sync.header_x();
        self.column_spans()
            .iter()
            .position(|s| rel >= s.start && rel < s.end())
    }

    pub fn handle_event(&mut self, event: InputEvent) -> TableAction {
        match event {
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(mouse) => self.handle_mouse(mouse),
            InputEvent::Resize(w, _) => {
                self.set_viewport_width(w);
                TableAction::Redraw
            }
            InputEvent::Paste(_) => TableAction::None,
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if !self.grid.is_empty() {
            self.render_table(area, buf, theme);
        }
        if self.loading {
            render::render_overlay(area, buf, &self.options.loading_message, theme.overlay);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> TableAction {
        if let Some(action) = self.options.bindings.action_for(&key) {
            return self.scroll_action(action);
        }
        if key.modifiers.is_command() {
            return TableAction::None;
        }
        match key.code {
            KeyCode::Enter => match self.cursor.and_then(|c| self.rows.get(c)) {
                Some(&src) => TableAction::Activated(src),
                None => TableAction::None,
            },
            KeyCode::Char(c @ '1'..='9') => {
                let column = c as usize - '1' as usize;
                self.toggle_sort(column)
                    .map(TableAction::SortChanged)
                    .unwrap_or(TableAction::None)
            }
            _ => TableAction::None,
        }
    }

    fn scroll_action(&mut self, action: ScrollAction) -> TableAction {
        let page = (self.window.viewport_height() / self.window.row_height()).max(2) as i64 - 1;
        match action {
            ScrollAction::Up => self.move_cursor_by(-1),
            ScrollAction::Down => self.move_cursor_by(1),
            ScrollAction::PageUp => self.move_cursor_by(-page),
            ScrollAction::PageDown => self.move_cursor_by(page),
            ScrollAction::Top => self.move_cursor_to(0),
            ScrollAction::Bottom => self.move_cursor_to(self.rows.len().saturating_sub(1)),
            ScrollAction::Left => {
                self.scroll_x_by(-self.options.bindings.horiz_step);
                TableAction::Redraw
            }
            ScrollAction::Right => {
                self.scroll_x_by(self.options.bindings.horiz_step);
                TableAction::Redraw
            }
        }
    }

    fn move_cursor_by(&mut self, delta: i64) -> TableAction {
        if self.rows.is_empty() {
            return TableAction::None;
        }
        let next = match self.cursor {
            None => 0,
            Some(c) => (c as i64 + delta).clamp(0, self.rows.len() as i64 - 1) as usize,
        };
        self.move_cursor_to(next)
    }

    fn move_cursor_to(&mut self, row: usize) -> TableAction {
        if self.rows.is_empty() || self.cursor == Some(row) {
            return TableAction::None;
        }
        self.set_cursor(Some(row));
        TableAction::Redraw
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> TableAction {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if contains(self.header_area, mouse.x, mouse.y) {
                    return match self.column_at_x(mouse.x) {
                        Some(col) => self
                            .toggle_sort(col)
                            .map(TableAction::SortChanged)
                            .unwrap_or(TableAction::None),
                        None => TableAction::None,
                    };
                }
                if contains(self.body_area, mouse.x, mouse.y) {
                    let offset = self.window.scroll_offset() + (mouse.y - self.body_area.y) as u64;
                    if offset >= self.window.total_height() {
                        return TableAction::None;
                    }
                    if let Some(row) = self.window.index_at_offset(offset) {
                        self.set_cursor(Some(row));
                        return TableAction::Redraw;
                    }
                }
                TableAction::None
            }
            MouseEventKind::ScrollUp => {
                self.scroll_rows_by(-(self.options.wheel_rows as i64));
                TableAction::Redraw
            }
            MouseEventKind::ScrollDown => {
                self.scroll_rows_by(self.options.wheel_rows as i64);
                TableAction::Redraw
            }
            MouseEventKind::ScrollLeft => {
                self.scroll_x_by(-self.options.bindings.horiz_step);
                TableAction::Redraw
            }
            MouseEventKind::ScrollRight => {
                self.scroll_x_by(self.options.bindings.horiz_step);
                TableAction::Redraw
            }
            _ => TableAction::None,
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter::filter_rows(
            self.grid.rows(),
            self.search.effective(),
            self.options.key_column,
        );
        self.resort();
    }

    /// Sorts from the filtered projection, which is in source order, so ties always keep
    /// their source order regardless of earlier sorts.
    fn resort(&mut self) {
        self.rows = match self.sort {
            Some(spec) => sort::sort_rows(
                self.grid.rows(),
                &self.filtered,
                spec.column,
                self.kinds.get(spec.column).copied().unwrap_or_default(),
                spec.direction,
            ),
            None => self.filtered.clone(),
        };
        self.window.set_count(self.rows.len());
        self.cursor = clamp_cursor(self.cursor, self.rows.len());
        self.sync_state_y();
    }

    fn sync_state_y(&mut self) {
        self.state.content_h = self.window.total_height().min(u32::MAX as u64) as u32;
        self.state.y = self.window.scroll_offset().min(u32::MAX as u64) as u32;
    }

    fn render_table(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let (content, scrollbar_x) = if self.options.show_scrollbar && area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };
        let header_h = 1u16.min(content.height);
        let header_area = Rect::new(content.x, content.y, content.width, header_h);
        let body_area = Rect::new(
            content.x,
            content.y + header_h,
            content.width,
            content.height - header_h,
        );
        self.header_area = header_area;
        self.body_area = body_area;

        let spans = self.column_spans();
        let content_w = spans.last().map(ColumnSpan::end).unwrap_or(0);

        self.window.set_viewport_height(body_area.height as u32);
        self.state.set_viewport(body_area.width, body_area.height);
        self.state.content_w = content_w;
        self.sync_state_y();
        self.state.clamp();
        self.sync.on_body_scroll(&self.state);

        buf.set_style(content, theme.text_primary);
        self.render_header(header_area, buf, theme, &spans);

        let win = self.window.window();
        self.render_body(body_area, buf, theme, &spans, &win);

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, body_area.y, 1, body_area.height),
                buf,
                &ViewportState {
                    x: 0,
                    y: self.state.y,
                    viewport_w: 1,
                    viewport_h: body_area.height,
                    content_w: 1,
                    content_h: self.state.content_h,
                },
                theme.text_muted,
            );
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, theme: &Theme, spans: &[ColumnSpan]) {
        if area.height == 0 {
            return;
        }
        buf.set_style(area, theme.header);
        let scroll_x = self.sync.header_x() as u64;
        for (col, span) in spans.iter().enumerate() {
            let (rect, clip_left) = clipped_rect_x(area, scroll_x, span.start as u64, span.width);
            if rect.width > 0 {
                let name = &self.grid.headers()[col];
                let label = match sort::sort_indicator(self.sort, col) {
                    Some(ind) => format!("{name} {ind}"),
                    None => name.clone(),
                };
                render::render_cell_text(
                    rect,
                    buf,
                    clip_left,
                    span.width,
                    &label,
                    self.align_for(col),
                    theme.header,
                );
            }
            if col + 1 < spans.len() {
                draw_separator(area, buf, scroll_x, span.end(), theme.text_muted);
            }
        }
    }

    fn render_body(
        &self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        spans: &[ColumnSpan],
        win: &VisibleWindow,
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let scroll_x = self.state.x as u64;
        let scroll_y = self.window.scroll_offset();

        for slot in &win.slots {
            let Some(&src) = self.rows.get(slot.index) else {
                continue;
            };
            let (row_rect, clip_top) = clipped_rect_y(area, scroll_y, slot.offset, slot.size);
            if row_rect.height == 0 {
                continue;
            }
            let row_style = if self.cursor == Some(slot.index) {
                theme.text_primary.patch(theme.cursor_row)
            } else {
                theme.text_primary
            };
            buf.set_style(row_rect, row_style);

            for (col, span) in spans.iter().enumerate() {
                if col + 1 < spans.len() {
                    draw_separator(row_rect, buf, scroll_x, span.end(), theme.text_muted);
                }
                // Text sits on the first line of the row.
                if clip_top > 0 {
                    continue;
                }
                let line = Rect::new(row_rect.x, row_rect.y, row_rect.width, 1);
                let (rect, clip_left) = clipped_rect_x(line, scroll_x, span.start as u64, span.width);
                if rect.width == 0 {
                    continue;
                }
                let kind = self.kinds.get(col).copied().unwrap_or_default();
                let shown = classify::display_cell(self.grid.cell(src, col), kind);
                let style = if shown == classify::MISSING {
                    row_style.patch(theme.text_muted)
                } else {
                    row_style
                };
                render::render_cell_text(
                    rect,
                    buf,
                    clip_left,
                    span.width,
                    &shown,
                    self.align_for(col),
                    style,
                );
            }
        }
    }

    fn align_for(&self, col: usize) -> Align {
        match self.kinds.get(col) {
            Some(ColumnKind::Numeric) => Align::Right,
            _ => Align::Left,
        }
    }
}

fn spans_for(widths_px: &[u32]) -> Vec<ColumnSpan> {
    let mut start = 0u32;
    widths_px
        .iter()
        .map(|&px| {
            let span = ColumnSpan {
                start,
                width: layout::px_to_cells(px),
            };
            start = span.end() + COL_GAP;
            span
        })
        .collect()
}

fn clamp_cursor(cursor: Option<usize>, rows: usize) -> Option<usize> {
    if rows == 0 {
        return None;
    }
    cursor.map(|c| c.min(rows - 1))
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x && x < area.x + area.width && y >= area.y && y < area.y + area.height
}

fn clipped_rect_x(area: Rect, scroll_x: u64, start: u64, size: u16) -> (Rect, u32) {
    let rel = start as i64 - scroll_x as i64;
    if rel >= area.width as i64 {
        return (Rect::new(area.x, area.y, 0, area.height), 0);
    }
    let clip_left = (-rel).max(0) as u32;
    let x = rel.max(0) as u16;
    let max_w = area.width - x;
    let visible_w = (size as u32).saturating_sub(clip_left).min(max_w as u32) as u16;
    (
        Rect::new(area.x + x, area.y, visible_w, area.height),
        clip_left,
    )
}

fn clipped_rect_y(area: Rect, scroll_y: u64, start: u64, size: u32) -> (Rect, u32) {
    let rel = start as i64 - scroll_y as i64;
    if rel >= area.height as i64 {
        return (Rect::new(area.x, area.y, area.width, 0), 0);
    }
    let clip_top = (-rel).max(0) as u32;
    let y = rel.max(0) as u16;
    let max_h = area.height - y;
    let visible_h = size.saturating_sub(clip_top).min(max_h as u32) as u16;
    (
        Rect::new(area.x, area.y + y, area.width, visible_h),
        clip_top,
    )
}

fn draw_separator(area: Rect, buf: &mut Buffer, scroll_x: u64, at: u32, style: Style) {
    let rel = at as i64 - scroll_x as i64;
    if rel < 0 || rel >= area.width as i64 {
        return;
    }
    let x = area.x + rel as u16;
    for dy in 0..area.height {
        if let Some(cell) = buf.cell_mut((x, area.y + dy)) {
            cell.set_symbol("│");
            cell.set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap;
    use crate::layout::ConfiguredWidths;
    use crate::sort::SortDirection;

    fn grid(rows: usize) -> Grid {
        let headers = vec!["Domain".to_string(), "Traffic".to_string()];
        let rows = (0..rows)
            .map(|i| vec![format!("site{i}.com"), (i * 10).to_string()])
            .collect();
        Grid::new(headers, rows)
    }

    fn configured() -> TableView {
        TableView::with_options(TableViewOptions {
            width_strategy: WidthStrategy::Configured(ConfiguredWidths::default()),
            ..Default::default()
        })
    }

    fn click(x: u16, y: u16) -> InputEvent {
        InputEvent::Mouse(MouseEvent::left_click(x, y))
    }

    fn draw(t: &mut TableView, w: u16, h: u16) -> Buffer {
        let area = Rect::new(0, 0, w, h);
        let mut buf = Buffer::empty(area);
        t.render(area, &mut buf, &Theme::default());
        buf
    }

    #[test]
    fn spans_include_gap() {
        let spans = spans_for(&[220, 120]);
        assert_eq!(
            spans,
            vec![
                ColumnSpan {
                    start: 0,
                    width: 28
                },
                ColumnSpan {
                    start: 29,
                    width: 15
                },
            ]
        );
    }

    #[test]
    fn clipping_handles_partial_and_offscreen_columns() {
        let area = Rect::new(2, 0, 10, 1);
        let (r, clip) = clipped_rect_x(area, 3, 0, 5);
        assert_eq!((r.x, r.width, clip), (2, 2, 3));
        let (r, _) = clipped_rect_x(area, 0, 40, 5);
        assert_eq!(r.width, 0);
        let (r, _) = clipped_rect_x(area, 0, 8, 5);
        assert_eq!((r.x, r.width), (10, 2));
    }

    #[test]
    fn header_click_toggles_sort() {
        let mut t = configured();
        t.set_grid(grid(5));
        draw(&mut t, 60, 8);

        let traffic_x = 29 + 2;
        assert_eq!(
            t.handle_event(click(traffic_x, 0)),
            TableAction::SortChanged(SortSpec::ascending(1))
        );
        match t.handle_event(click(traffic_x, 0)) {
            TableAction::SortChanged(spec) => {
                assert_eq!(spec.direction, SortDirection::Descending)
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(t.displayed_row(0).unwrap()[0], "site4.com");
        // Separator column is not a header.
        assert_eq!(t.handle_event(click(28, 0)), TableAction::None);
    }

    #[test]
    fn body_click_moves_cursor() {
        let mut t = configured();
        t.set_grid(grid(20));
        draw(&mut t, 60, 8);
        assert_eq!(t.handle_event(click(3, 3)), TableAction::Redraw);
        assert_eq!(t.cursor(), Some(2));
    }

    #[test]
    fn keys_move_cursor_and_scroll() {
        let mut t = configured();
        t.set_grid(grid(100));
        draw(&mut t, 60, 6);
        for _ in 0..10 {
            t.handle_event(InputEvent::Key(keymap::key_char('j')));
        }
        assert_eq!(t.cursor(), Some(9));
        assert!(t.scroll_offset() > 0);

        t.handle_event(InputEvent::Key(keymap::key_char('G')));
        assert_eq!(t.cursor(), Some(99));
        assert_eq!(
            t.handle_event(InputEvent::Key(KeyEvent::new(KeyCode::Enter))),
            TableAction::Activated(99)
        );
        t.handle_event(InputEvent::Key(keymap::key_char('g')));
        assert_eq!(t.scroll_offset(), 0);
    }

    #[test]
    fn digit_keys_sort_columns() {
        let mut t = TableView::new();
        t.set_grid(grid(3));
        assert_eq!(
            t.handle_event(InputEvent::Key(keymap::key_char('2'))),
            TableAction::SortChanged(SortSpec::ascending(1))
        );
        assert_eq!(
            t.handle_event(InputEvent::Key(keymap::key_char('9'))),
            TableAction::None
        );
    }

    #[test]
    fn horizontal_scroll_moves_header_with_body() {
        let mut t = configured();
        t.set_grid(grid(5));
        draw(&mut t, 20, 5);
        t.handle_event(InputEvent::Key(keymap::key_char('l')));
        assert_eq!(t.state.x, 4);
        assert_eq!(t.header_offset(), 4);
        let buf = draw(&mut t, 20, 5);
        // "Domain" shifted left by four cells, past the padding and "Dom".
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "a");
    }

    #[test]
    fn resize_switches_viewport_class() {
        let mut t = configured();
        t.set_grid(grid(5));
        t.handle_event(InputEvent::Resize(60, 20));
        assert_eq!(t.viewport_class(), ViewportClass::Compact);
        assert_eq!(t.column_spans()[0].width, 20);
        t.handle_event(InputEvent::Resize(120, 20));
        assert_eq!(t.viewport_class(), ViewportClass::Regular);
        assert_eq!(t.column_spans()[0].width, 28);
    }

    #[test]
    fn sort_survives_new_grid_when_column_exists() {
        let mut t = TableView::new();
        t.set_grid(grid(3));
        t.toggle_sort(1);
        t.toggle_sort(1);
        t.set_grid(grid(4));
        assert_eq!(t.row_order(), &[3, 2, 1, 0]);

        t.set_grid(Grid::new(vec!["Only".to_string()], Vec::new()));
        assert_eq!(t.sort(), None);
    }
}
