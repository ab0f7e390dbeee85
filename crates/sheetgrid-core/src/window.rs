//! Visible-row windowing for the table body.
//!
//! [`RowWindow`] wraps a `virtualizer::Virtualizer` with a fixed estimated row height per
//! viewport class. Per scroll it touches only the rows near the viewport; the full row
//! count only matters when it changes.

use crate::layout::ViewportClass;
use virtualizer::Align;
use virtualizer::VirtualItem;
use virtualizer::Virtualizer;
use virtualizer::VirtualizerOptions;

pub const DEFAULT_OVERSCAN: usize = 5;

#[derive(Clone, Debug)]
pub struct RowWindowOptions {
    /// Rows materialized beyond each edge of the viewport.
    pub overscan: usize,
    pub row_height_regular: u32,
    pub row_height_compact: u32,
}

impl Default for RowWindowOptions {
    fn default() -> Self {
        Self {
            overscan: DEFAULT_OVERSCAN,
            row_height_regular: 1,
            row_height_compact: 1,
        }
    }
}

impl RowWindowOptions {
    pub fn row_height(&self, class: ViewportClass) -> u32 {
        let h = match class {
            ViewportClass::Regular => self.row_height_regular,
            ViewportClass::Compact => self.row_height_compact,
        };
        h.max(1)
    }
}

/// One materialized row: its index in the working row array and its offset from the top of
/// the scrollable content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSlot {
    pub index: usize,
    pub offset: u64,
    pub size: u32,
}

/// The contiguous run of rows to render for the current scroll offset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleWindow {
    pub start: usize,
    /// Exclusive.
    pub end: usize,
    pub slots: Vec<RowSlot>,
    pub total_height: u64,
}

impl VisibleWindow {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

pub struct RowWindow {
    options: RowWindowOptions,
    class: ViewportClass,
    count: usize,
    viewport_h: u32,
    v: Virtualizer,
    items: Vec<VirtualItem>,
}

impl Default for RowWindow {
    fn default() -> Self {
        Self::new(RowWindowOptions::default())
    }
}

impl RowWindow {
    pub fn new(options: RowWindowOptions) -> Self {
        let class = ViewportClass::default();
        let v = make_virtualizer(0, options.row_height(class), options.overscan);
        Self {
            options,
            class,
            count: 0,
            viewport_h: 0,
            v,
            items: Vec::new(),
        }
    }

    pub fn options(&self) -> &RowWindowOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RowWindowOptions) {
        self.options = options;
        self.rebuild();
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn row_height(&self) -> u32 {
        self.options.row_height(self.class)
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_h
    }

    pub fn set_count(&mut self, count: usize) {
        if count == self.count {
            return;
        }
        self.count = count;
        self.v.set_count(count);
        self.clamp_scroll();
    }

    /// Switches the estimated row height to the one configured for `class`.
    pub fn set_viewport_class(&mut self, class: ViewportClass) {
        if class == self.class {
            return;
        }
        let before = self.row_height();
        self.class = class;
        if self.row_height() != before {
            self.rebuild();
        }
    }

    pub fn set_viewport_height(&mut self, h: u32) {
        if h == self.viewport_h {
            return;
        }
        self.viewport_h = h;
        self.v.set_viewport_size(h);
        self.clamp_scroll();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.v.scroll_offset()
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        self.v.set_scroll_offset(offset.min(self.max_scroll()));
    }

    pub fn scroll_by(&mut self, delta: i64) {
        let next = (self.scroll_offset() as i64).saturating_add(delta).max(0) as u64;
        self.set_scroll_offset(next);
    }

    /// `count * row_height`: the height the scroll container must report.
    pub fn total_height(&self) -> u64 {
        self.count as u64 * self.row_height() as u64
    }

    pub fn max_scroll(&self) -> u64 {
        self.total_height().saturating_sub(self.viewport_h as u64)
    }

    /// Rows fully or partially inside the viewport, without overscan.
    pub fn visible_count(&self) -> usize {
        let h = self.row_height();
        (self.viewport_h.div_ceil(h) as usize + 1).min(self.count)
    }

    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        self.v.index_at_offset(offset)
    }

    /// Scrolls the minimum distance needed to bring `index` fully into view.
    pub fn scroll_to_index(&mut self, index: usize) {
        if self.count == 0 {
            return;
        }
        self.v.scroll_to_index(index.min(self.count - 1), Align::Auto);
        self.clamp_scroll();
    }

    pub fn window(&mut self) -> VisibleWindow {
        let total_height = self.total_height();
        if self.count == 0 || self.viewport_h == 0 {
            return VisibleWindow {
                total_height,
                ..VisibleWindow::default()
            };
        }
        self.v.collect_virtual_items(&mut self.items);
        let slots: Vec<RowSlot> = self
            .items
            .iter()
            .map(|it| RowSlot {
                index: it.index,
                offset: it.start,
                size: it.size,
            })
            .collect();
        let start = slots.first().map(|s| s.index).unwrap_or(0);
        let end = slots.last().map(|s| s.index + 1).unwrap_or(start);
        VisibleWindow {
            start,
            end,
            slots,
            total_height,
        }
    }

    fn clamp_scroll(&mut self) {
        let max = self.max_scroll();
        if self.v.scroll_offset() > max {
            self.v.set_scroll_offset(max);
        }
    }

    fn rebuild(&mut self) {
        let offset = self.v.scroll_offset();
        self.v = make_virtualizer(self.count, self.row_height(), self.options.overscan);
        self.v.set_viewport_size(self.viewport_h);
        self.v.set_scroll_offset(offset.min(self.max_scroll()));
    }
}

fn make_virtualizer(count: usize, row_height: u32, overscan: usize) -> Virtualizer {
    let mut opts = VirtualizerOptions::new(count, move |_| row_height);
    opts.overscan = overscan;
    Virtualizer::new(opts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_for(count: usize, viewport: u32, row_height: u32, offset: u64) -> VisibleWindow {
        let mut w = RowWindow::new(RowWindowOptions {
            overscan: 5,
            row_height_regular: row_height,
            row_height_compact: row_height,
        });
        w.set_count(count);
        w.set_viewport_height(viewport);
        w.set_scroll_offset(offset);
        w.window()
    }

    fn assert_contiguous(win: &VisibleWindow) {
        for pair in win.slots.windows(2) {
            assert_eq!(pair[0].index + 1, pair[1].index);
        }
        assert_eq!(win.end - win.start, win.slots.len());
    }

    #[test]
    fn first_window_starts_at_top() {
        let win = window_for(1_000, 480, 48, 0);
        assert_eq!(win.start, 0);
        assert!(win.end >= 10);
        assert_eq!(win.total_height, 48_000);
        assert_contiguous(&win);
    }

    #[test]
    fn window_covers_viewport_with_offsets() {
        let win = window_for(1_000, 350, 35, 3_500);
        assert_contiguous(&win);
        assert!(win.start <= 100);
        assert!(win.end >= 110);
        for slot in &win.slots {
            assert_eq!(slot.offset, slot.index as u64 * 35);
            assert_eq!(slot.size, 35);
        }
    }

    #[test]
    fn window_size_is_independent_of_total_rows() {
        let viewport = 480u32;
        let h = 48u32;
        let overscan = 5usize;
        let bound = viewport.div_ceil(h) as usize + 1 + 2 * overscan;

        let small = window_for(10, viewport, h, 0);
        assert!(small.len() <= 10);

        let mid_a = window_for(1_000, viewport, h, 24_000 + 17);
        let mid_b = window_for(100_000, viewport, h, 24_000 + 17);
        assert_contiguous(&mid_a);
        assert_contiguous(&mid_b);
        assert_eq!(mid_a.len(), mid_b.len());
        assert!(mid_b.len() <= bound);

        let deep = window_for(100_000, viewport, h, 4_000_000);
        assert_contiguous(&deep);
        assert!(deep.len() <= bound);
    }

    #[test]
    fn empty_window_for_no_rows() {
        let win = window_for(0, 480, 48, 0);
        assert!(win.is_empty());
        assert_eq!(win.total_height, 0);
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut w = RowWindow::default();
        w.set_count(10);
        w.set_viewport_height(4);
        w.set_scroll_offset(1_000);
        assert_eq!(w.scroll_offset(), 6);
        w.set_count(3);
        assert_eq!(w.scroll_offset(), 0);
    }

    #[test]
    fn row_height_follows_viewport_class() {
        let mut w = RowWindow::new(RowWindowOptions {
            overscan: 2,
            row_height_regular: 48,
            row_height_compact: 35,
        });
        w.set_count(100);
        assert_eq!(w.total_height(), 4_800);
        w.set_viewport_class(ViewportClass::Compact);
        assert_eq!(w.row_height(), 35);
        assert_eq!(w.total_height(), 3_500);
    }

    #[test]
    fn scroll_to_index_brings_row_into_view() {
        let mut w = RowWindow::default();
        w.set_count(100);
        w.set_viewport_height(5);
        w.scroll_to_index(20);
        let top = w.scroll_offset();
        assert!(top <= 20 && top + 5 > 20);
        w.scroll_to_index(0);
        assert_eq!(w.scroll_offset(), 0);
    }
}
