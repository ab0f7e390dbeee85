//! Column widths and viewport classification.
//!
//! Widths are computed in pixels, the unit the sizing rules are written in, and converted to
//! terminal cells at [`CELL_PX`] pixels per cell only when rendering.

use std::collections::HashMap;
use unicode_width::UnicodeWidthStr;

/// Pixels represented by one terminal cell.
pub const CELL_PX: u32 = 8;

/// Viewports narrower than this are compact.
pub const COMPACT_BREAKPOINT_PX: u32 = 640;

pub const CONTENT_CHAR_PX: u32 = 8;
pub const CONTENT_PADDING_PX: u32 = 32;
pub const CONTENT_MIN_PX: u32 = 100;
pub const CONTENT_MAX_PX: u32 = 300;

pub const DEFAULT_COLUMN_PX: u32 = 150;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    Compact,
    #[default]
    Regular,
}

impl ViewportClass {
    pub fn from_width_px(width_px: u32, breakpoint_px: u32) -> Self {
        if width_px < breakpoint_px {
            ViewportClass::Compact
        } else {
            ViewportClass::Regular
        }
    }

    pub fn from_cells(width_cells: u16, breakpoint_px: u32) -> Self {
        Self::from_width_px(width_cells as u32 * CELL_PX, breakpoint_px)
    }
}

pub fn px_to_cells(px: u32) -> u16 {
    px.div_ceil(CELL_PX).min(u16::MAX as u32) as u16
}

/// Static width for one column name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnWidth {
    pub regular: u32,
    pub compact: Option<u32>,
}

impl ColumnWidth {
    pub fn fixed(px: u32) -> Self {
        Self {
            regular: px,
            compact: None,
        }
    }

    pub fn for_class(&self, class: ViewportClass) -> u32 {
        match class {
            ViewportClass::Regular => self.regular,
            ViewportClass::Compact => self.compact.unwrap_or(self.regular),
        }
    }
}

/// Per-name minimum widths with a fallback for unknown columns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfiguredWidths {
    pub by_name: HashMap<String, ColumnWidth>,
    pub default_width: ColumnWidth,
}

impl Default for ConfiguredWidths {
    fn default() -> Self {
        let by_name = [
            ("Domain", 220, Some(160)),
            ("Traffic", 120, Some(100)),
            ("DR", 80, Some(64)),
            ("DA", 80, Some(64)),
            ("Price", 100, Some(80)),
            ("Spam Score", 120, Some(96)),
        ]
        .into_iter()
        .map(|(name, regular, compact)| (name.to_string(), ColumnWidth { regular, compact }))
        .collect();
        Self {
            by_name,
            default_width: ColumnWidth {
                regular: DEFAULT_COLUMN_PX,
                compact: Some(120),
            },
        }
    }
}

impl ConfiguredWidths {
    /// Exact name match first, then ASCII case-insensitive.
    pub fn width_for(&self, name: &str, class: ViewportClass) -> u32 {
        self.by_name
            .get(name)
            .or_else(|| {
                self.by_name
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(_, w)| w)
            })
            .unwrap_or(&self.default_width)
            .for_class(class)
    }
}

/// How column widths are derived. One strategy is chosen per deployment.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WidthStrategy {
    Configured(ConfiguredWidths),
    #[default]
    ContentDerived,
}

/// `clamp(max(header, longest cell) * 8 + 32, 100, 300)`.
pub fn content_width(header: &str, rows: &[Vec<String>], col: usize) -> u32 {
    let longest = rows
        .iter()
        .filter_map(|r| r.get(col))
        .map(|c| c.width())
        .max()
        .unwrap_or(0)
        .max(header.width()) as u32;
    (longest.saturating_mul(CONTENT_CHAR_PX) + CONTENT_PADDING_PX)
        .clamp(CONTENT_MIN_PX, CONTENT_MAX_PX)
}

pub fn column_widths(
    headers: &[String],
    rows: &[Vec<String>],
    class: ViewportClass,
    strategy: &WidthStrategy,
) -> Vec<u32> {
    match strategy {
        WidthStrategy::Configured(widths) => headers
            .iter()
            .map(|h| widths.width_for(h, class))
            .collect(),
        WidthStrategy::ContentDerived => headers
            .iter()
            .enumerate()
            .map(|(i, h)| content_width(h, rows, i))
            .collect(),
    }
}

/// Memoized [`column_widths`], recomputed only when the grid generation or viewport class
/// changes.
#[derive(Clone, Debug, Default)]
pub struct LayoutCache {
    key: Option<(u64, ViewportClass)>,
    widths: Vec<u32>,
}

impl LayoutCache {
    pub fn widths(
        &mut self,
        generation: u64,
        class: ViewportClass,
        headers: &[String],
        rows: &[Vec<String>],
        strategy: &WidthStrategy,
    ) -> &[u32] {
        if self.key != Some((generation, class)) {
            self.widths = column_widths(headers, rows, class, strategy);
            self.key = Some((generation, class));
        }
        &self.widths
    }

    pub fn invalidate(&mut self) {
        self.key = None;
    }
}
