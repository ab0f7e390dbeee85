use crate::classify;
use crate::classify::ColumnKind;
use log::trace;
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// The single active sort column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(column: usize) -> Self {
        Self {
            column,
            direction: SortDirection::Ascending,
        }
    }
}

/// Next sort spec after the user activates `column`.
///
/// The active column flips direction; any other column starts ascending. There is no way
/// back to "unsorted" through this toggle.
pub fn toggle_sort(current: Option<SortSpec>, column: usize) -> SortSpec {
    match current {
        Some(spec) if spec.column == column => SortSpec {
            column,
            direction: spec.direction.reversed(),
        },
        _ => SortSpec::ascending(column),
    }
}

/// Header suffix for `column` under `spec`.
pub fn sort_indicator(spec: Option<SortSpec>, column: usize) -> Option<&'static str> {
    let spec = spec?;
    if spec.column != column {
        return None;
    }
    Some(match spec.direction {
        SortDirection::Ascending => "▲",
        SortDirection::Descending => "▼",
    })
}

/// Total order over two cells of one column.
///
/// Missing values (empty cells, and numeric cells that fail to parse) always sort after
/// real values no matter the direction, and compare equal to each other so a stable sort
/// keeps them in source order. Text compares case-insensitively with digit runs ordered
/// by value.
pub fn compare_cells(a: &str, b: &str, kind: ColumnKind, direction: SortDirection) -> Ordering {
    match (classify::is_empty(a), classify::is_empty(b)) {
        (true, true) => return Ordering::Equal,
        (true, false) if kind == ColumnKind::Text || !is_unparseable(b) => {
            return Ordering::Greater;
        }
        (false, true) if kind == ColumnKind::Text || !is_unparseable(a) => {
            return Ordering::Less;
        }
        (true, false) | (false, true) => return Ordering::Equal,
        (false, false) => {}
    }

    match kind {
        ColumnKind::Numeric => {
            let x = classify::parse_numeric(a);
            let y = classify::parse_numeric(b);
            match (x.is_nan(), y.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => direction.apply(x.total_cmp(&y)),
            }
        }
        ColumnKind::Text => direction.apply(compare_text(a, b)),
    }
}

fn is_unparseable(cell: &str) -> bool {
    classify::parse_numeric(cell).is_nan()
}

fn compare_text(a: &str, b: &str) -> Ordering {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    numeric_sort::cmp(&a, &b)
}

/// Returns `order` stably sorted by `column`.
///
/// `order` holds indices into `rows`; the result is a new vector so the caller keeps the
/// unsorted projection if it needs it.
pub fn sort_rows(
    rows: &[Vec<String>],
    order: &[usize],
    column: usize,
    kind: ColumnKind,
    direction: SortDirection,
) -> Vec<usize> {
    let mut out = order.to_vec();
    out.sort_by(|&i, &j| {
        compare_cells(
            cell(rows, i, column),
            cell(rows, j, column),
            kind,
            direction,
        )
    });
    trace!(
        "sorted {} rows by column {column} ({kind:?}, {direction:?})",
        out.len()
    );
    out
}

fn cell(rows: &[Vec<String>], row: usize, col: usize) -> &str {
    rows.get(row)
        .and_then(|r| r.get(col))
        .map(String::as_str)
        .unwrap_or("")
}
