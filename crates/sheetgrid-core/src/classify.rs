//! Cell classification shared by display formatting and row comparison.

use std::borrow::Cow;
use std::collections::HashSet;

/// Literal cell values that are treated the same as an empty cell.
pub const EMPTY_SENTINELS: [&str; 4] = ["undefined", "null", "Not Provided", "-"];

/// Column names that hold numbers unless configuration says otherwise.
pub const NUMERIC_COLUMNS: [&str; 5] = ["Traffic", "DR", "DA", "Price", "Spam Score"];

/// Placeholder rendered for empty or unparseable cells.
pub const MISSING: &str = "-";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Numeric,
    #[default]
    Text,
}

/// Returns `true` for blank cells and for the literal [`EMPTY_SENTINELS`].
pub fn is_empty(cell: &str) -> bool {
    cell.trim().is_empty() || EMPTY_SENTINELS.contains(&cell)
}

/// Parses a loosely formatted number such as `"$1,234.50"` or `"12%"`.
///
/// Every character other than ASCII digits, `.` and `-` is dropped first; the longest
/// leading `-?digits[.digits]` of what remains is then parsed. Input without any digit
/// yields `NaN`, which callers treat as a missing value.
pub fn parse_numeric(cell: &str) -> f64 {
    let kept: String = cell
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let bytes = kept.as_bytes();
    let mut end = 0usize;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start {
            end = frac_end;
        }
    }
    if digits == 0 {
        return f64::NAN;
    }
    kept[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Static lookup against [`NUMERIC_COLUMNS`].
pub fn column_kind(name: &str) -> ColumnKind {
    let name = name.trim();
    if NUMERIC_COLUMNS.iter().any(|n| n.eq_ignore_ascii_case(name)) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

/// Display form of a cell: `-` for empty cells and for numeric cells that fail to parse.
pub fn display_cell(cell: &str, kind: ColumnKind) -> Cow<'_, str> {
    if is_empty(cell) {
        return Cow::Borrowed(MISSING);
    }
    if kind == ColumnKind::Numeric && parse_numeric(cell).is_nan() {
        return Cow::Borrowed(MISSING);
    }
    Cow::Borrowed(cell)
}

/// Column kind mapping, seeded from [`NUMERIC_COLUMNS`] and extendable by configuration.
#[derive(Clone, Debug)]
pub struct ColumnKinds {
    numeric: HashSet<String>,
}

impl Default for ColumnKinds {
    fn default() -> Self {
        Self::with_numeric(NUMERIC_COLUMNS)
    }
}

impl ColumnKinds {
    pub fn with_numeric<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            numeric: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    pub fn add_numeric(&mut self, name: &str) {
        self.numeric.insert(name.trim().to_lowercase());
    }

    pub fn kind_of(&self, name: &str) -> ColumnKind {
        if self.numeric.contains(&name.trim().to_lowercase()) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Text
        }
    }

    pub fn kinds_for(&self, headers: &[String]) -> Vec<ColumnKind> {
        headers.iter().map(|h| self.kind_of(h)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_and_sentinels() {
        for cell in ["", "   ", "\t\n", "undefined", "null", "Not Provided", "-"] {
            assert!(is_empty(cell), "{cell:?} should be empty");
        }
        for cell in ["0", "a", "Null", " - x", "none", "--"] {
            assert!(!is_empty(cell), "{cell:?} should not be empty");
        }
    }

    #[test]
    fn parses_currency_and_separators() {
        assert_eq!(parse_numeric("$1,234.50"), 1234.5);
        assert_eq!(parse_numeric("12%"), 12.0);
        assert_eq!(parse_numeric("-3.25"), -3.25);
        assert_eq!(parse_numeric("7."), 7.0);
        assert_eq!(parse_numeric(".5"), 0.5);
    }

    #[test]
    fn malformed_numbers_are_nan() {
        assert!(parse_numeric("abc").is_nan());
        assert!(parse_numeric("").is_nan());
        assert!(parse_numeric("-").is_nan());
        assert!(parse_numeric(".").is_nan());
        assert!(parse_numeric("N/A").is_nan());
    }

    #[test]
    fn parses_leading_number_only() {
        assert_eq!(parse_numeric("1.2.3"), 1.2);
        assert_eq!(parse_numeric("10-20"), 10.0);
    }

    #[test]
    fn static_column_kinds() {
        assert_eq!(column_kind("Traffic"), ColumnKind::Numeric);
        assert_eq!(column_kind("Spam Score"), ColumnKind::Numeric);
        assert_eq!(column_kind("Domain"), ColumnKind::Text);
        assert_eq!(column_kind(""), ColumnKind::Text);
    }

    #[test]
    fn configured_kinds_extend_defaults() {
        let mut kinds = ColumnKinds::default();
        assert_eq!(kinds.kind_of("Backlinks"), ColumnKind::Text);
        kinds.add_numeric("Backlinks");
        assert_eq!(kinds.kind_of(" backlinks "), ColumnKind::Numeric);
        assert_eq!(kinds.kind_of("price"), ColumnKind::Numeric);
    }

    #[test]
    fn display_normalizes_missing_values() {
        assert_eq!(display_cell("", ColumnKind::Text), "-");
        assert_eq!(display_cell("null", ColumnKind::Text), "-");
        assert_eq!(display_cell("abc", ColumnKind::Numeric), "-");
        assert_eq!(display_cell("abc", ColumnKind::Text), "abc");
        assert_eq!(display_cell("$10", ColumnKind::Numeric), "$10");
    }
}
