//! Substring search over a key column.
//!
//! Filtering is pure and produces indices into the source rows, so the working projection
//! never copies cell data.

use log::trace;

/// Column searched when no other key column is configured.
pub const DEFAULT_KEY_COLUMN: usize = 0;

/// Case-insensitive substring test against one cell.
///
/// `needle_lower` must already be lower-cased.
pub fn cell_matches(cell: &str, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    cell.to_lowercase().contains(needle_lower)
}

/// Returns the indices of rows whose key-column cell contains `query`.
///
/// A blank or whitespace-only query matches every row, in source order. Otherwise the query
/// is matched as typed, spaces included, case-insensitively and stable with respect to the
/// input order.
pub fn filter_rows(rows: &[Vec<String>], query: &str, key_column: usize) -> Vec<usize> {
    if query.trim().is_empty() {
        return (0..rows.len()).collect();
    }
    let needle = query.to_lowercase();
    let out: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            row.get(key_column)
                .is_some_and(|cell| cell_matches(cell, &needle))
        })
        .map(|(i, _)| i)
        .collect();
    trace!("filter {:?}: {} of {} rows", needle, out.len(), rows.len());
    out
}
