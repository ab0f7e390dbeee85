use log::debug;

/// An immutable header row plus data rows of string cells.
///
/// Rows are normalized to the header's arity when the grid is built: short rows are padded
/// with empty cells and extra trailing cells are dropped, so every row can be indexed by any
/// column of the header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grid {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let arity = headers.len();
        let mut padded = 0usize;
        let mut truncated = 0usize;
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < arity {
                    padded += 1;
                    row.resize(arity, String::new());
                } else if row.len() > arity {
                    truncated += 1;
                    row.truncate(arity);
                }
                row
            })
            .collect::<Vec<_>>();
        if padded > 0 || truncated > 0 {
            debug!("grid normalized: {padded} rows padded, {truncated} rows truncated");
        }
        Self { headers, rows }
    }

    /// Builds a grid from raw values where the first row is the header.
    pub fn from_values(values: Vec<Vec<String>>) -> Self {
        let mut it = values.into_iter();
        match it.next() {
            Some(headers) => Self::new(headers, it.collect()),
            None => Self::default(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// `true` when there is no header row at all.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}
