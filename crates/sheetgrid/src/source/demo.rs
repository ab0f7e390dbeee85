//! Synthetic site inventory, for running without credentials.

use super::GridSource;
use crate::error::FetchError;
use sheetgrid_core::grid::Grid;
use std::thread;
use std::time::Duration;

pub const HEADERS: [&str; 7] = [
    "Domain",
    "Traffic",
    "DR",
    "DA",
    "Price",
    "Spam Score",
    "Category",
];

const TLDS: [&str; 5] = ["com", "net", "io", "org", "co.uk"];
const CATEGORIES: [&str; 6] = ["Tech", "Finance", "Health", "Travel", "Food", "Sports"];
const WORDS: [&str; 8] = [
    "alpha", "blue", "cedar", "delta", "ember", "fjord", "granite", "harbor",
];

/// Deterministic rows with the blanks and junk real sheets have: sentinel values, empty
/// cells, and numbers with currency signs and thousands separators.
pub struct DemoSource {
    rows: usize,
    latency: Duration,
}

impl DemoSource {
    pub fn new(rows: usize, latency: Duration) -> Self {
        Self { rows, latency }
    }

    pub fn values(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows + 1);
        out.push(HEADERS.iter().map(|h| h.to_string()).collect());
        out.extend((0..self.rows).map(row));
        out
    }
}

impl GridSource for DemoSource {
    fn fetch(&self) -> Result<Grid, FetchError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        Ok(Grid::from_values(self.values()))
    }

    fn describe(&self) -> String {
        format!("demo ({} rows)", self.rows)
    }
}

fn mix(i: usize, salt: u64) -> u64 {
    // splitmix64 finalizer
    let mut z = (i as u64).wrapping_add(salt).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn row(i: usize) -> Vec<String> {
    let word = WORDS[(mix(i, 1) % WORDS.len() as u64) as usize];
    let tld = TLDS[(mix(i, 2) % TLDS.len() as u64) as usize];
    let domain = format!("{word}{i}.{tld}");

    let traffic = match i % 17 {
        3 => "-".to_string(),
        11 => "Not Provided".to_string(),
        _ => with_thousands(mix(i, 3) % 2_000_000),
    };
    let dr = (mix(i, 4) % 101).to_string();
    let da = if i % 29 == 7 {
        "n/a".to_string()
    } else {
        (mix(i, 5) % 101).to_string()
    };
    let price = match i % 23 {
        5 => String::new(),
        13 => "null".to_string(),
        _ => format!("${}", 20 + mix(i, 6) % 980),
    };
    let spam = format!("{}%", mix(i, 7) % 30);
    let category = CATEGORIES[(mix(i, 8) % CATEGORIES.len() as u64) as usize].to_string();

    vec![domain, traffic, dr, da, price, spam, category]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetgrid_core::classify;

    #[test]
    fn produces_requested_rows_with_header() {
        let grid = DemoSource::new(100, Duration::ZERO).fetch().unwrap();
        assert_eq!(grid.headers(), HEADERS);
        assert_eq!(grid.row_count(), 100);
        assert_eq!(grid.cell(3, 1), "-");
    }

    #[test]
    fn is_deterministic() {
        let a = DemoSource::new(50, Duration::ZERO).values();
        let b = DemoSource::new(50, Duration::ZERO).values();
        assert_eq!(a, b);
    }

    #[test]
    fn includes_missing_and_malformed_cells() {
        let values = DemoSource::new(60, Duration::ZERO).values();
        let rows = &values[1..];
        assert!(rows.iter().any(|r| classify::is_empty(&r[4])));
        assert!(rows
            .iter()
            .any(|r| classify::parse_numeric(&r[3]).is_nan() && !classify::is_empty(&r[3])));
        assert!(rows.iter().any(|r| r[1].contains(',')));
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(with_thousands(0), "0");
        assert_eq!(with_thousands(999), "999");
        assert_eq!(with_thousands(1_234_567), "1,234,567");
    }
}
