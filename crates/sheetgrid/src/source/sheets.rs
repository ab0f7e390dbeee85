//! Spreadsheet values API, read in fixed-size row chunks.

use super::GridSource;
use crate::config::SourceConfig;
use crate::error::FetchError;
use log::debug;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;
use sheetgrid_core::grid::Grid;
use std::time::Duration;
use url::Url;

/// Body of a `values.get` response. `values` is absent for an empty range.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct SheetsSource {
    client: Client,
    base_url: Url,
    spreadsheet_id: String,
    sheet: String,
    last_column: String,
    chunk_rows: usize,
    api_key: String,
}

impl SheetsSource {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        if config.api_key.trim().is_empty() {
            return Err(FetchError::MissingApiKey);
        }
        if config.spreadsheet_id.trim().is_empty() {
            return Err(FetchError::MissingSpreadsheet);
        }
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        Ok(Self {
            client,
            base_url,
            spreadsheet_id: config.spreadsheet_id.trim().to_string(),
            sheet: config.sheet.clone(),
            last_column: config.last_column.trim().to_uppercase(),
            chunk_rows: config.chunk_rows.max(1),
            api_key: config.api_key.trim().to_string(),
        })
    }

    /// A1 range covering rows `start..start + chunk_rows` (1-based, inclusive).
    pub fn chunk_range(&self, start: usize) -> String {
        let end = start + self.chunk_rows - 1;
        format!("{}!A{start}:{}{end}", self.sheet, self.last_column)
    }

    pub fn chunk_url(&self, start: usize) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "v4",
                "spreadsheets",
                self.spreadsheet_id.as_str(),
                "values",
                self.chunk_range(start).as_str(),
            ]);
        }
        url.query_pairs_mut().append_pair("key", &self.api_key);
        url
    }

    fn fetch_chunk(&self, start: usize) -> Result<Vec<Vec<String>>, FetchError> {
        let url = self.chunk_url(start);
        debug!("GET rows {start}.. of {}", self.sheet);
        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            let message = error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            return Err(FetchError::status(status.as_u16(), message));
        }
        parse_chunk(&body)
    }
}

impl GridSource for SheetsSource {
    fn fetch(&self) -> Result<Grid, FetchError> {
        let values = read_chunks(self.chunk_rows, |start| self.fetch_chunk(start))?;
        if values.is_empty() {
            return Err(FetchError::EmptySheet(self.sheet.clone()));
        }
        Ok(Grid::from_values(values))
    }

    fn describe(&self) -> String {
        format!("sheet {}", self.sheet)
    }
}

/// Pages through `fetch_chunk(start)` (1-based start row) until a chunk comes back empty.
///
/// The API omits trailing blank rows of a range, so a short chunk does not mean the end of
/// the sheet; its missing rows are restored as blank rows once a later chunk has data.
fn read_chunks<F>(chunk_rows: usize, mut fetch_chunk: F) -> Result<Vec<Vec<String>>, FetchError>
where
    F: FnMut(usize) -> Result<Vec<Vec<String>>, FetchError>,
{
    let mut values: Vec<Vec<String>> = Vec::new();
    let mut start = 1;
    loop {
        let chunk = fetch_chunk(start)?;
        if chunk.is_empty() {
            break;
        }
        values.resize(start - 1, Vec::new());
        values.extend(chunk);
        start += chunk_rows;
    }
    Ok(values)
}

/// Parses one response body into rows of display strings.
fn parse_chunk(body: &str) -> Result<Vec<Vec<String>>, FetchError> {
    let range: ValueRange = serde_json::from_str(body)?;
    Ok(range
        .values
        .into_iter()
        .map(|row| row.into_iter().map(cell_text).collect())
        .collect())
}

fn cell_text(v: Value) -> String {
    match v {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|e| e.error.message)
}
