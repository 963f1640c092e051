//! Delimited-text loading with per-column type inference.
//!
//! [`TableLoader`] turns a resource (file path or, with the `remote`
//! feature, an HTTP(S) URL) into a polars `DataFrame` whose columns are
//! either numeric (`Float64`, nulls mark missing cells) or text
//! (`String`). The numeric/text decision is made once here, by looking
//! at every cell of a column; later stages read the column dtype instead
//! of re-inferring.
//!
//! The parse is deliberately row-precise: a data row whose field count
//! differs from the header's fails with
//! [`WranglerError::MalformedRow`] naming that row, which the bulk CSV
//! readers cannot report.

use std::collections::HashSet;

use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, WranglerError};
use crate::utils::parse_cell;

/// Loader for delimiter-separated tabular data.
#[derive(Debug, Clone)]
pub struct TableLoader {
    delimiter: u8,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TableLoader {
    /// Create a loader with the default comma delimiter.
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Use a different field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load a table from a file path or URL.
    ///
    /// Sources starting with `http://` or `https://` are fetched over
    /// the network (requires the `remote` feature, enabled by default);
    /// anything else is read from the filesystem. A resource that cannot
    /// be fetched or read fails with
    /// [`WranglerError::SourceUnavailable`].
    pub fn load(&self, source: &str) -> Result<DataFrame> {
        let raw = self.fetch(source)?;
        let df = self.parse_str(&raw)?;
        info!(
            "loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            source
        );
        Ok(df)
    }

    /// Parse already-fetched delimited text into a table.
    ///
    /// The first record is the header; its names are used verbatim.
    /// Empty cells become nulls. A column is numeric iff every non-empty
    /// cell parses as a number, otherwise it is kept as text.
    pub fn parse_str(&self, raw: &str) -> Result<DataFrame> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(raw.as_bytes());

        let header = reader
            .headers()
            .map_err(|e| WranglerError::MalformedRow {
                row: 0,
                reason: e.to_string(),
            })?
            .clone();
        if header.is_empty() || (header.len() == 1 && header[0].trim().is_empty()) {
            return Err(WranglerError::EmptyInput);
        }

        let mut seen = HashSet::new();
        for name in header.iter() {
            if !seen.insert(name) {
                return Err(WranglerError::DuplicateColumn(name.to_string()));
            }
        }

        let width = header.len();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
        for (idx, record) in reader.records().enumerate() {
            let row = idx + 1;
            let record = record.map_err(|e| WranglerError::MalformedRow {
                row,
                reason: e.to_string(),
            })?;
            if record.len() != width {
                return Err(WranglerError::MalformedRow {
                    row,
                    reason: format!("expected {} fields, found {}", width, record.len()),
                });
            }
            for (col, field) in record.iter().enumerate() {
                let value = if field.trim().is_empty() {
                    None
                } else {
                    Some(field.to_string())
                };
                cells[col].push(value);
            }
        }

        let mut columns = Vec::with_capacity(width);
        for (name, col) in header.iter().zip(cells) {
            if is_numeric_column(&col) {
                let values: Vec<Option<f64>> = col
                    .iter()
                    .map(|cell| cell.as_deref().and_then(parse_cell))
                    .collect();
                debug!("column '{}' inferred numeric", name);
                columns.push(Column::new(name.into(), values));
            } else {
                debug!("column '{}' inferred text", name);
                columns.push(Column::new(name.into(), col));
            }
        }

        Ok(DataFrame::new(columns)?)
    }

    fn fetch(&self, source: &str) -> Result<String> {
        if source.starts_with("http://") || source.starts_with("https://") {
            return fetch_url(source);
        }
        std::fs::read_to_string(source).map_err(|e| WranglerError::SourceUnavailable {
            resource: source.to_string(),
            reason: e.to_string(),
        })
    }
}

/// A column is numeric when every non-empty cell parses as a number.
/// Vacuously numeric when the column has no present cells at all.
fn is_numeric_column(cells: &[Option<String>]) -> bool {
    cells
        .iter()
        .flatten()
        .all(|cell| parse_cell(cell).is_some())
}

#[cfg(feature = "remote")]
fn fetch_url(url: &str) -> Result<String> {
    let unavailable = |reason: String| WranglerError::SourceUnavailable {
        resource: url.to_string(),
        reason,
    };
    reqwest::blocking::get(url)
        .and_then(|resp| resp.error_for_status())
        .and_then(|resp| resp.text())
        .map_err(|e| unavailable(e.to_string()))
}

#[cfg(not(feature = "remote"))]
fn fetch_url(url: &str) -> Result<String> {
    Err(WranglerError::SourceUnavailable {
        resource: url.to_string(),
        reason: "built without the 'remote' feature; URL sources are unavailable".to_string(),
    })
}
