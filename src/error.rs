//! Error types for the table-wrangling library.
//!
//! A single `thiserror` hierarchy covers loading, statistics, and
//! imputation. Errors serialize as `{code, message}` so downstream
//! consumers (plotting surfaces, submission tooling) can branch on a
//! stable code instead of parsing display strings.
//!
//! All operations fail atomically: an error means no partial table was
//! produced. Retries are the caller's business, never performed here.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for loading and transforming tables.
#[derive(Error, Debug)]
pub enum WranglerError {
    /// The resource behind a path or URL could not be fetched or read.
    #[error("source unavailable '{resource}': {reason}")]
    SourceUnavailable { resource: String, reason: String },

    /// A row could not be parsed into the header's shape.
    ///
    /// `row` is the 1-based data row index; the header row is row 0.
    #[error("malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    /// The input had no header row at all.
    #[error("input has no header row")]
    EmptyInput,

    /// Two header fields carry the same name.
    #[error("duplicate column name '{0}' in header")]
    DuplicateColumn(String),

    /// Column was not found in the table.
    #[error("column '{0}' not found in table")]
    ColumnNotFound(String),

    /// A numeric operation was requested on a text column.
    #[error("column '{0}' is not numeric")]
    NotNumeric(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

impl WranglerError {
    /// Stable code for programmatic error handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
            Self::MalformedRow { .. } => "MALFORMED_ROW",
            Self::EmptyInput => "EMPTY_INPUT",
            Self::DuplicateColumn(_) => "DUPLICATE_COLUMN",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::NotNumeric(_) => "NOT_NUMERIC",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
        }
    }

    /// True for failures of the input data itself (as opposed to the
    /// environment): malformed rows, duplicate headers, empty input.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedRow { .. } | Self::DuplicateColumn(_) | Self::EmptyInput
        )
    }
}

/// Errors serialize as a struct with `code` and `message` fields.
impl Serialize for WranglerError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("WranglerError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for table-wrangling operations.
pub type Result<T> = std::result::Result<T, WranglerError>;
