//! Descriptive statistics over the numeric columns of a table.
//!
//! [`describe`] summarizes every numeric column with count, mean, sample
//! standard deviation, min, quartiles, and max, using only present
//! (non-null) values. Statistics are computed on demand from the current
//! cell values and never cached, so describing a table after imputation
//! reflects the filled cells.
//!
//! Percentiles use linear interpolation between closest ranks, the same
//! convention spreadsheet-style `describe` output follows.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, WranglerError};
use crate::utils::{is_numeric_dtype, present_values};

/// Read-only summary of one numeric column.
///
/// `count` is the number of present values; the eight numeric fields are
/// `NaN` when the column has no present values at all (count = 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistics {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl ColumnStatistics {
    fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }

    /// The statistics in the fixed submission order:
    /// count, mean, std, min, 25%, 50%, 75%, max.
    pub fn ordered_values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Per-column statistics for a whole table, in table column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSummary {
    columns: Vec<ColumnStatistics>,
}

impl DatasetSummary {
    /// Look up the statistics of one column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnStatistics> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Iterate over the summarized columns in table order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnStatistics> {
        self.columns.iter()
    }

    /// Number of summarized (numeric) columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Compute descriptive statistics for every numeric column.
///
/// Text columns are skipped; they carry no numeric summary. A numeric
/// column with zero present values yields count = 0 and `NaN` fields
/// rather than an error.
pub fn describe(df: &DataFrame) -> Result<DatasetSummary> {
    let mut columns = Vec::new();
    for name in df.get_column_names() {
        let series = df.column(name.as_str())?.as_materialized_series();
        if !is_numeric_dtype(series.dtype()) {
            continue;
        }
        columns.push(summarize(name.as_str(), series)?);
    }
    Ok(DatasetSummary { columns })
}

/// Compute descriptive statistics for a single named column.
///
/// Fails with [`WranglerError::ColumnNotFound`] for an unknown name and
/// [`WranglerError::NotNumeric`] for a text column.
pub fn describe_column(df: &DataFrame, name: &str) -> Result<ColumnStatistics> {
    let series = df
        .column(name)
        .map_err(|_| WranglerError::ColumnNotFound(name.to_string()))?
        .as_materialized_series();
    if !is_numeric_dtype(series.dtype()) {
        return Err(WranglerError::NotNumeric(name.to_string()));
    }
    summarize(name, series)
}

fn summarize(name: &str, series: &Series) -> Result<ColumnStatistics> {
    let mut values = present_values(series)?;
    let count = values.len();
    if count == 0 {
        return Ok(ColumnStatistics::empty(name));
    }

    values.sort_by(|a, b| a.total_cmp(b));
    let mean = values.iter().sum::<f64>() / count as f64;

    Ok(ColumnStatistics {
        name: name.to_string(),
        count,
        mean,
        std: sample_std(&values, mean),
        min: values[0],
        q25: quantile_sorted(&values, 0.25),
        median: quantile_sorted(&values, 0.5),
        q75: quantile_sorted(&values, 0.75),
        max: values[count - 1],
    })
}

/// Sample standard deviation (ddof = 1). `NaN` for fewer than two
/// values, where the estimator is undefined.
pub(crate) fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    variance.sqrt()
}

/// Quantile of a sorted slice with linear interpolation between the two
/// closest ranks. The slice must be non-empty and sorted ascending.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}
