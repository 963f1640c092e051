//! Data handed to the external collaborators.
//!
//! Two collaborators sit outside this crate: a plotting surface, which
//! consumes selected column pairs, and a grading service, which consumes
//! a user identifier plus a fixed-order sequence of statistics. This
//! module prepares exactly what they consume and nothing more — no
//! rendering, no transport.

use chrono::Utc;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ImputeStrategy;
use crate::error::{Result, WranglerError};
use crate::stats::{ColumnStatistics, DatasetSummary};
use crate::utils::is_numeric_dtype;

/// Row-aligned (x, y) pairs for a scatter plot.
///
/// Rows where either cell is missing are skipped; surviving pairs keep
/// their original row order. Both columns must be numeric.
pub fn scatter_points(df: &DataFrame, x: &str, y: &str) -> Result<Vec<(f64, f64)>> {
    let xs = numeric_cells(df, x)?;
    let ys = numeric_cells(df, y)?;

    Ok(xs
        .into_iter()
        .zip(ys)
        .filter_map(|(x, y)| x.zip(y))
        .collect())
}

fn numeric_cells(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)
        .map_err(|_| WranglerError::ColumnNotFound(name.to_string()))?
        .as_materialized_series();
    if !is_numeric_dtype(series.dtype()) {
        return Err(WranglerError::NotNumeric(name.to_string()));
    }
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats.f64()?.into_iter().collect())
}

/// Payload for one graded-challenge attempt.
///
/// The grading service expects the eight statistics of a single column
/// in exactly this order: count, mean, std, min, 25%, 50%, 75%, max.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChallengeSubmission {
    pub challenge: String,
    pub user: String,
    pub values: Vec<f64>,
}

impl ChallengeSubmission {
    /// Build a submission from one column's statistics.
    pub fn from_statistics(
        challenge: impl Into<String>,
        user: impl Into<String>,
        stats: &ColumnStatistics,
    ) -> Self {
        Self {
            challenge: challenge.into(),
            user: user.into(),
            values: stats.ordered_values().to_vec(),
        }
    }
}

/// Machine-readable record of one load-describe-impute run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub input: String,
    pub generated_at: String,
    pub rows: usize,
    pub columns: usize,
    pub strategy: String,
    pub before: DatasetSummary,
    pub after: DatasetSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
}

impl RunReport {
    pub fn new(
        input: impl Into<String>,
        shape: (usize, usize),
        strategy: ImputeStrategy,
        before: DatasetSummary,
        after: DatasetSummary,
    ) -> Self {
        Self {
            input: input.into(),
            generated_at: Utc::now().to_rfc3339(),
            rows: shape.0,
            columns: shape.1,
            strategy: strategy.name().to_string(),
            before,
            after,
            output_file: None,
        }
    }

    /// Record where the cleaned table was written.
    pub fn with_output_file(mut self, path: impl Into<String>) -> Self {
        self.output_file = Some(path.into());
        self
    }
}
