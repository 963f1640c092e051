//! Pearson correlation over the numeric columns of a table.
//!
//! The matrix is what a heatmap collaborator consumes: one entry per
//! ordered pair of numeric columns, computed over the rows where both
//! cells are present (pairwise-complete observations, so missing values
//! shrink the sample per pair instead of poisoning the whole matrix).

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::utils::is_numeric_dtype;

/// Symmetric Pearson correlation matrix over numeric columns.
///
/// `values[i][j]` is the correlation between `columns[i]` and
/// `columns[j]`. Diagonal entries are 1.0; entries with fewer than two
/// complete pairs, or with zero variance on either side, are `NaN`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Look up the correlation between two named columns.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }

    /// Number of numeric columns covered by the matrix.
    pub fn size(&self) -> usize {
        self.columns.len()
    }
}

/// Compute the pairwise-complete Pearson correlation matrix of a table.
///
/// Text columns are excluded; column order follows the table.
pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let mut columns = Vec::new();
    let mut data: Vec<Vec<Option<f64>>> = Vec::new();

    for name in df.get_column_names() {
        let series = df.column(name.as_str())?.as_materialized_series();
        if !is_numeric_dtype(series.dtype()) {
            continue;
        }
        let floats = series.cast(&DataType::Float64)?;
        data.push(floats.f64()?.into_iter().collect());
        columns.push(name.to_string());
    }

    let n = columns.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = pearson_pairwise(&data[i], &data[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix { columns, values })
}

/// Pearson r over the rows where both cells are present.
fn pearson_pairwise(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b.iter())
        .filter_map(|(x, y)| x.zip(*y))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x * var_y).sqrt()
}
