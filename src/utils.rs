//! Shared helpers used across the loading, statistics, and imputation
//! modules.

use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
///
/// The loader only produces `Float64` and `String` columns, but tables
/// assembled by hand (tests, downstream callers) may carry integer
/// columns; those count as numeric too.
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Try to parse a cell as a numeric value.
///
/// Leading/trailing whitespace is ignored; anything else must be a plain
/// number (`f64` syntax). Returns `None` for empty or non-numeric cells.
pub fn parse_cell(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Collect the present (non-null) values of a numeric series as `f64`.
pub fn present_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats.f64()?.into_iter().flatten().collect())
}

/// Fill the null cells of a numeric series with a fixed value.
///
/// Present cells pass through untouched; the result is always `Float64`.
pub fn fill_series_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let floats = series.cast(&DataType::Float64)?;
    let filled: Vec<f64> = floats
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(fill_value))
        .collect();
    Ok(Series::new(series.name().clone(), filled))
}
