//! Missing-value imputation for numeric columns.
//!
//! [`Imputer::fill_missing`] returns a new table; the input is never
//! mutated, so pre- and post-imputation statistics can be compared side
//! by side. Mean fills are fixed per column from the original data
//! before any replacement, which makes the fill order-independent and
//! mean-preserving.

use polars::prelude::*;
use tracing::{debug, warn};

use crate::config::ImputeStrategy;
use crate::error::Result;
use crate::utils::{fill_series_nulls, is_numeric_dtype};

/// Fills missing cells in the numeric columns of a table.
pub struct Imputer;

impl Imputer {
    /// Fill every missing cell in every numeric column.
    ///
    /// Text columns and row order pass through unchanged. With
    /// [`ImputeStrategy::Mean`], a column that has no present values at
    /// all is left untouched (there is no mean to fill with); a warning
    /// is logged. With [`ImputeStrategy::Zero`] such a column fills to
    /// all zeros.
    pub fn fill_missing(df: &DataFrame, strategy: ImputeStrategy) -> Result<DataFrame> {
        Self::fill_missing_except(df, strategy, &[])
    }

    /// Like [`Imputer::fill_missing`], but leaves the named columns
    /// alone — typically the target column a downstream model will
    /// predict.
    pub fn fill_missing_except(
        df: &DataFrame,
        strategy: ImputeStrategy,
        skip: &[String],
    ) -> Result<DataFrame> {
        let mut out = df.clone();

        for name in df.get_column_names() {
            let name = name.as_str();
            if skip.iter().any(|s| s == name) {
                continue;
            }
            let series = df.column(name)?.as_materialized_series();
            if !is_numeric_dtype(series.dtype()) {
                continue;
            }
            if series.null_count() == 0 {
                continue;
            }

            // The fill value comes from the input table, never from
            // cells filled earlier in this call.
            let fill_value = match strategy {
                ImputeStrategy::Zero => Some(0.0),
                ImputeStrategy::Mean => series.mean(),
            };
            let Some(fill_value) = fill_value else {
                warn!(
                    "column '{}' has no present values; mean-fill leaves it unimputed",
                    name
                );
                continue;
            };

            let filled = fill_series_nulls(series, fill_value)?;
            out.replace(name, filled)?;
            debug!(
                "filled {} missing cells in '{}' with {} value {:.4}",
                series.null_count(),
                name,
                strategy.name(),
                fill_value
            );
        }

        Ok(out)
    }
}
