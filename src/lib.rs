//! Tabular Data Wrangling Library
//!
//! Loads delimited tabular data into typed columns, computes descriptive
//! statistics, and fills missing values — the deterministic core of an
//! exploratory data-cleaning workflow, built on Polars.
//!
//! # Overview
//!
//! - **Loading**: [`TableLoader`] parses a file or URL into a table
//!   whose columns are typed once, at load — numeric (`Float64`, nulls
//!   mark missing cells) or text (`String`).
//! - **Statistics**: [`describe`] summarizes every numeric column
//!   (count, mean, std, min, quartiles, max) over present values only.
//! - **Imputation**: [`Imputer`] returns a new table with missing
//!   numeric cells filled by [`ImputeStrategy::Zero`] or
//!   [`ImputeStrategy::Mean`]; the input table is never mutated.
//! - **Correlation**: [`correlation_matrix`] computes pairwise-complete
//!   Pearson correlations, the data behind a heatmap.
//! - **Collaborators**: [`scatter_points`] and [`ChallengeSubmission`]
//!   prepare exactly what the external plotting surface and grading
//!   service consume.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use table_wrangler::{describe, ImputeStrategy, Imputer, TableLoader};
//!
//! let df = TableLoader::new().load("cereal.csv")?;
//!
//! let before = describe(&df)?;
//! let filled = Imputer::fill_missing(&df, ImputeStrategy::Mean)?;
//! let after = describe(&filled)?;
//!
//! // Mean-fill is mean-preserving per column.
//! let sugars = after.column("sugars").unwrap();
//! println!("sugars: count={} mean={:.2}", sugars.count, sugars.mean);
//! ```

pub mod config;
pub mod correlate;
pub mod error;
pub mod imputer;
pub mod loader;
pub mod reporting;
pub mod stats;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, ImputeStrategy, WrangleConfig, WrangleConfigBuilder};
pub use correlate::{CorrelationMatrix, correlation_matrix};
pub use error::{Result, WranglerError};
pub use imputer::Imputer;
pub use loader::TableLoader;
pub use reporting::{ChallengeSubmission, RunReport, scatter_points};
pub use stats::{ColumnStatistics, DatasetSummary, describe, describe_column};
pub use utils::{fill_series_nulls, is_numeric_dtype, parse_cell, present_values};
