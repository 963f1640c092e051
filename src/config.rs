//! Configuration types for loading and imputation.
//!
//! Builder-pattern configuration mirrors how the CLI exposes the same
//! knobs; library callers can also pass strategies directly to
//! [`crate::Imputer`].

use serde::{Deserialize, Serialize};

/// Strategy for filling missing cells in numeric columns.
///
/// Text columns are never touched by either strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImputeStrategy {
    /// Replace every missing cell with 0.0.
    Zero,
    /// Replace missing cells with the column mean, computed from the
    /// present values before any replacement.
    #[default]
    Mean,
}

impl ImputeStrategy {
    /// Short name used in logs and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Mean => "mean",
        }
    }
}

/// Configuration for a load-describe-impute run.
///
/// # Example
///
/// ```rust,ignore
/// use table_wrangler::{ImputeStrategy, WrangleConfig};
///
/// let config = WrangleConfig::builder()
///     .delimiter(b';')
///     .strategy(ImputeStrategy::Zero)
///     .skip_column("rating")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrangleConfig {
    /// Field delimiter of the source data.
    /// Default: `b','`
    pub delimiter: u8,

    /// Imputation strategy for numeric columns.
    /// Default: Mean
    pub strategy: ImputeStrategy,

    /// Columns to exclude from imputation (e.g. a target column a
    /// downstream model will predict). Statistics still cover them.
    /// Default: empty
    pub skip_columns: Vec<String>,
}

impl Default for WrangleConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            strategy: ImputeStrategy::default(),
            skip_columns: Vec::new(),
        }
    }
}

impl WrangleConfig {
    /// Create a new configuration builder.
    pub fn builder() -> WrangleConfigBuilder {
        WrangleConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        // Delimiters that collide with quoting or record framing would
        // make every row unparseable.
        if self.delimiter == b'"' || self.delimiter == b'\n' || self.delimiter == b'\r' {
            return Err(ConfigValidationError::InvalidDelimiter(self.delimiter));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("invalid delimiter byte 0x{0:02x} (quote and newline bytes are reserved)")]
    InvalidDelimiter(u8),
}

/// Builder for [`WrangleConfig`].
#[derive(Debug, Clone, Default)]
pub struct WrangleConfigBuilder {
    config: WrangleConfig,
}

impl WrangleConfigBuilder {
    /// Set the field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set the imputation strategy.
    pub fn strategy(mut self, strategy: ImputeStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Add a column to exclude from imputation.
    pub fn skip_column(mut self, name: impl Into<String>) -> Self {
        self.config.skip_columns.push(name.into());
        self
    }

    /// Replace the full list of columns excluded from imputation.
    pub fn skip_columns(mut self, names: Vec<String>) -> Self {
        self.config.skip_columns = names;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<WrangleConfig, ConfigValidationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
