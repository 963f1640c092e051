//! CLI entry point: load a dataset, describe it, impute, and write the
//! cleaned table.

use anyhow::{Result, anyhow};
use clap::{Parser, ValueEnum};
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use table_wrangler::{
    DatasetSummary, ImputeStrategy, Imputer, RunReport, TableLoader, WrangleConfig, describe,
};
use tracing::{error, info};

/// CLI-compatible imputation strategy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliImputeStrategy {
    /// Replace missing cells with zero
    Zero,
    /// Replace missing cells with the column mean
    Mean,
}

impl From<CliImputeStrategy> for ImputeStrategy {
    fn from(cli: CliImputeStrategy) -> Self {
        match cli {
            CliImputeStrategy::Zero => ImputeStrategy::Zero,
            CliImputeStrategy::Mean => ImputeStrategy::Mean,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Tabular data loading, imputation, and descriptive statistics",
    long_about = "Loads a delimited dataset, prints descriptive statistics, fills missing\n\
                  numeric values, and writes the cleaned table.\n\n\
                  EXAMPLES:\n  \
                  # Describe and mean-impute a local file\n  \
                  table-wrangler -i cereal.csv\n\n  \
                  # Zero-fill, keep the rating column untouched\n  \
                  table-wrangler -i cereal.csv --strategy zero --skip-columns rating\n\n  \
                  # Fetch from a URL, machine-readable output\n  \
                  table-wrangler -i https://example.com/cars_data.csv --json"
)]
struct Args {
    /// Path or URL of the dataset to process
    #[arg(short, long)]
    input: String,

    /// Output directory for the cleaned dataset
    #[arg(short, long, default_value = "./outputs")]
    output: String,

    /// Custom output file name (without extension)
    ///
    /// If not specified, uses "<input stem>_cleaned"
    #[arg(long)]
    output_name: Option<String>,

    /// Field delimiter of the source data
    #[arg(short, long, default_value = ",")]
    delimiter: char,

    /// Strategy for filling missing numeric values
    #[arg(short, long, value_enum, default_value = "mean")]
    strategy: CliImputeStrategy,

    /// Columns to exclude from imputation (e.g. a target column)
    #[arg(long, value_delimiter = ',')]
    skip_columns: Vec<String>,

    /// Preview the dataset and statistics without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Number of preview rows to print
    #[arg(long, default_value = "5")]
    head: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of a human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    /// Useful for piping to other tools: `... --json | jq .after`
    #[arg(long)]
    json: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet, args.json);

    let is_url = args.input.starts_with("http://") || args.input.starts_with("https://");
    if !is_url && !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    let config = WrangleConfig::builder()
        .delimiter(args.delimiter as u8)
        .strategy(args.strategy.into())
        .skip_columns(args.skip_columns.clone())
        .build()?;

    info!("Loading dataset from: {}", args.input);
    let loader = TableLoader::new().with_delimiter(config.delimiter);
    let df = match loader.load(&args.input) {
        Ok(df) => df,
        Err(e) => {
            error!("Failed to load dataset: {}", e);
            return Err(anyhow!("Failed to load dataset: {}", e));
        }
    };

    if !args.json {
        println!("\n{}", df.head(Some(args.head)));
    }

    let before = describe(&df)?;
    if !args.json {
        print_statistics("DESCRIPTIVE STATISTICS (before imputation)", &before);
    }

    let filled = Imputer::fill_missing_except(&df, config.strategy, &config.skip_columns)?;
    let after = describe(&filled)?;
    if !args.json {
        print_statistics("DESCRIPTIVE STATISTICS (after imputation)", &after);
    }

    let mut report = RunReport::new(&args.input, df.shape(), config.strategy, before, after);

    if !args.dry_run {
        let output_path = write_cleaned(&args, filled)?;
        info!("Cleaned dataset saved: {}", output_path.display());
        report = report.with_output_file(output_path.to_string_lossy());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if args.dry_run {
        println!("Dry run; nothing written. Re-run without --dry-run to save the cleaned table.");
    }

    Ok(())
}

/// Write the cleaned table as CSV into the output directory.
fn write_cleaned(args: &Args, mut df: DataFrame) -> Result<PathBuf> {
    std::fs::create_dir_all(&args.output)?;

    let stem = args
        .output_name
        .clone()
        .unwrap_or_else(|| format!("{}_cleaned", extract_file_stem(&args.input)));
    let output_path = Path::new(&args.output).join(format!("{stem}.csv"));

    let mut file = File::create(&output_path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(args.delimiter as u8)
        .finish(&mut df)?;

    Ok(output_path)
}

/// Extract the file stem (name without extension) from a path or URL.
fn extract_file_stem(source: &str) -> String {
    let tail = source.rsplit('/').next().unwrap_or(source);
    Path::new(tail)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}

/// Print a statistics table, one row per numeric column.
///
/// Uses `println!` intentionally: this is the primary CLI output, always
/// visible regardless of log level.
fn print_statistics(title: &str, summary: &DatasetSummary) {
    println!("{title}");
    println!("{}", "-".repeat(100));
    println!(
        "{:<18} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max"
    );
    for stats in summary.iter() {
        println!(
            "{:<18} {:>6} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            truncate_str(&stats.name, 17),
            stats.count,
            fmt_stat(stats.mean),
            fmt_stat(stats.std),
            fmt_stat(stats.min),
            fmt_stat(stats.q25),
            fmt_stat(stats.median),
            fmt_stat(stats.q75),
            fmt_stat(stats.max),
        );
    }
    println!();
}

fn fmt_stat(value: f64) -> String {
    if value.is_nan() {
        "-".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_file_stem() {
        assert_eq!(extract_file_stem("data/cereal.csv"), "cereal");
        assert_eq!(
            extract_file_stem("https://example.com/datasets/cars_data.csv"),
            "cars_data"
        );
        assert_eq!(extract_file_stem("plain"), "plain");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 17), "short");
        assert_eq!(truncate_str("a_very_long_column_name", 10), "a_very_...");
    }

    #[test]
    fn test_fmt_stat_nan() {
        assert_eq!(fmt_stat(f64::NAN), "-");
        assert_eq!(fmt_stat(8.333333), "8.33");
    }

    #[test]
    fn test_cli_strategy_conversion() {
        assert_eq!(
            ImputeStrategy::from(CliImputeStrategy::Zero),
            ImputeStrategy::Zero
        );
        assert_eq!(
            ImputeStrategy::from(CliImputeStrategy::Mean),
            ImputeStrategy::Mean
        );
    }
}
