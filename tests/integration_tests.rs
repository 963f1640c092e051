//! Integration tests for the load-describe-impute workflow.
//!
//! These tests run the library end-to-end against fixture datasets
//! modeled on the cereal nutrition and 1985 automobile datasets.

use polars::prelude::*;
use std::path::PathBuf;
use table_wrangler::{
    ChallengeSubmission, ImputeStrategy, Imputer, TableLoader, WranglerError, correlation_matrix,
    describe, describe_column, scatter_points,
};

const EPS: f64 = 1e-9;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(filename: &str) -> DataFrame {
    let path = fixtures_path().join(filename);
    TableLoader::new()
        .load(path.to_str().expect("fixture path should be valid UTF-8"))
        .expect("fixture should load")
}

// ============================================================================
// Loading and Type Inference
// ============================================================================

#[test]
fn test_load_cereal_shape_and_types() {
    let df = load_fixture("cereal_subset.csv");

    assert_eq!(df.shape(), (15, 6));
    assert_eq!(df.column("name").unwrap().dtype(), &DataType::String);
    for col in ["calories", "carbo", "sugars", "potass", "rating"] {
        assert_eq!(
            df.column(col).unwrap().dtype(),
            &DataType::Float64,
            "column '{col}' should be numeric"
        );
    }
}

#[test]
fn test_load_maps_empty_cells_to_missing() {
    let df = load_fixture("cereal_subset.csv");

    assert_eq!(df.column("potass").unwrap().null_count(), 2);
    assert_eq!(df.column("carbo").unwrap().null_count(), 1);
    assert_eq!(df.column("sugars").unwrap().null_count(), 1);
    assert_eq!(df.column("calories").unwrap().null_count(), 0);
}

#[test]
fn test_load_malformed_row_reports_index() {
    let path = fixtures_path().join("malformed.csv");
    let err = TableLoader::new()
        .load(path.to_str().unwrap())
        .unwrap_err();

    match err {
        WranglerError::MalformedRow { row, reason } => {
            assert_eq!(row, 2);
            assert!(reason.contains("expected 4"));
        }
        other => panic!("expected MalformedRow, got {other:?}"),
    }
}

#[test]
fn test_load_missing_source() {
    let err = TableLoader::new()
        .load("tests/fixtures/does_not_exist.csv")
        .unwrap_err();
    assert!(matches!(err, WranglerError::SourceUnavailable { .. }));
}

// ============================================================================
// Descriptive Statistics
// ============================================================================

#[test]
fn test_describe_counts_track_missing_cells() {
    let df = load_fixture("cereal_subset.csv");
    let summary = describe(&df).unwrap();

    let height = df.height();
    for stats in summary.iter() {
        assert!(stats.count <= height);
    }
    // Equality exactly when the column has no missing cells.
    assert_eq!(summary.column("calories").unwrap().count, height);
    assert_eq!(summary.column("potass").unwrap().count, height - 2);
    // Text columns carry no statistics.
    assert!(summary.column("name").is_none());
}

#[test]
fn test_describe_against_known_values() {
    let df = load_fixture("no_missing.csv");
    let stats = describe_column(&df, "x").unwrap();

    assert_eq!(stats.count, 4);
    assert!((stats.mean - 2.5).abs() < EPS);
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.max, 4.0);
    assert!((stats.median - 2.5).abs() < EPS);
    assert!((stats.q25 - 1.75).abs() < EPS);
    assert!((stats.q75 - 3.25).abs() < EPS);
}

// ============================================================================
// Imputation Properties
// ============================================================================

#[test]
fn test_mean_fill_preserves_mean_and_completes_counts() {
    let df = load_fixture("cars_subset.csv");
    let before = describe(&df).unwrap();

    let filled = Imputer::fill_missing(&df, ImputeStrategy::Mean).unwrap();
    let after = describe(&filled).unwrap();

    for stats in before.iter() {
        if stats.count == 0 {
            continue;
        }
        let post = after.column(&stats.name).unwrap();
        assert_eq!(post.count, df.height(), "'{}' should be complete", stats.name);
        assert!(
            (post.mean - stats.mean).abs() < EPS,
            "mean of '{}' drifted: {} -> {}",
            stats.name,
            stats.mean,
            post.mean
        );
    }
}

#[test]
fn test_zero_fill_lowers_mean_of_nonnegative_column() {
    let df = load_fixture("cars_subset.csv");
    let before = describe_column(&df, "losses").unwrap();

    let filled = Imputer::fill_missing(&df, ImputeStrategy::Zero).unwrap();
    let after = describe_column(&filled, "losses").unwrap();

    assert!(after.mean < before.mean);
    assert_eq!(after.min, 0.0);
}

#[test]
fn test_fill_is_idempotent_on_real_data() {
    let df = load_fixture("cereal_subset.csv");

    for strategy in [ImputeStrategy::Zero, ImputeStrategy::Mean] {
        let once = Imputer::fill_missing(&df, strategy).unwrap();
        let twice = Imputer::fill_missing(&once, strategy).unwrap();
        assert!(once.equals_missing(&twice));
    }
}

#[test]
fn test_fill_preserves_text_columns_and_row_order() {
    let df = load_fixture("cereal_subset.csv");
    let filled = Imputer::fill_missing(&df, ImputeStrategy::Mean).unwrap();

    assert!(
        filled
            .column("name")
            .unwrap()
            .as_materialized_series()
            .equals_missing(df.column("name").unwrap().as_materialized_series())
    );

    // Row order intact: spot-check first and last rows.
    let first = filled.column("name").unwrap().get(0).unwrap().to_string();
    let last = filled
        .column("name")
        .unwrap()
        .get(df.height() - 1)
        .unwrap()
        .to_string();
    assert!(first.contains("100% Bran"));
    assert!(last.contains("Cream of Wheat"));
}

#[test]
fn test_fill_does_not_mutate_input() {
    let df = load_fixture("cereal_subset.csv");
    let nulls_before = df.column("potass").unwrap().null_count();

    let _ = Imputer::fill_missing(&df, ImputeStrategy::Mean).unwrap();
    assert_eq!(df.column("potass").unwrap().null_count(), nulls_before);
}

// ============================================================================
// Challenge Workflow (load -> impute -> describe -> submit)
// ============================================================================

#[test]
fn test_challenge_flow_losses_column() {
    let df = load_fixture("cars_subset.csv");

    let filled = Imputer::fill_missing(&df, ImputeStrategy::Mean).unwrap();
    let losses = describe_column(&filled, "losses").unwrap();

    assert_eq!(losses.count, df.height());

    let submission =
        ChallengeSubmission::from_statistics("deal_with_missing_data", "user@example.com", &losses);
    assert_eq!(submission.values.len(), 8);
    assert_eq!(submission.values[0], df.height() as f64);
    // Present losses: 164, 164, 158, 192, 192, 188 -> mean 176.33
    assert!((submission.values[1] - 1058.0 / 6.0).abs() < EPS);

    let json = serde_json::to_string(&submission).unwrap();
    assert!(json.contains("deal_with_missing_data"));
}

#[test]
fn test_target_column_can_be_skipped() {
    let df = load_fixture("cars_subset.csv");

    let filled =
        Imputer::fill_missing_except(&df, ImputeStrategy::Mean, &["price".to_string()]).unwrap();

    assert_eq!(filled.column("losses").unwrap().null_count(), 0);
    assert_eq!(filled.column("price").unwrap().null_count(), 1);
}

// ============================================================================
// Correlation and Plot Selection
// ============================================================================

#[test]
fn test_correlation_of_linear_columns() {
    let df = load_fixture("no_missing.csv");
    let matrix = correlation_matrix(&df).unwrap();

    assert_eq!(matrix.size(), 2);
    assert!((matrix.get("x", "y").unwrap() - 1.0).abs() < EPS);
    assert_eq!(matrix.get("x", "x"), Some(1.0));
}

#[test]
fn test_correlation_survives_missing_cells() {
    let df = load_fixture("cars_subset.csv");
    let matrix = correlation_matrix(&df).unwrap();

    // weight/price correlate positively on the complete rows.
    let r = matrix.get("weight", "price").unwrap();
    assert!(r > 0.0);
    assert!(r <= 1.0 + EPS);
    // Text column excluded from the matrix.
    assert!(matrix.get("make", "price").is_none());
}

#[test]
fn test_scatter_points_skip_rows_with_missing_cells() {
    let df = load_fixture("cars_subset.csv");
    let points = scatter_points(&df, "weight", "price").unwrap();

    // One price is missing; weight is complete.
    assert_eq!(points.len(), df.height() - 1);
    assert_eq!(points[0], (2548.0, 13495.0));
}
