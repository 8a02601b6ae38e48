//! Tests for drift detection module.

use super::*;
use crate::config::FeatureSchema;
use crate::data::Frame;

fn detector() -> DriftDetector {
    DriftDetector::new(DriftConfig::default())
}

fn range(lo: i32, hi: i32) -> Vec<f64> {
    (lo..hi).map(f64::from).collect()
}

#[test]
fn test_ks_same_distribution() {
    let data = range(0, 100);
    let result = detector().check_column("temp", ColumnKind::Numeric, &data, &data);
    assert_eq!(result.stattest_name, "Kolmogorov-Smirnov");
    assert!(!result.drift_detected);
    assert!((result.drift_score - 1.0).abs() < 1e-9);
}

#[test]
fn test_ks_different_distribution() {
    let baseline = range(0, 100);
    let current = range(50, 150);
    let result = detector().check_column("temp", ColumnKind::Numeric, &baseline, &current);
    assert!(result.drift_detected);
    assert_eq!(result.severity, Severity::Critical);
    assert!(result.drift_score < 0.05);
}

#[test]
fn test_chi_square_same() {
    let data: Vec<f64> = (0..100).map(|i| f64::from(i % 5)).collect();
    let result = detector().check_column("season", ColumnKind::Categorical, &data, &data);
    assert_eq!(result.stattest_name, "Chi-Square");
    assert!(!result.drift_detected);
}

#[test]
fn test_chi_square_different() {
    let baseline: Vec<f64> = (0..100).map(|i| f64::from(i % 5)).collect();
    let current = vec![0.0; 100];
    let result = detector().check_column("season", ColumnKind::Categorical, &baseline, &current);
    assert!(result.drift_detected);
}

#[test]
fn test_chi_square_unseen_category_drifts() {
    let baseline: Vec<f64> = (0..60).map(|i| f64::from(i % 3)).collect();
    let mut current = baseline.clone();
    current[0] = 9.0;
    let result = detector().check_column("weathersit", ColumnKind::Categorical, &baseline, &current);
    assert!(result.drift_detected);
    assert_eq!(result.drift_score, 0.0);
}

#[test]
fn test_binary_column_uses_z_test() {
    // Share of zeros falls from 1/2 to 1/4: chi-square would call this drift
    let baseline: Vec<f64> = [vec![0.0; 20], vec![1.0; 20]].concat();
    let current: Vec<f64> = [vec![0.0; 4], vec![1.0; 12]].concat();
    let result = detector().check_column("holiday", ColumnKind::Categorical, &baseline, &current);
    assert_eq!(result.stattest_name, "Z-test");
    assert!((result.drift_score - 0.0877).abs() < 1e-3, "p = {}", result.drift_score);
    assert!(!result.drift_detected);
}

#[test]
fn test_binary_column_z_test_detects_flip() {
    let baseline: Vec<f64> = [vec![0.0; 30], vec![1.0; 10]].concat();
    let current: Vec<f64> = [vec![0.0; 5], vec![1.0; 35]].concat();
    let result = detector().check_column("workingday", ColumnKind::Numeric, &baseline, &current);
    assert_eq!(result.stattest_name, "Z-test");
    assert!(result.drift_detected);
}

#[test]
fn test_low_cardinality_numeric_column_is_compared_as_categories() {
    let baseline: Vec<f64> = (0..60).map(|i| f64::from(i % 4)).collect();
    let result = detector().check_column("weekday", ColumnKind::Numeric, &baseline, &baseline);
    assert_eq!(result.stattest_name, "Chi-Square");
    assert!(!result.drift_detected);
}

#[test]
fn test_small_samples_use_exact_ks_p_value() {
    let baseline = range(1, 6);
    let current = range(6, 11);
    let result = detector().check_column("temp", ColumnKind::Numeric, &baseline, &current);
    assert_eq!(result.stattest_name, "Kolmogorov-Smirnov");
    // Only the 2 fully separated orderings of C(10, 5) = 252 reach D = 1
    assert!((result.drift_score - 2.0 / 252.0).abs() < 1e-12);
    assert!(result.drift_detected);
}

#[test]
fn test_large_sample_switches_to_wasserstein() {
    let baseline = range(0, 2000);
    let result = detector().check_column("temp", ColumnKind::Numeric, &baseline, &baseline);
    assert!(result.stattest_name.starts_with("Wasserstein"));
    assert!(!result.drift_detected);

    let shifted = range(1000, 3000);
    let result = detector().check_column("temp", ColumnKind::Numeric, &baseline, &shifted);
    assert!(result.drift_detected);
    assert!(result.drift_score > 1.0);
}

#[test]
fn test_large_sample_switches_to_jensen_shannon() {
    let baseline: Vec<f64> = (0..2000).map(|i| f64::from(i % 4)).collect();
    let result = detector().check_column("hr", ColumnKind::Categorical, &baseline, &baseline);
    assert_eq!(result.stattest_name, "Jensen-Shannon distance");
    assert!(result.drift_score < 1e-9);

    let current = vec![0.0; 2000];
    let result = detector().check_column("hr", ColumnKind::Categorical, &baseline, &current);
    assert!(result.drift_detected);
}

#[test]
fn test_psi_no_drift() {
    let config = DriftConfig { numeric_test: StatTestChoice::Psi, ..DriftConfig::default() };
    let data = range(0, 100);
    let result = DriftDetector::new(config).check_column("hum", ColumnKind::Numeric, &data, &data);
    assert_eq!(result.stattest_name, "PSI");
    assert!(!result.drift_detected);
    assert!(result.drift_score < 1e-9);
}

#[test]
fn test_psi_with_drift() {
    let config = DriftConfig { numeric_test: StatTestChoice::Psi, ..DriftConfig::default() };
    let baseline: Vec<f64> = (0..100).map(|i| f64::from(i % 10)).collect();
    let current: Vec<f64> = (0..100).map(|i| 90.0 + f64::from(i % 10)).collect();
    let result =
        DriftDetector::new(config).check_column("hum", ColumnKind::Numeric, &baseline, &current);
    assert!(result.drift_detected);
    assert!(result.drift_score > 1.0);
}

#[test]
fn test_empty_current_reports_no_drift() {
    let result = detector().check_column("temp", ColumnKind::Numeric, &range(0, 10), &[]);
    assert!(!result.drift_detected);
    assert_eq!(result.severity, Severity::None);
}

fn schema() -> FeatureSchema {
    FeatureSchema {
        numeric: vec!["x".into()],
        categorical: vec!["c".into()],
        target: "y".into(),
        prediction: "prediction".into(),
    }
}

fn frame(offset: i32, n: i32) -> Frame {
    let rows = (0..n)
        .map(|i| vec![(i + offset).to_string(), (i % 3).to_string(), (2 * (i + offset)).to_string()])
        .collect();
    Frame::new(vec!["x".into(), "c".into(), "y".into()], rows).unwrap()
}

#[test]
fn test_check_frame_visits_schema_columns_in_order() {
    let reference = frame(0, 50);
    let results = detector().check_frame(&reference, &reference, &schema()).unwrap();
    let names: Vec<_> = results.iter().map(|r| r.column_name.as_str()).collect();
    assert_eq!(names, vec!["x", "c", "y"]);
    assert!(results.iter().all(|r| !r.drift_detected));
}

#[test]
fn test_check_frame_includes_prediction_column() {
    let predictions: Vec<f64> = (0..50).map(f64::from).collect();
    let reference = frame(0, 50).with_column("prediction", &predictions).unwrap();
    let results = detector().check_frame(&reference, &reference, &schema()).unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[3].column_name, "prediction");
    assert_eq!(results[3].column_type, ColumnKind::Numeric);
}

#[test]
fn test_dataset_drift_on_shifted_frame() {
    let d = detector();
    let reference = frame(0, 50);
    let current = frame(100, 50);
    let results = d.check_frame(&reference, &current, &schema()).unwrap();
    let summary = d.summary(&results);

    assert_eq!(summary.total_columns, 3);
    assert_eq!(summary.drifted_columns, 2);
    assert!(summary.dataset_drift());
}

#[test]
fn test_check_frame_missing_column_is_error() {
    let reference = frame(0, 10);
    let mut bad_schema = schema();
    bad_schema.numeric.push("windspeed".into());
    let err = detector().check_frame(&reference, &reference, &bad_schema).unwrap_err();
    assert_eq!(err.code(), "E020");
}
