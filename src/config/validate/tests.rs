//! Unit tests for configuration validation

use super::validator::ConfigValidator;
use crate::config::PipelineConfig;
use crate::eval::StatTestChoice;

fn field_of(config: &PipelineConfig) -> String {
    match ConfigValidator::validate(config) {
        Err(rodar_common::RodarError::ConfigValue { field, .. }) => field,
        other => panic!("expected ConfigValue error, got {other:?}"),
    }
}

#[test]
fn test_default_config_is_valid() {
    let config = PipelineConfig::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_ok(), "Validation failed: {:?}", result.err());
}

#[test]
fn test_empty_features() {
    let mut config = PipelineConfig::default();
    config.schema.numeric.clear();
    config.schema.categorical.clear();
    assert_eq!(field_of(&config), "schema");
}

#[test]
fn test_duplicate_feature_across_roles() {
    let mut config = PipelineConfig::default();
    config.schema.categorical.push("temp".into());
    assert_eq!(field_of(&config), "schema");
}

#[test]
fn test_target_as_feature() {
    let mut config = PipelineConfig::default();
    config.schema.numeric.push("cnt".into());
    assert_eq!(field_of(&config), "schema.target");
}

#[test]
fn test_prediction_collides_with_target() {
    let mut config = PipelineConfig::default();
    config.schema.prediction = "cnt".into();
    assert_eq!(field_of(&config), "schema.prediction");
}

#[test]
fn test_date_column_as_feature() {
    let mut config = PipelineConfig::default();
    config.split.date_column = "hr".into();
    assert_eq!(field_of(&config), "split.date_column");
}

#[test]
fn test_split_day_bounds() {
    let mut config = PipelineConfig::default();
    config.split.split_day = 0;
    assert_eq!(field_of(&config), "split.split_day");
    config.split.split_day = 31;
    assert_eq!(field_of(&config), "split.split_day");
    config.split.split_day = 30;
    assert!(ConfigValidator::validate(&config).is_ok());
}

#[test]
fn test_test_ratio_bounds() {
    for ratio in [0.0, 1.0, -0.1, f64::NAN] {
        let mut config = PipelineConfig::default();
        config.split.test_ratio = ratio;
        assert_eq!(field_of(&config), "split.test_ratio");
    }
}

#[test]
fn test_zero_trees() {
    let mut config = PipelineConfig::default();
    config.forest.n_trees = 0;
    assert_eq!(field_of(&config), "forest.n_trees");
}

#[test]
fn test_zero_max_depth() {
    let mut config = PipelineConfig::default();
    config.forest.max_depth = Some(0);
    assert_eq!(field_of(&config), "forest.max_depth");
    config.forest.max_depth = Some(1);
    assert!(ConfigValidator::validate(&config).is_ok());
}

#[test]
fn test_drift_share_bounds() {
    let mut config = PipelineConfig::default();
    config.drift.drift_share = 0.0;
    assert_eq!(field_of(&config), "drift.drift_share");
    config.drift.drift_share = 1.0;
    assert!(ConfigValidator::validate(&config).is_ok());
}

#[test]
fn test_thresholds_positive() {
    let mut config = PipelineConfig::default();
    config.drift.distance_threshold = 0.0;
    assert_eq!(field_of(&config), "drift.distance_threshold");

    let mut config = PipelineConfig::default();
    config.drift.numeric_test = StatTestChoice::Psi;
    config.drift.psi_threshold = -1.0;
    assert_eq!(field_of(&config), "drift.psi_threshold");
}

#[test]
fn test_error_messages_are_actionable() {
    let mut config = PipelineConfig::default();
    config.split.split_day = 45;

    let error_msg = ConfigValidator::validate(&config).unwrap_err().to_string();

    // Should contain the field name
    assert!(error_msg.contains("split_day"));
    // Should contain a suggestion
    assert!(error_msg.contains("→"));
}
