//! Configuration validation (Jidoka - built-in quality).
//!
//! Validates a pipeline configuration before any job touches data, so a bad
//! value fails with the field name and a suggested fix.

use rodar_common::{Result, RodarError};
use std::collections::HashSet;

use crate::config::{FeatureSchema, PipelineConfig, SplitConfig};
use crate::eval::DriftConfig;
use crate::model::ForestConfig;

/// Configuration validator implementing Jidoka principle.
pub struct ConfigValidator;

fn invalid(field: &str, message: impl Into<String>, suggestion: &str) -> RodarError {
    RodarError::ConfigValue {
        field: field.into(),
        message: message.into(),
        suggestion: suggestion.into(),
    }
}

impl ConfigValidator {
    /// Validate a pipeline configuration.
    ///
    /// Returns `Ok(())` if valid, or the first offending field with an
    /// actionable suggestion.
    pub fn validate(config: &PipelineConfig) -> Result<()> {
        Self::validate_schema(&config.schema)?;
        Self::validate_split(&config.split, &config.schema)?;
        Self::validate_forest(&config.forest)?;
        Self::validate_drift(&config.drift)?;
        Ok(())
    }

    fn validate_schema(schema: &FeatureSchema) -> Result<()> {
        if schema.n_features() == 0 {
            return Err(invalid(
                "schema",
                "No model features declared",
                "List at least one column under schema.numeric or schema.categorical",
            ));
        }

        let mut seen = HashSet::new();
        for name in schema.numeric.iter().chain(schema.categorical.iter()) {
            if name.trim().is_empty() {
                return Err(invalid(
                    "schema",
                    "Feature names cannot be empty",
                    "Use the column names from the CSV header",
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(invalid(
                    "schema",
                    format!("Feature '{name}' is declared more than once"),
                    "Each column belongs to exactly one of schema.numeric or schema.categorical",
                ));
            }
        }

        if schema.target.trim().is_empty() {
            return Err(invalid("schema.target", "Target cannot be empty", "Use target: cnt"));
        }
        if seen.contains(schema.target.as_str()) {
            return Err(invalid(
                "schema.target",
                format!("Target '{}' is also a feature", schema.target),
                "Remove the target column from the feature lists",
            ));
        }

        if schema.prediction.trim().is_empty()
            || schema.prediction == schema.target
            || seen.contains(schema.prediction.as_str())
        {
            return Err(invalid(
                "schema.prediction",
                format!("Prediction column '{}' collides with an input column", schema.prediction),
                "Use a fresh column name such as 'prediction'",
            ));
        }

        Ok(())
    }

    fn validate_split(split: &SplitConfig, schema: &FeatureSchema) -> Result<()> {
        if split.date_column.trim().is_empty() {
            return Err(invalid(
                "split.date_column",
                "Date column cannot be empty",
                "Use date_column: dteday",
            ));
        }
        if schema.model_features().iter().any(|f| f == &split.date_column) {
            return Err(invalid(
                "split.date_column",
                format!("Date column '{}' is also a model feature", split.date_column),
                "Dates are parsed as YYYY-MM-DD and cannot be model inputs",
            ));
        }

        if !(1..=30).contains(&split.split_day) {
            return Err(invalid(
                "split.split_day",
                format!("Split day must be 1-30, got {}", split.split_day),
                "Use split_day: 20 (days 1-20 reference, 21+ current)",
            ));
        }

        if !(split.test_ratio > 0.0 && split.test_ratio < 1.0) {
            return Err(invalid(
                "split.test_ratio",
                format!("Test ratio must be strictly between 0 and 1, got {}", split.test_ratio),
                "Use test_ratio: 0.2",
            ));
        }

        Ok(())
    }

    fn validate_forest(forest: &ForestConfig) -> Result<()> {
        if forest.n_trees == 0 {
            return Err(invalid(
                "forest.n_trees",
                "Number of trees must be positive",
                "Use n_trees: 100",
            ));
        }

        if forest.max_depth == Some(0) {
            return Err(invalid(
                "forest.max_depth",
                "Max depth must be positive",
                "Omit max_depth to grow trees until leaves are pure",
            ));
        }

        Ok(())
    }

    fn validate_drift(drift: &DriftConfig) -> Result<()> {
        if !(drift.drift_share > 0.0 && drift.drift_share <= 1.0) {
            return Err(invalid(
                "drift.drift_share",
                format!("Drift share must be in (0, 1], got {}", drift.drift_share),
                "Use drift_share: 0.5 (dataset drifts when half the columns drift)",
            ));
        }

        if !(drift.p_value_threshold > 0.0 && drift.p_value_threshold < 1.0) {
            return Err(invalid(
                "drift.p_value_threshold",
                format!("p-value threshold must be in (0, 1), got {}", drift.p_value_threshold),
                "Use p_value_threshold: 0.05",
            ));
        }

        if !(drift.distance_threshold > 0.0 && drift.distance_threshold.is_finite()) {
            return Err(invalid(
                "drift.distance_threshold",
                format!("Distance threshold must be positive, got {}", drift.distance_threshold),
                "Use distance_threshold: 0.1",
            ));
        }

        if !(drift.psi_threshold > 0.0 && drift.psi_threshold.is_finite()) {
            return Err(invalid(
                "drift.psi_threshold",
                format!("PSI threshold must be positive, got {}", drift.psi_threshold),
                "Use psi_threshold: 0.1 (0.25 for a looser gate)",
            ));
        }

        Ok(())
    }
}
