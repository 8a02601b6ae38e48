//! Feature-column contract shared by every job.
//!
//! The model consumes `numeric ++ categorical` in exactly this order; the
//! artifact stores the schema it was fitted with so consumers can refuse a
//! model trained on a different contract.

use serde::{Deserialize, Serialize};

/// Column roles for the rental-count regression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Continuous features
    #[serde(default = "default_numeric")]
    pub numeric: Vec<String>,
    /// Integer-coded categorical features
    #[serde(default = "default_categorical")]
    pub categorical: Vec<String>,
    /// Regression target
    #[serde(default = "default_target")]
    pub target: String,
    /// Name of the column Monitor appends with model output
    #[serde(default = "default_prediction")]
    pub prediction: String,
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self {
            numeric: default_numeric(),
            categorical: default_categorical(),
            target: default_target(),
            prediction: default_prediction(),
        }
    }
}

fn default_numeric() -> Vec<String> {
    ["temp", "atemp", "hum", "windspeed"].iter().map(|s| s.to_string()).collect()
}

fn default_categorical() -> Vec<String> {
    ["season", "yr", "mnth", "hr", "holiday", "weekday", "workingday", "weathersit"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_target() -> String {
    "cnt".to_string()
}

fn default_prediction() -> String {
    "prediction".to_string()
}

impl FeatureSchema {
    /// Model input columns: numeric features first, then categorical.
    pub fn model_features(&self) -> Vec<String> {
        self.numeric.iter().chain(self.categorical.iter()).cloned().collect()
    }

    /// Number of model input columns.
    pub fn n_features(&self) -> usize {
        self.numeric.len() + self.categorical.len()
    }

    /// Columns a labelled dataset must carry.
    pub fn required_columns(&self) -> Vec<&str> {
        self.numeric
            .iter()
            .chain(self.categorical.iter())
            .map(String::as_str)
            .chain(std::iter::once(self.target.as_str()))
            .collect()
    }

    pub fn is_categorical(&self, column: &str) -> bool {
        self.categorical.iter().any(|c| c == column)
    }

    /// Role-tagged description used to compare producer and consumer contracts.
    ///
    /// The prediction column names Monitor's output, not a model input, and
    /// is not part of the contract.
    pub fn contract(&self) -> Vec<String> {
        self.numeric
            .iter()
            .map(|c| format!("numeric:{c}"))
            .chain(self.categorical.iter().map(|c| format!("categorical:{c}")))
            .chain(std::iter::once(format!("target:{}", self.target)))
            .collect()
    }

    /// Whether a model fitted on `self` can serve a consumer configured with `other`.
    pub fn is_compatible_with(&self, other: &FeatureSchema) -> bool {
        self.contract() == other.contract()
    }
}
