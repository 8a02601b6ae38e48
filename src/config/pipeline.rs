//! Pipeline configuration shared by the train, monitor and retrain jobs.
//!
//! Supports YAML configuration files; every field has a default reproducing
//! the bike-sharing project layout, so an empty file is a valid config.

use rodar_common::{Result, RodarError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::schema::FeatureSchema;
use crate::eval::drift::DriftConfig;
use crate::model::ForestConfig;

/// Configuration file picked up from the project root when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "rodar.yaml";

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Project root that relative artifact paths are resolved against
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Artifact locations
    #[serde(default)]
    pub paths: PathsConfig,
    /// Feature-column contract
    #[serde(default)]
    pub schema: FeatureSchema,
    /// Partitioning and train/test split
    #[serde(default)]
    pub split: SplitConfig,
    /// Random forest hyperparameters
    #[serde(default)]
    pub forest: ForestConfig,
    /// Drift report settings
    #[serde(default)]
    pub drift: DriftConfig,
    /// Model promotion settings
    #[serde(default)]
    pub retrain: RetrainConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            paths: PathsConfig::default(),
            schema: FeatureSchema::default(),
            split: SplitConfig::default(),
            forest: ForestConfig::default(),
            drift: DriftConfig::default(),
            retrain: RetrainConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RodarError::ConfigNotFound { path: path.to_path_buf() });
        }
        let content = std::fs::read_to_string(path).map_err(|e| RodarError::Io {
            context: format!("reading config file: {}", path.display()),
            source: e,
        })?;

        Self::from_yaml(&content, path)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self> {
        // serde_yaml rejects an empty document; treat it as "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| RodarError::ConfigParsing {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Render as YAML (used by `rodar init`).
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(RodarError::serialization)
    }

    /// Replace the project root.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Resolve an artifact path against the project root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn raw_data_path(&self) -> PathBuf {
        self.resolve(&self.paths.raw_data)
    }

    pub fn reference_data_path(&self) -> PathBuf {
        self.resolve(&self.paths.reference_data)
    }

    pub fn current_data_path(&self) -> PathBuf {
        self.resolve(&self.paths.current_data)
    }

    pub fn model_path(&self) -> PathBuf {
        self.resolve(&self.paths.model)
    }

    pub fn report_html_path(&self) -> PathBuf {
        self.resolve(&self.paths.report_html)
    }

    pub fn report_json_path(&self) -> PathBuf {
        self.resolve(&self.paths.report_json)
    }

    pub fn drift_flag_path(&self) -> PathBuf {
        self.resolve(&self.paths.drift_flag)
    }

    pub fn validation_results_path(&self) -> PathBuf {
        self.resolve(&self.paths.validation_results)
    }

    /// Archive directory for superseded models, if enabled.
    pub fn archive_dir(&self) -> Option<PathBuf> {
        self.retrain.archive_dir.as_deref().map(|p| self.resolve(p))
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Artifact locations, relative to the project root unless absolute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_raw_data")]
    pub raw_data: PathBuf,
    #[serde(default = "default_reference_data")]
    pub reference_data: PathBuf,
    #[serde(default = "default_current_data")]
    pub current_data: PathBuf,
    #[serde(default = "default_model")]
    pub model: PathBuf,
    #[serde(default = "default_report_html")]
    pub report_html: PathBuf,
    #[serde(default = "default_report_json")]
    pub report_json: PathBuf,
    #[serde(default = "default_drift_flag")]
    pub drift_flag: PathBuf,
    #[serde(default = "default_validation_results")]
    pub validation_results: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_data: default_raw_data(),
            reference_data: default_reference_data(),
            current_data: default_current_data(),
            model: default_model(),
            report_html: default_report_html(),
            report_json: default_report_json(),
            drift_flag: default_drift_flag(),
            validation_results: default_validation_results(),
        }
    }
}

fn default_raw_data() -> PathBuf {
    PathBuf::from("data/hour.csv")
}

fn default_reference_data() -> PathBuf {
    PathBuf::from("data/reference_data.csv")
}

fn default_current_data() -> PathBuf {
    PathBuf::from("data/current_data.csv")
}

fn default_model() -> PathBuf {
    PathBuf::from("models/model.json")
}

fn default_report_html() -> PathBuf {
    PathBuf::from("reports/model_performance_dashboard.html")
}

fn default_report_json() -> PathBuf {
    PathBuf::from("reports/model_performance_report.json")
}

fn default_drift_flag() -> PathBuf {
    PathBuf::from("reports/drift_status.txt")
}

fn default_validation_results() -> PathBuf {
    PathBuf::from("validation_results.json")
}

/// Partitioning and train/test split settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// ISO-date column used to find the latest month
    #[serde(default = "default_date_column")]
    pub date_column: String,
    /// Last day-of-month that belongs to the reference slice
    #[serde(default = "default_split_day")]
    pub split_day: u32,
    /// Fraction of rows held out by the retrainer
    #[serde(default = "default_test_ratio")]
    pub test_ratio: f64,
    /// Shuffle seed for the retrainer's split
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            date_column: default_date_column(),
            split_day: default_split_day(),
            test_ratio: default_test_ratio(),
            seed: default_seed(),
        }
    }
}

fn default_date_column() -> String {
    "dteday".to_string()
}

fn default_split_day() -> u32 {
    20
}

fn default_test_ratio() -> f64 {
    0.2
}

fn default_seed() -> u64 {
    42
}

/// Model promotion settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RetrainConfig {
    /// Copy the superseded model here before overwriting it.
    /// `None` keeps the single-artifact overwrite.
    #[serde(default)]
    pub archive_dir: Option<PathBuf>,
}
