//! Report data types and construction.

use rodar_common::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::FeatureSchema;
use crate::data::Frame;
use crate::eval::{ColumnDrift, DriftConfig, DriftDetector, RegressionQuality};
use crate::io::{to_json_pretty, write_text};

/// Report layout version; readers refuse any other value.
pub const REPORT_VERSION: u32 = 1;

/// Dataset-level drift verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDrift {
    pub drift_share: f64,
    pub number_of_columns: usize,
    pub number_of_drifted_columns: usize,
    pub share_of_drifted_columns: f64,
    pub dataset_drift: bool,
}

/// Per-column drift results, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDriftTable {
    pub number_of_columns: usize,
    pub number_of_drifted_columns: usize,
    pub share_of_drifted_columns: f64,
    pub dataset_drift: bool,
    pub drift_by_columns: Vec<ColumnDrift>,
}

/// Regression quality of the model on both slices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionComparison {
    pub reference: RegressionQuality,
    pub current: RegressionQuality,
}

/// One report section, serialized as `{"metric": <name>, "result": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metric", content = "result")]
pub enum Metric {
    DatasetDriftMetric(DatasetDrift),
    DataDriftTable(DataDriftTable),
    RegressionQualityMetric(RegressionComparison),
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::DatasetDriftMetric(_) => "DatasetDriftMetric",
            Metric::DataDriftTable(_) => "DataDriftTable",
            Metric::RegressionQualityMetric(_) => "RegressionQualityMetric",
        }
    }
}

/// Monitoring report. The dataset-drift metric is always first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub version: u32,
    pub metrics: Vec<Metric>,
}

impl Report {
    /// Compare `current` against `reference`.
    ///
    /// Both frames must carry the schema's features, target and prediction
    /// column.
    pub fn build(
        reference: &Frame,
        current: &Frame,
        schema: &FeatureSchema,
        drift: &DriftConfig,
    ) -> Result<Self> {
        let detector = DriftDetector::new(drift.clone());
        let columns = detector.check_frame(reference, current, schema)?;
        let summary = detector.summary(&columns);
        let share = summary.share_of_drifted();
        let dataset_drift = summary.dataset_drift();

        tracing::info!(
            columns = summary.total_columns,
            drifted = summary.drifted_columns,
            warnings = summary.warnings,
            dataset_drift,
            "drift checked"
        );

        let quality = |frame: &Frame| -> Result<RegressionQuality> {
            let target = frame.numeric_column(&schema.target)?;
            let prediction = frame.numeric_column(&schema.prediction)?;
            RegressionQuality::compute(&target, &prediction)
        };
        let regression =
            RegressionComparison { reference: quality(reference)?, current: quality(current)? };

        Ok(Self {
            version: REPORT_VERSION,
            metrics: vec![
                Metric::DatasetDriftMetric(DatasetDrift {
                    drift_share: summary.drift_share,
                    number_of_columns: summary.total_columns,
                    number_of_drifted_columns: summary.drifted_columns,
                    share_of_drifted_columns: share,
                    dataset_drift,
                }),
                Metric::DataDriftTable(DataDriftTable {
                    number_of_columns: summary.total_columns,
                    number_of_drifted_columns: summary.drifted_columns,
                    share_of_drifted_columns: share,
                    dataset_drift,
                    drift_by_columns: columns,
                }),
                Metric::RegressionQualityMetric(regression),
            ],
        })
    }

    /// Dataset-level verdict, if the report carries one.
    pub fn dataset_drift(&self) -> Option<bool> {
        self.metrics.iter().find_map(|m| match m {
            Metric::DatasetDriftMetric(d) => Some(d.dataset_drift),
            _ => None,
        })
    }

    pub fn drift_table(&self) -> Option<&DataDriftTable> {
        self.metrics.iter().find_map(|m| match m {
            Metric::DataDriftTable(t) => Some(t),
            _ => None,
        })
    }

    pub fn regression(&self) -> Option<&RegressionComparison> {
        self.metrics.iter().find_map(|m| match m {
            Metric::RegressionQualityMetric(r) => Some(r),
            _ => None,
        })
    }

    /// Pretty JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        to_json_pretty(self)
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        write_text(path, &self.to_json()?)
    }

    pub fn save_html(&self, path: impl AsRef<Path>) -> Result<()> {
        write_text(path, &super::html::render(self))
    }
}
