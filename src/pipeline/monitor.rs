//! Monitor job: score both slices with the deployed model, persist the
//! report and publish the drift flag.

use rodar_common::{Result, RodarError};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{ConfigValidator, PipelineConfig};
use crate::data::Frame;
use crate::model::ModelArtifact;
use crate::report::{read_dataset_drift, write_flag, Report};

/// What a monitoring run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonitorOutcome {
    /// Verdict as read back from the saved JSON report
    pub dataset_drift: bool,
    pub drifted_columns: usize,
    pub total_columns: usize,
    pub reference_rmse: f64,
    pub current_rmse: f64,
    pub report_html: PathBuf,
    pub report_json: PathBuf,
    pub drift_flag: PathBuf,
}

/// Run the monitor job.
pub fn run(config: &PipelineConfig) -> Result<MonitorOutcome> {
    ConfigValidator::validate(config)?;
    let schema = &config.schema;

    let reference = Frame::load(config.reference_data_path())?;
    let current = Frame::load(config.current_data_path())?;
    let model = ModelArtifact::load(config.model_path())?;
    model.ensure_schema(schema)?;

    for (name, frame) in [("reference", &reference), ("current", &current)] {
        frame.require_columns(schema.required_columns())?;
        if frame.is_empty() {
            return Err(RodarError::EmptyDataset {
                context: format!("{name} dataset {} has no rows", frame.source().display()),
            });
        }
    }

    let reference = reference.with_column(&schema.prediction, &model.predict(&reference)?)?;
    let current = current.with_column(&schema.prediction, &model.predict(&current)?)?;
    tracing::info!(reference = reference.len(), current = current.len(), "scored both slices");

    let report = Report::build(&reference, &current, schema, &config.drift)?;

    let report_html = config.report_html_path();
    let report_json = config.report_json_path();
    report.save_html(&report_html)?;
    report.save_json(&report_json)?;
    tracing::info!(html = %report_html.display(), json = %report_json.display(), "saved report");

    let dataset_drift = read_dataset_drift(&report_json)?;
    let drift_flag = config.drift_flag_path();
    write_flag(&drift_flag, dataset_drift)?;

    let figures = ReportFigures::read(&report, &report_json)?;

    Ok(MonitorOutcome {
        dataset_drift,
        drifted_columns: figures.drifted_columns,
        total_columns: figures.total_columns,
        reference_rmse: figures.reference_rmse,
        current_rmse: figures.current_rmse,
        report_html,
        report_json,
        drift_flag,
    })
}

/// Column counts and RMSEs pulled from a built report.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ReportFigures {
    drifted_columns: usize,
    total_columns: usize,
    reference_rmse: f64,
    current_rmse: f64,
}

impl ReportFigures {
    fn read(report: &Report, path: &Path) -> Result<Self> {
        let missing = |metric: &str| RodarError::UnexpectedReportSchema {
            path: path.to_path_buf(),
            detail: format!("report has no {metric} metric"),
        };
        let table = report.drift_table().ok_or_else(|| missing("DataDriftTable"))?;
        let regression = report.regression().ok_or_else(|| missing("RegressionQualityMetric"))?;
        Ok(Self {
            drifted_columns: table.number_of_drifted_columns,
            total_columns: table.number_of_columns,
            reference_rmse: regression.reference.rmse,
            current_rmse: regression.current.rmse,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::REPORT_VERSION;

    #[test]
    fn test_report_without_metrics_is_schema_error() {
        let report = Report { version: REPORT_VERSION, metrics: vec![] };
        let err = ReportFigures::read(&report, Path::new("reports/report.json")).unwrap_err();
        assert_eq!(err.code(), "E040");
        assert!(err.to_string().contains("DataDriftTable"));
    }
}
