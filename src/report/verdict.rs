//! Drift verdict: read the dataset-level boolean back from a saved report
//! and publish it as a flag file for CI gates.

use rodar_common::{Result, RodarError};
use serde_json::Value;
use std::path::Path;

use super::types::REPORT_VERSION;
use crate::io::{read_text, write_text};

/// JSON pointer to the dataset-level drift boolean.
pub const DATASET_DRIFT_POINTER: &str = "/metrics/0/result/dataset_drift";

/// Read `metrics[0].result.dataset_drift` from a JSON report.
///
/// Anything other than a report of the current version with a boolean at
/// that location is [`RodarError::UnexpectedReportSchema`]; it is never read
/// as `false`.
pub fn read_dataset_drift(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    let unexpected = |detail: String| RodarError::UnexpectedReportSchema {
        path: path.to_path_buf(),
        detail,
    };

    let content = read_text(path, |path| RodarError::ReportNotFound { path })?;
    let value: Value =
        serde_json::from_str(&content).map_err(|e| unexpected(format!("not valid JSON: {e}")))?;

    match value.get("version").and_then(Value::as_u64) {
        Some(v) if v == u64::from(REPORT_VERSION) => {}
        Some(v) => return Err(unexpected(format!("version {v}, expected {REPORT_VERSION}"))),
        None => return Err(unexpected("missing numeric 'version'".into())),
    }

    match value.pointer(DATASET_DRIFT_POINTER) {
        Some(Value::Bool(drift)) => Ok(*drift),
        Some(other) => Err(unexpected(format!("{DATASET_DRIFT_POINTER} is {other}, expected a boolean"))),
        None => Err(unexpected(format!("{DATASET_DRIFT_POINTER} not found"))),
    }
}

/// Write `true` or `false` with no trailing newline.
pub fn write_flag(path: impl AsRef<Path>, drift: bool) -> Result<()> {
    let path = path.as_ref();
    write_text(path, if drift { "true" } else { "false" })?;
    tracing::info!(path = %path.display(), drift, "wrote drift flag");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("report.json");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reads_boolean() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"{"version": 1, "metrics": [{"metric": "DatasetDriftMetric", "result": {"dataset_drift": true}}]}"#,
        );
        assert!(read_dataset_drift(&path).unwrap());
    }

    #[test]
    fn test_missing_field_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"version": 1, "metrics": [{"metric": "X", "result": {}}]}"#);
        let err = read_dataset_drift(&path).unwrap_err();
        assert_eq!(err.code(), "E040");
        assert!(err.to_string().contains("dataset_drift"));

        let path = write(&dir, r#"{"version": 1, "metrics": []}"#);
        assert_eq!(read_dataset_drift(&path).unwrap_err().code(), "E040");
    }

    #[test]
    fn test_non_boolean_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            r#"{"version": 1, "metrics": [{"result": {"dataset_drift": "false"}}]}"#,
        );
        assert_eq!(read_dataset_drift(&path).unwrap_err().code(), "E040");
    }

    #[test]
    fn test_version_mismatch_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, r#"{"version": 2, "metrics": [{"result": {"dataset_drift": true}}]}"#);
        assert_eq!(read_dataset_drift(&path).unwrap_err().code(), "E040");

        let path = write(&dir, r#"{"metrics": [{"result": {"dataset_drift": true}}]}"#);
        assert_eq!(read_dataset_drift(&path).unwrap_err().code(), "E040");
    }

    #[test]
    fn test_invalid_json_is_schema_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "not json");
        assert_eq!(read_dataset_drift(&path).unwrap_err().code(), "E040");
    }

    #[test]
    fn test_missing_report() {
        let err = read_dataset_drift("/nope/report.json").unwrap_err();
        assert!(matches!(err, RodarError::ReportNotFound { .. }));
    }

    #[test]
    fn test_write_flag_has_no_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reports/drift_status.txt");
        write_flag(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "true");
        write_flag(&path, false).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "false");
    }
}
