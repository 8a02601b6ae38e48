//! Error types with actionable diagnostics (Andon principle).
//!
//! Every variant names the artifact or column involved and suggests the next
//! step, so a failed scheduled job can be fixed from its log line alone.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rodar operations.
pub type Result<T> = std::result::Result<T, RodarError>;

/// Errors that can occur across the rodar pipeline jobs.
#[derive(Error, Debug)]
pub enum RodarError {
    /// Configuration file not found at expected path.
    #[error("Configuration file not found: {path}\n  → Run `rodar init` or pass --config to point at an existing file")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file has invalid syntax.
    #[error("Invalid configuration syntax in {path}:\n  {message}\n  → Check YAML syntax at the indicated line")]
    ConfigParsing { path: PathBuf, message: String },

    /// Configuration value is invalid.
    #[error("Invalid configuration value for '{field}': {message}\n  → {suggestion}")]
    ConfigValue { field: String, message: String, suggestion: String },

    /// Dataset file not found.
    #[error("Dataset not found: {path}\n  → Provide the raw data file or run `rodar train` to produce the reference/current slices")]
    DatasetNotFound { path: PathBuf },

    /// Model artifact not found.
    #[error("Model artifact not found: {path}\n  → Run `rodar train` to fit the initial model")]
    ModelNotFound { path: PathBuf },

    /// Report artifact not found.
    #[error("Report not found: {path}\n  → Run `rodar monitor` to generate the report")]
    ReportNotFound { path: PathBuf },

    /// A required column is absent from a dataset.
    #[error("Missing column '{column}' in {path}\n  → The dataset must carry every configured feature, the target and the date column")]
    MissingColumn { column: String, path: PathBuf },

    /// A cell could not be parsed as the expected type.
    #[error("Invalid value '{value}' in column '{column}' at row {row}: expected {expected}")]
    InvalidValue { column: String, row: usize, value: String, expected: &'static str },

    /// A dataset or slice had no rows where rows were required.
    #[error("Empty dataset: {context}\n  → Check that the raw data covers the expected period")]
    EmptyDataset { context: String },

    /// The model was fitted on a different feature contract than configured.
    #[error("Feature contract mismatch: model expects {expected:?}, configuration declares {actual:?}\n  → Retrain the model with the current configuration")]
    FeatureContractMismatch { expected: Vec<String>, actual: Vec<String> },

    /// Two aligned sequences disagree in length.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// The structured report does not have the expected shape.
    #[error("Unexpected report schema in {path}: {detail}\n  → Regenerate the report with this version of rodar")]
    UnexpectedReportSchema { path: PathBuf, detail: String },

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic error for unexpected conditions.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RodarError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create a serialization error from any displayable cause.
    pub fn serialization(message: impl std::fmt::Display) -> Self {
        Self::Serialization { message: message.to_string() }
    }

    /// Check if this error is caused by missing or malformed inputs the
    /// operator can fix without touching code.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParsing { .. }
                | Self::ConfigValue { .. }
                | Self::DatasetNotFound { .. }
                | Self::ModelNotFound { .. }
                | Self::ReportNotFound { .. }
                | Self::MissingColumn { .. }
                | Self::InvalidValue { .. }
                | Self::EmptyDataset { .. }
                | Self::FeatureContractMismatch { .. }
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigNotFound { .. } => "E001",
            Self::ConfigParsing { .. } => "E002",
            Self::ConfigValue { .. } => "E003",
            Self::DatasetNotFound { .. } => "E010",
            Self::ModelNotFound { .. } => "E011",
            Self::ReportNotFound { .. } => "E012",
            Self::MissingColumn { .. } => "E020",
            Self::InvalidValue { .. } => "E021",
            Self::EmptyDataset { .. } => "E022",
            Self::FeatureContractMismatch { .. } => "E030",
            Self::ShapeMismatch { .. } => "E031",
            Self::UnexpectedReportSchema { .. } => "E040",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
            Self::Internal { .. } => "E999",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_variants() -> Vec<RodarError> {
        vec![
            RodarError::ConfigNotFound { path: "".into() },
            RodarError::ConfigParsing { path: "".into(), message: "".into() },
            RodarError::ConfigValue { field: "".into(), message: "".into(), suggestion: "".into() },
            RodarError::DatasetNotFound { path: "".into() },
            RodarError::ModelNotFound { path: "".into() },
            RodarError::ReportNotFound { path: "".into() },
            RodarError::MissingColumn { column: "".into(), path: "".into() },
            RodarError::InvalidValue { column: "".into(), row: 0, value: "".into(), expected: "" },
            RodarError::EmptyDataset { context: "".into() },
            RodarError::FeatureContractMismatch { expected: vec![], actual: vec![] },
            RodarError::ShapeMismatch { expected: 0, actual: 0 },
            RodarError::UnexpectedReportSchema { path: "".into(), detail: "".into() },
            RodarError::io("", std::io::Error::new(std::io::ErrorKind::Other, "x")),
            RodarError::Serialization { message: "".into() },
            RodarError::Internal { message: "".into() },
        ]
    }

    #[test]
    fn test_error_codes_are_unique() {
        let errors = all_variants();
        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_all_error_codes_start_with_e() {
        for err in all_variants() {
            assert!(err.code().starts_with('E'));
        }
    }

    #[test]
    fn test_missing_inputs_are_user_errors() {
        assert!(RodarError::DatasetNotFound { path: "hour.csv".into() }.is_user_error());
        assert!(RodarError::ModelNotFound { path: "model.json".into() }.is_user_error());
        assert!(!RodarError::Internal { message: "".into() }.is_user_error());
        assert!(!RodarError::UnexpectedReportSchema { path: "".into(), detail: "".into() }
            .is_user_error());
    }

    #[test]
    fn test_missing_column_names_column_and_file() {
        let err = RodarError::MissingColumn { column: "cnt".into(), path: "data/hour.csv".into() };
        let msg = err.to_string();
        assert!(msg.contains("cnt"));
        assert!(msg.contains("data/hour.csv"));
    }

    #[test]
    fn test_report_schema_error_is_explicit() {
        let err = RodarError::UnexpectedReportSchema {
            path: "reports/report.json".into(),
            detail: "missing /metrics/0/result/dataset_drift".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Unexpected report schema"));
        assert!(msg.contains("dataset_drift"));
    }

    #[test]
    fn test_io_error_constructor() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = RodarError::io("writing drift flag", io_err);

        assert!(matches!(err, RodarError::Io { .. }));
        assert!(err.to_string().contains("writing drift flag"));
    }

    #[test]
    fn test_invalid_value_reports_row() {
        let err = RodarError::InvalidValue {
            column: "temp".into(),
            row: 17,
            value: "warm".into(),
            expected: "a number",
        };
        let msg = err.to_string();
        assert!(msg.contains("row 17"));
        assert!(msg.contains("warm"));
    }
}
