//! Monitoring report: drift and regression quality of current vs reference.
//!
//! One in-memory [`Report`] feeds both artifacts: pretty JSON for machines
//! and a self-contained HTML page for operators. The JSON carries nothing
//! run-dependent, so identical inputs produce byte-identical files.
//!
//! ## Example
//!
//! ```
//! use rodar::report::{Report, REPORT_VERSION};
//!
//! let report = Report { version: REPORT_VERSION, metrics: Vec::new() };
//! assert_eq!(report.dataset_drift(), None);
//! assert!(report.to_json().unwrap().contains("\"version\": 1"));
//! ```

pub mod html;
mod types;
pub mod verdict;

pub use types::{DataDriftTable, DatasetDrift, Metric, RegressionComparison, Report, REPORT_VERSION};
pub use verdict::{read_dataset_drift, write_flag, DATASET_DRIFT_POINTER};
