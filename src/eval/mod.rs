//! Model evaluation: regression quality and data drift.
//!
//! ## Architecture
//!
//! - `metrics`: RMSE and the other regression-quality figures
//! - `drift`: Statistical drift detection (KS, Chi-sq, Wasserstein, Jensen-Shannon, PSI)
//!
//! ## Example
//!
//! ```
//! use rodar::eval::{metrics, ColumnKind, DriftConfig, DriftDetector};
//!
//! let reference: Vec<f64> = (0..100).map(f64::from).collect();
//! let current: Vec<f64> = (50..150).map(f64::from).collect();
//!
//! let detector = DriftDetector::new(DriftConfig::default());
//! let drift = detector.check_column("temp", ColumnKind::Numeric, &reference, &current);
//! assert!(drift.drift_detected);
//!
//! let rmse = metrics::rmse(&reference, &reference).unwrap();
//! assert_eq!(rmse, 0.0);
//! ```

pub mod drift;
pub mod metrics;

pub use drift::{
    ColumnDrift, ColumnKind, DriftConfig, DriftDetector, DriftSummary, DriftTest, Severity,
    StatTestChoice,
};
pub use metrics::RegressionQuality;
