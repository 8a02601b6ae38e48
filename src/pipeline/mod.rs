//! The three batch jobs and their composition.
//!
//! Jobs share nothing but the file paths of one [`PipelineConfig`]:
//!
//! - [`trainer`]: partition the latest month, fit on the reference slice
//! - [`monitor`]: score both slices, write the report and the drift flag
//! - [`retrainer`]: fit a candidate on a shuffled split, promote it only if
//!   it beats the incumbent's RMSE
//! - [`bootstrap`]: trainer followed by monitor
//!
//! [`PipelineConfig`]: crate::config::PipelineConfig

pub mod bootstrap;
pub mod monitor;
pub mod retrainer;
pub mod trainer;

pub use bootstrap::BootstrapOutcome;
pub use monitor::MonitorOutcome;
pub use retrainer::{RetrainOutcome, ValidationRecord};
pub use trainer::TrainOutcome;
