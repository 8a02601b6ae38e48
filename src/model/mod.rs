//! Regression model: the random forest and the on-disk artifact.

mod artifact;
mod forest;

pub use artifact::{ModelArtifact, ProducingJob, TrainingMetadata, FORMAT_VERSION};
pub use forest::{ForestConfig, RandomForestRegressor};
