//! Trainer job: split the latest month into reference and current slices and
//! fit the first model on the reference slice.

use rodar_common::{Result, RodarError};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::{ConfigValidator, PipelineConfig};
use crate::data::{partition_latest_month, Frame};
use crate::model::{ModelArtifact, ProducingJob};

/// What a training run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainOutcome {
    /// Partitioned month, `YYYY-MM`
    pub month: String,
    pub raw_rows: usize,
    pub reference_rows: usize,
    pub current_rows: usize,
    pub reference_path: PathBuf,
    pub current_path: PathBuf,
    pub model_path: PathBuf,
}

/// Run the trainer job.
pub fn run(config: &PipelineConfig) -> Result<TrainOutcome> {
    ConfigValidator::validate(config)?;

    let raw_path = config.raw_data_path();
    tracing::info!(path = %raw_path.display(), "loading raw records");
    let raw = Frame::load(&raw_path)?;

    let date_column = config.split.date_column.as_str();
    raw.require_columns(std::iter::once(date_column).chain(config.schema.required_columns()))?;

    let partition = partition_latest_month(&raw, date_column, config.split.split_day)?;
    tracing::info!(
        month = %partition.label(),
        reference = partition.reference.len(),
        current = partition.current.len(),
        "partitioned latest month"
    );

    if partition.reference.is_empty() {
        return Err(RodarError::EmptyDataset {
            context: format!(
                "no rows of {} fall on day {} or earlier",
                partition.label(),
                config.split.split_day
            ),
        });
    }
    if partition.current.is_empty() {
        tracing::warn!(
            month = %partition.label(),
            split_day = config.split.split_day,
            "current slice is empty; monitor will have nothing to compare"
        );
    }

    let reference_path = config.reference_data_path();
    let current_path = config.current_data_path();
    partition.reference.save(&reference_path)?;
    partition.current.save(&current_path)?;

    let artifact = ModelArtifact::train(
        &config.schema,
        &config.forest,
        &partition.reference,
        ProducingJob::Train,
    )?;
    let model_path = config.model_path();
    artifact.save(&model_path)?;

    Ok(TrainOutcome {
        month: partition.label(),
        raw_rows: raw.len(),
        reference_rows: partition.reference.len(),
        current_rows: partition.current.len(),
        reference_path,
        current_path,
        model_path,
    })
}
