//! Persisted model: the fitted forest plus the feature contract it was
//! trained with.

use rodar_common::{Result, RodarError};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::forest::{ForestConfig, RandomForestRegressor};
use crate::config::FeatureSchema;
use crate::data::Frame;
use crate::io::{read_json, write_json};

/// Artifact layout version; bumped on incompatible changes.
pub const FORMAT_VERSION: u32 = 1;

/// Which job produced an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProducingJob {
    Train,
    Retrain,
}

impl std::fmt::Display for ProducingJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProducingJob::Train => write!(f, "train"),
            ProducingJob::Retrain => write!(f, "retrain"),
        }
    }
}

/// Provenance of a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    pub job: ProducingJob,
    pub train_rows: usize,
    /// SHA-256 of the training rows' text
    pub data_fingerprint: String,
    pub rodar_version: String,
}

/// Model artifact as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub schema: FeatureSchema,
    pub forest: RandomForestRegressor,
    pub metadata: TrainingMetadata,
}

impl ModelArtifact {
    /// Fit a forest on `frame` using the schema's features and target.
    pub fn train(
        schema: &FeatureSchema,
        forest: &ForestConfig,
        frame: &Frame,
        job: ProducingJob,
    ) -> Result<Self> {
        let x = frame.feature_matrix(schema)?;
        let y = frame.numeric_column(&schema.target)?;
        let fitted = RandomForestRegressor::fit(forest, &x, &y)?;

        Ok(Self {
            format_version: FORMAT_VERSION,
            schema: schema.clone(),
            forest: fitted,
            metadata: TrainingMetadata {
                job,
                train_rows: frame.len(),
                data_fingerprint: frame.fingerprint(),
                rodar_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        })
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_json(path, self)?;
        tracing::info!(path = %path.display(), trees = self.forest.n_trees(), "saved model");
        Ok(())
    }

    /// Load and structurally check an artifact.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let artifact: Self = read_json(path, |path| RodarError::ModelNotFound { path })?;

        if artifact.format_version != FORMAT_VERSION {
            return Err(RodarError::serialization(format!(
                "{} has format_version {}, expected {FORMAT_VERSION}",
                path.display(),
                artifact.format_version
            )));
        }
        if !artifact.forest.is_well_formed()
            || artifact.forest.n_features() != artifact.schema.n_features()
        {
            return Err(RodarError::serialization(format!(
                "{} does not contain a usable forest",
                path.display()
            )));
        }
        Ok(artifact)
    }

    /// Like [`load`](Self::load), but a missing file is `Ok(None)`.
    pub fn load_optional(path: impl AsRef<Path>) -> Result<Option<Self>> {
        match Self::load(path) {
            Ok(artifact) => Ok(Some(artifact)),
            Err(RodarError::ModelNotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Refuse to serve a consumer configured with a different contract.
    pub fn ensure_schema(&self, configured: &FeatureSchema) -> Result<()> {
        if self.schema.is_compatible_with(configured) {
            Ok(())
        } else {
            Err(RodarError::FeatureContractMismatch {
                expected: self.schema.contract(),
                actual: configured.contract(),
            })
        }
    }

    /// One prediction per row of `frame`, in row order.
    pub fn predict(&self, frame: &Frame) -> Result<Vec<f64>> {
        let x = frame.feature_matrix(&self.schema)?;
        let predictions = self.forest.predict(&x)?;
        if let Some(row) = predictions.iter().position(|p| !p.is_finite()) {
            return Err(RodarError::Internal {
                message: format!("non-finite prediction for row {}", row + 1),
            });
        }
        Ok(predictions)
    }
}
