//! Retrainer job: fit a candidate on a shuffled split of the full dataset and
//! promote it only when it beats the incumbent on the same test rows.

use chrono::Utc;
use rodar_common::{Result, RodarError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::config::{ConfigValidator, PipelineConfig};
use crate::data::{train_test_split, Frame};
use crate::eval::metrics::rmse;
use crate::io::{ensure_parent_dir, write_text};
use crate::model::{ModelArtifact, ProducingJob};

/// Comparison written after every retraining attempt.
///
/// `old_model_rmse` is `+inf` when no incumbent existed; JSON stores that as
/// `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRecord {
    #[serde(serialize_with = "inf_as_null", deserialize_with = "null_as_inf")]
    pub old_model_rmse: f64,
    pub new_model_rmse: f64,
    pub new_model_is_better: bool,
    #[serde(default)]
    pub incumbent_found: bool,
    #[serde(default)]
    pub train_rows: usize,
    #[serde(default)]
    pub test_rows: usize,
    #[serde(default)]
    pub archived_model: Option<PathBuf>,
}

fn inf_as_null<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

fn null_as_inf<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
}

impl ValidationRecord {
    /// JSON with four-space indentation and a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser).map_err(RodarError::serialization)?;
        let mut json = String::from_utf8(buf).map_err(RodarError::serialization)?;
        json.push('\n');
        Ok(json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_text(path, &self.to_json()?)
    }
}

/// What a retraining attempt decided.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrainOutcome {
    pub record: ValidationRecord,
    pub validation_path: PathBuf,
    pub model_path: PathBuf,
    /// Whether the model file was overwritten
    pub promoted: bool,
}

/// Run the retrainer job.
pub fn run(config: &PipelineConfig) -> Result<RetrainOutcome> {
    ConfigValidator::validate(config)?;
    let schema = &config.schema;

    let raw = Frame::load(config.raw_data_path())?;
    raw.require_columns(schema.required_columns())?;
    if raw.is_empty() {
        return Err(RodarError::EmptyDataset {
            context: format!("{} has no rows to retrain on", raw.source().display()),
        });
    }

    let split = train_test_split(raw.len(), config.split.test_ratio, config.split.seed);
    let train = raw.select_rows(&split.train);
    let test = raw.select_rows(&split.test);
    tracing::info!(
        train = train.len(),
        test = test.len(),
        seed = config.split.seed,
        "split raw records"
    );

    let candidate = ModelArtifact::train(schema, &config.forest, &train, ProducingJob::Retrain)?;
    let y_test = test.numeric_column(&schema.target)?;
    let new_model_rmse = rmse(&y_test, &candidate.predict(&test)?)?;

    let model_path = config.model_path();
    let incumbent = ModelArtifact::load_optional(&model_path)?;
    let old_model_rmse = match &incumbent {
        Some(model) => {
            model.ensure_schema(schema)?;
            rmse(&y_test, &model.predict(&test)?)?
        }
        None => {
            tracing::warn!(
                path = %model_path.display(),
                "no incumbent model; candidate wins by default"
            );
            f64::INFINITY
        }
    };

    let new_model_is_better = new_model_rmse < old_model_rmse;
    tracing::info!(old_model_rmse, new_model_rmse, new_model_is_better, "compared models");

    let archived_model = match (new_model_is_better, &incumbent, config.archive_dir()) {
        (true, Some(_), Some(dir)) => Some(archive_model(&model_path, &dir)?),
        _ => None,
    };

    let record = ValidationRecord {
        old_model_rmse,
        new_model_rmse,
        new_model_is_better,
        incumbent_found: incumbent.is_some(),
        train_rows: train.len(),
        test_rows: test.len(),
        archived_model,
    };
    let validation_path = config.validation_results_path();
    record.save(&validation_path)?;

    if new_model_is_better {
        candidate.save(&model_path)?;
    } else {
        tracing::info!(path = %model_path.display(), "kept incumbent model");
    }

    Ok(RetrainOutcome { record, validation_path, model_path, promoted: new_model_is_better })
}

/// Copy the model file into `dir` as `model-<UTC timestamp>.json`.
fn archive_model(model_path: &Path, dir: &Path) -> Result<PathBuf> {
    let stamp = Utc::now().format("%Y%m%dT%H%M%SZ").to_string();
    let target = archive_target(dir, &stamp);
    ensure_parent_dir(&target)?;
    std::fs::copy(model_path, &target).map_err(|e| {
        RodarError::io(format!("archiving {} to {}", model_path.display(), target.display()), e)
    })?;
    tracing::info!(
        from = %model_path.display(),
        to = %target.display(),
        "archived superseded model"
    );
    Ok(target)
}

/// First free archive name for `stamp`; same-second runs get a numeric suffix.
fn archive_target(dir: &Path, stamp: &str) -> PathBuf {
    let mut target = dir.join(format!("model-{stamp}.json"));
    let mut n = 1;
    while target.exists() {
        target = dir.join(format!("model-{stamp}-{n}.json"));
        n += 1;
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(old: f64) -> ValidationRecord {
        ValidationRecord {
            old_model_rmse: old,
            new_model_rmse: 12.5,
            new_model_is_better: 12.5 < old,
            incumbent_found: old.is_finite(),
            train_rows: 80,
            test_rows: 20,
            archived_model: None,
        }
    }

    #[test]
    fn test_infinite_old_rmse_is_null() {
        let json = record(f64::INFINITY).to_json().unwrap();
        assert!(json.contains("\"old_model_rmse\": null"));
        assert!(json.contains("\n    \"new_model_rmse\": 12.5"));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_record_roundtrip_restores_infinity() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("validation_results.json");
        let load = |path: &Path| -> ValidationRecord {
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
        };

        record(f64::INFINITY).save(&path).unwrap();
        let loaded = load(&path);
        assert!(loaded.old_model_rmse.is_infinite());
        assert!(loaded.new_model_is_better);

        record(10.0).save(&path).unwrap();
        assert_eq!(load(&path), record(10.0));
    }

    #[test]
    fn test_minimal_record_parses() {
        let record: ValidationRecord = serde_json::from_str(
            r#"{"old_model_rmse": 3.0, "new_model_rmse": 2.0, "new_model_is_better": true}"#,
        )
        .unwrap();
        assert_eq!(record.old_model_rmse, 3.0);
        assert!(!record.incumbent_found);
    }

    #[test]
    fn test_archive_target_avoids_collisions() {
        let dir = TempDir::new().unwrap();
        let first = archive_target(dir.path(), "20240101T000000Z");
        assert!(first.ends_with("model-20240101T000000Z.json"));

        std::fs::write(&first, "{}").unwrap();
        let second = archive_target(dir.path(), "20240101T000000Z");
        assert!(second.ends_with("model-20240101T000000Z-1.json"));
    }
}
