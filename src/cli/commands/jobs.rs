//! Job commands: train, monitor, retrain and run

use rodar_common::cli::{styles, Cli as Flags};
use rodar_common::Result;

use super::emit;
use crate::config::PipelineConfig;
use crate::pipeline::{
    bootstrap, monitor, retrainer, trainer, BootstrapOutcome, MonitorOutcome, RetrainOutcome,
    TrainOutcome,
};

pub fn format_train_summary(outcome: &TrainOutcome) -> String {
    let mut lines = vec![
        styles::header("Train"),
        styles::kv("Month", &outcome.month),
        styles::kv("Raw rows", outcome.raw_rows),
        styles::kv("Reference rows", outcome.reference_rows),
        styles::kv("Current rows", outcome.current_rows),
        styles::kv("Reference data", outcome.reference_path.display()),
        styles::kv("Current data", outcome.current_path.display()),
    ];
    if outcome.current_rows == 0 {
        lines.push(styles::warning("Current slice is empty"));
    }
    lines.push(styles::success(&format!("Model saved to {}", outcome.model_path.display())));
    lines.join("\n")
}

pub fn format_monitor_summary(outcome: &MonitorOutcome) -> String {
    let verdict = if outcome.dataset_drift {
        styles::warning("Dataset drift detected")
    } else {
        styles::success("No dataset drift")
    };
    [
        styles::header("Monitor"),
        styles::kv(
            "Drifted columns",
            format!("{}/{}", outcome.drifted_columns, outcome.total_columns),
        ),
        styles::kv("Reference RMSE", format!("{:.4}", outcome.reference_rmse)),
        styles::kv("Current RMSE", format!("{:.4}", outcome.current_rmse)),
        styles::kv("HTML report", outcome.report_html.display()),
        styles::kv("JSON report", outcome.report_json.display()),
        styles::kv("Drift flag", outcome.drift_flag.display()),
        verdict,
    ]
    .join("\n")
}

pub fn format_retrain_summary(outcome: &RetrainOutcome) -> String {
    let record = &outcome.record;
    let old = if record.incumbent_found {
        format!("{:.4}", record.old_model_rmse)
    } else {
        "none (no incumbent)".to_string()
    };
    let mut lines = vec![
        styles::header("Retrain"),
        styles::kv("Train rows", record.train_rows),
        styles::kv("Test rows", record.test_rows),
        styles::kv("Incumbent RMSE", old),
        styles::kv("Candidate RMSE", format!("{:.4}", record.new_model_rmse)),
        styles::kv("Validation record", outcome.validation_path.display()),
    ];
    if let Some(archived) = &record.archived_model {
        lines.push(styles::kv("Archived model", archived.display()));
    }
    lines.push(if outcome.promoted {
        styles::success(&format!("Candidate promoted to {}", outcome.model_path.display()))
    } else {
        styles::info("Incumbent kept")
    });
    lines.join("\n")
}

pub fn run_train(config: &PipelineConfig, flags: Flags) -> Result<()> {
    let outcome = trainer::run(config)?;
    emit(flags, &outcome, format_train_summary)
}

pub fn run_monitor(config: &PipelineConfig, flags: Flags) -> Result<()> {
    let outcome = monitor::run(config)?;
    emit(flags, &outcome, format_monitor_summary)
}

pub fn run_retrain(config: &PipelineConfig, flags: Flags) -> Result<()> {
    let outcome = retrainer::run(config)?;
    emit(flags, &outcome, format_retrain_summary)
}

pub fn run_bootstrap(config: &PipelineConfig, flags: Flags) -> Result<()> {
    let outcome = bootstrap::run(config)?;
    emit(flags, &outcome, |o: &BootstrapOutcome| {
        format!("{}\n\n{}", format_train_summary(&o.train), format_monitor_summary(&o.monitor))
    })
}
