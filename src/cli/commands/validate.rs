//! Validate command implementation

use rodar_common::cli::{styles, Cli as Flags};
use rodar_common::{OutputFormat, Result};

use crate::config::{apply_overrides, Cli, ConfigValidator, PipelineConfig, ValidateArgs};

/// Format the resolved artifact paths as a string
pub fn format_paths_info(config: &PipelineConfig) -> String {
    [
        styles::kv("Raw data", config.raw_data_path().display()),
        styles::kv("Reference data", config.reference_data_path().display()),
        styles::kv("Current data", config.current_data_path().display()),
        styles::kv("Model", config.model_path().display()),
        styles::kv("HTML report", config.report_html_path().display()),
        styles::kv("JSON report", config.report_json_path().display()),
        styles::kv("Drift flag", config.drift_flag_path().display()),
        styles::kv("Validation record", config.validation_results_path().display()),
    ]
    .join("\n")
}

/// Format the schema, split and forest settings as a string
pub fn format_settings_info(config: &PipelineConfig) -> String {
    let mut lines = vec![
        styles::kv("Numeric features", config.schema.numeric.join(", ")),
        styles::kv("Categorical features", config.schema.categorical.join(", ")),
        styles::kv("Target", &config.schema.target),
        styles::kv(
            "Split",
            format!(
                "{} day <= {} | test ratio {} | seed {}",
                config.split.date_column,
                config.split.split_day,
                config.split.test_ratio,
                config.split.seed
            ),
        ),
        styles::kv("Trees", config.forest.n_trees),
        styles::kv("Drift share", config.drift.drift_share),
    ];
    if let Some(dir) = config.archive_dir() {
        lines.push(styles::kv("Archive dir", dir.display()));
    }
    lines.join("\n")
}

pub fn run_validate(args: &ValidateArgs, cli: &Cli, flags: Flags) -> Result<()> {
    tracing::info!(path = %args.file.display(), "validating config");

    let mut config = PipelineConfig::from_file(&args.file)?;
    apply_overrides(&mut config, cli);
    ConfigValidator::validate(&config)?;

    if flags.is_quiet() {
        return Ok(());
    }
    match flags.format {
        OutputFormat::Json => print!("{}", crate::io::to_json_pretty(&config)?),
        OutputFormat::Text => {
            println!("{}", styles::success(&format!("{} is valid", args.file.display())));
            if args.detailed || flags.is_verbose() {
                println!("{}", format_paths_info(&config));
                println!("{}", format_settings_info(&config));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_paths_info_resolves_root() {
        let config = PipelineConfig::default().with_root("/srv/bikes");
        let info = format_paths_info(&config);
        assert!(info.contains("/srv/bikes/data/hour.csv"));
        assert!(info.contains("/srv/bikes/reports/drift_status.txt"));
    }

    #[test]
    fn test_format_settings_info() {
        let mut config = PipelineConfig::default();
        config.retrain.archive_dir = Some(PathBuf::from("models/archive"));
        let info = format_settings_info(&config);
        assert!(info.contains("temp, atemp, hum, windspeed"));
        assert!(info.contains("dteday day <= 20"));
        assert!(info.contains("models/archive"));
    }

    #[test]
    fn test_format_settings_info_no_archive() {
        let info = format_settings_info(&PipelineConfig::default());
        assert!(!info.contains("Archive dir"));
    }
}
