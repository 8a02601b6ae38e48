//! CLI command implementations

mod init;
mod jobs;
mod validate;


use rodar_common::cli::Cli as Flags;
use rodar_common::{OutputFormat, Result};
use serde::Serialize;

use crate::config::{apply_overrides, Cli, Command, PipelineConfig};
use crate::io::to_json_pretty;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<()> {
    let flags = cli.common.to_cli();

    match &cli.command {
        Command::Train => jobs::run_train(&load_pipeline_config(&cli)?, flags),
        Command::Monitor => jobs::run_monitor(&load_pipeline_config(&cli)?, flags),
        Command::Retrain => jobs::run_retrain(&load_pipeline_config(&cli)?, flags),
        Command::Run => jobs::run_bootstrap(&load_pipeline_config(&cli)?, flags),
        Command::Validate(args) => validate::run_validate(args, &cli, flags),
        Command::Init(args) => init::run_init(args, flags),
    }
}

/// Load the configuration the job commands run with: the file from
/// [`Cli::config_path`], or the built-in defaults, then the CLI overrides.
pub fn load_pipeline_config(cli: &Cli) -> Result<PipelineConfig> {
    let mut config = match cli.config_path() {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            PipelineConfig::from_file(&path)?
        }
        None => PipelineConfig::default(),
    };
    apply_overrides(&mut config, cli);
    Ok(config)
}

/// Print a command summary in the requested format; nothing in quiet mode.
fn emit<T: Serialize>(flags: Flags, value: &T, text: impl FnOnce(&T) -> String) -> Result<()> {
    if flags.is_quiet() {
        return Ok(());
    }
    match flags.format {
        OutputFormat::Json => print!("{}", to_json_pretty(value)?),
        OutputFormat::Text => println!("{}", text(value)),
    }
    Ok(())
}
