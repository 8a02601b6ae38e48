//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use rodar_common::CommonArgs;
use std::path::PathBuf;

use crate::config::{PipelineConfig, DEFAULT_CONFIG_FILE};

/// Rodar: bike-rental model training, drift monitoring and guarded retraining
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "rodar")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Train, monitor and retrain the bike-rental demand model")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Pipeline configuration file (default: <root>/rodar.yaml if present)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the project root artifact paths are resolved against
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

impl Cli {
    /// Configuration file to load: `--config`, else the default file under
    /// the root when it exists.
    pub fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config {
            return Some(path.clone());
        }
        let root = self.root.clone().unwrap_or_else(|| PathBuf::from("."));
        let default = root.join(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Split the latest month and fit the first model on the reference slice
    Train,

    /// Score both slices, write the drift report and the drift flag
    Monitor,

    /// Fit a candidate on a shuffled split and promote it if it beats the incumbent
    Retrain,

    /// Train, then monitor (first-time bootstrap)
    Run,

    /// Validate a configuration file without running any job
    Validate(ValidateArgs),

    /// Write a default configuration file
    Init(InitArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub file: PathBuf,

    /// Show the resolved configuration
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the init command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InitArgs {
    /// Where to write the configuration
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a loaded configuration
pub fn apply_overrides(config: &mut PipelineConfig, cli: &Cli) {
    if let Some(root) = &cli.root {
        config.root = root.clone();
    }
}
