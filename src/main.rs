//! Rodar CLI
//!
//! Batch jobs for the bike-rental demand model.
//!
//! # Usage
//!
//! ```bash
//! # Fit the first model on the reference slice of the latest month
//! rodar train
//!
//! # Drift and regression report, plus the CI drift flag
//! rodar monitor
//!
//! # Fit a candidate and promote it only if it beats the incumbent
//! rodar retrain --config rodar.yaml
//!
//! # Train and monitor in one go
//! rodar run --root /srv/bikes
//!
//! # Check a configuration file
//! rodar validate rodar.yaml
//! ```

use clap::Parser;
use rodar::cli::{run_command, Cli};
use rodar_common::cli::{init_logging, styles};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.common.to_cli());

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} [{}]", styles::error(&e.to_string()), e.code());
            ExitCode::FAILURE
        }
    }
}
