//! CLI module for rodar
//!
//! This module contains all CLI command handlers.

mod commands;

pub use commands::{load_pipeline_config, run_command};

// Re-export Cli from config for convenience
pub use crate::config::Cli;
