//! Shared infrastructure for rodar pipeline jobs.
//!
//! - Error handling with actionable diagnostics
//! - CLI flags, output styling and logging setup
//!
//! # Toyota Way Principles
//!
//! - **Jidoka**: Stop the job on bad input with a message that says how to fix it
//! - **Muda Elimination**: Single source of truth for shared code

pub mod cli;
pub mod error;

pub use cli::{CommonArgs, OutputFormat};
pub use error::{Result, RodarError};

pub use cli::Cli;
