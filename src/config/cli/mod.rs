//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! rodar train
//! rodar monitor --config rodar.yaml
//! rodar retrain --root /srv/bikes --format json
//! rodar run
//! rodar validate rodar.yaml
//! rodar init --output rodar.yaml
//! ```

mod core;


pub use core::{apply_overrides, parse_args, Cli, Command, InitArgs, ValidateArgs};
