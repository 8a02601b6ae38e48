//! CLI flags, output styling and logging setup shared by rodar binaries.

use clap::Args;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Output format for command summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {s}. Valid formats: text, json")),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Flags every rodar command accepts.
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Summary format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

impl CommonArgs {
    /// Snapshot the flags into the runtime view handed to commands.
    pub fn to_cli(&self) -> Cli {
        Cli { verbose: self.verbose, quiet: self.quiet, format: self.format }
    }
}

/// Runtime view of the common flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cli {
    pub verbose: bool,
    pub quiet: bool,
    pub format: OutputFormat,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Default tracing directive for these flags.
    pub fn log_directive(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the directive derived from the CLI flags. Calling this
/// twice is harmless; the second install is ignored.
pub fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_directive()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

/// Terminal styling for human-readable summaries.
pub mod styles {
    /// Section header.
    pub fn header(title: &str) -> String {
        let rule = "═".repeat(title.chars().count() + 4);
        format!("{rule}\n  {title}\n{rule}")
    }

    pub fn success(msg: &str) -> String {
        format!("✓ {msg}")
    }

    pub fn info(msg: &str) -> String {
        format!("ℹ {msg}")
    }

    pub fn warning(msg: &str) -> String {
        format!("⚠ {msg}")
    }

    pub fn error(msg: &str) -> String {
        format!("✗ Error: {msg}")
    }

    /// Aligned `key: value` line.
    pub fn kv(key: &str, value: impl std::fmt::Display) -> String {
        format!("  {key:<22} {value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse_case_insensitive() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_log_directive_follows_flags() {
        let quiet = Cli { quiet: true, ..Default::default() };
        let verbose = Cli { verbose: true, ..Default::default() };
        assert_eq!(quiet.log_directive(), "error");
        assert_eq!(verbose.log_directive(), "debug");
        assert_eq!(Cli::default().log_directive(), "info");
    }

    #[test]
    fn test_styles_prefixes() {
        assert!(styles::success("done").starts_with('✓'));
        assert!(styles::error("boom").contains("Error: boom"));
        assert!(styles::header("rodar").contains("rodar"));
        assert_eq!(styles::kv("rows", 3), format!("  {:<22} 3", "rows"));
    }
}
