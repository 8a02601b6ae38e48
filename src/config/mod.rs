//! Pipeline configuration: command-line arguments, YAML loading, the feature
//! contract and validation.

pub mod cli;
pub mod pipeline;
pub mod schema;
pub mod validate;

pub use cli::{apply_overrides, parse_args, Cli, Command, InitArgs, ValidateArgs};
pub use pipeline::{PathsConfig, PipelineConfig, RetrainConfig, SplitConfig, DEFAULT_CONFIG_FILE};
pub use schema::FeatureSchema;
pub use validate::ConfigValidator;
