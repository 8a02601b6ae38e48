//! # Rodar: bike-rental demand model pipeline
//!
//! Three batch jobs around one random forest regressor:
//!
//! - **Train**: split the latest month of hourly records into a reference and
//!   a current slice, fit the model on the reference slice
//! - **Monitor**: score both slices, build the drift and regression report,
//!   publish the dataset-level drift flag
//! - **Retrain**: fit a candidate on a shuffled split of the full dataset and
//!   promote it only if its RMSE beats the incumbent's
//!
//! Jobs share nothing but the artifact paths named by one
//! [`config::PipelineConfig`].
//!
//! # Toyota Way Principles
//!
//! - **Jidoka**: configurations and feature contracts are checked before any
//!   job touches data
//! - **Andon**: the drift flag stops the line for a CI gate
//! - **Kaizen**: a candidate model replaces the incumbent only when it is
//!   strictly better
//!
//! # Example
//!
//! ```no_run
//! use rodar::config::PipelineConfig;
//! use rodar::pipeline::{monitor, trainer};
//!
//! let config = PipelineConfig::default().with_root("/srv/bikes");
//! let trained = trainer::run(&config)?;
//! let monitored = monitor::run(&config)?;
//! println!("{}: drift = {}", trained.month, monitored.dataset_drift);
//! # Ok::<(), rodar::RodarError>(())
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod eval;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod report;

pub use config::{FeatureSchema, PipelineConfig};
pub use data::Frame;
pub use model::ModelArtifact;
pub use report::Report;
pub use rodar_common::{Result, RodarError};
