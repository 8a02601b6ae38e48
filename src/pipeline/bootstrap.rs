//! First-time bootstrap: train, then monitor.

use rodar_common::Result;
use serde::Serialize;

use super::{monitor, trainer, MonitorOutcome, TrainOutcome};
use crate::config::PipelineConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapOutcome {
    pub train: TrainOutcome,
    pub monitor: MonitorOutcome,
}

pub fn run(config: &PipelineConfig) -> Result<BootstrapOutcome> {
    let train = trainer::run(config)?;
    let monitor = monitor::run(config)?;
    Ok(BootstrapOutcome { train, monitor })
}
