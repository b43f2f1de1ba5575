//! Error types for running a simulation.

use thiserror::Error;

use crate::config::ConfigError;
use crate::output::OutputError;

/// Anything that can stop a run. The step loop itself cannot fail.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Output(#[from] OutputError),
}
