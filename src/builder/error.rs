//! Build errors for the state machine builder.

use crate::checkpoint::CheckpointError;
use crate::error::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Configuration rejected: {0}")]
    Config(#[from] ConfigError),

    #[error("Checkpoint rejected: {0}")]
    Checkpoint(#[from] CheckpointError),
}
