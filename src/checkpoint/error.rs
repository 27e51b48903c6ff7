//! Errors raised while encoding, decoding or checking an audit snapshot.

use crate::core::StateTag;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Checkpoint JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Checkpoint binary encoding failed: {0}")]
    Binary(#[from] bincode::Error),

    #[error("Unsupported checkpoint version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The activity log skips or repeats a sequence number
    #[error("Log entry at position {position} carries sequence {sequence}")]
    LogSequenceGap { position: usize, sequence: u64 },

    /// A transition does not start where the previous one ended
    #[error("Transition history is not contiguous")]
    BrokenHistory,

    #[error("History ends in {history} but the snapshot state is {state}")]
    StateContradictsHistory { history: StateTag, state: StateTag },
}
