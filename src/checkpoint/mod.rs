//! Audit snapshots of a running installation.
//!
//! A checkpoint captures the context (state, clock, open window,
//! activity log and transition history) so it can be archived for an
//! audit or used to resume a machine after a restart. Sinks are not part
//! of a checkpoint.

use crate::core::{Hour, OpenHours, StateHistory, StateTag};
use crate::effects::{Context, LogEntry, LogSink, NotificationSink, SafeMachine};
use crate::registry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of a context.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: Uuid,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    pub open_hours: OpenHours,

    pub state: StateTag,

    pub hour: Hour,

    pub activity_log: Vec<LogEntry>,

    pub history: StateHistory<StateTag>,
}

impl Checkpoint {
    /// Capture a context as it is right now.
    pub fn capture(context: &Context) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            open_hours: context.open_hours(),
            state: context.state_tag(),
            hour: context.hour(),
            activity_log: context.activity_log().to_vec(),
            history: context.history().clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(text)?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)?;
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// Check that the snapshot is internally consistent.
    pub fn validate(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }

        if let Some((position, entry)) = self
            .activity_log
            .iter()
            .enumerate()
            .find(|(i, entry)| entry.sequence != *i as u64)
        {
            return Err(CheckpointError::LogSequenceGap {
                position,
                sequence: entry.sequence,
            });
        }

        if !self.history.is_contiguous() {
            return Err(CheckpointError::BrokenHistory);
        }

        if let Some(last) = self.history.transitions().last() {
            if last.to != self.state {
                return Err(CheckpointError::StateContradictsHistory {
                    history: last.to,
                    state: self.state,
                });
            }
        }

        Ok(())
    }

    /// Rebuild the context this checkpoint was captured from.
    pub fn into_context(self) -> Result<Context, CheckpointError> {
        self.validate()?;
        Ok(Context::restore(
            registry::get(self.state),
            self.hour,
            self.open_hours,
            self.activity_log,
            self.history,
        ))
    }
}

impl<N: NotificationSink, L: LogSink> SafeMachine<N, L> {
    /// Snapshot the machine's context.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::capture(self.context())
    }
}
