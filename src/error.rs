//! Error types for the state machine and its configuration.

use thiserror::Error;

/// Errors returned by the event-entry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SafeError {
    /// The hour is outside `0..=23`. The event was rejected and the
    /// context was left untouched.
    #[error("Invalid hour {hour}, expected a value in 0..=23")]
    InvalidHour { hour: i32 },
}

/// A single problem found while validating a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Opening hour {0} is outside 0..=23")]
    OpensOutOfRange(i32),

    #[error("Closing hour {0} is outside 0..=23")]
    ClosesOutOfRange(i32),

    #[error("Initial hour {0} is outside 0..=23")]
    InitialHourOutOfRange(i32),

    #[error("Open window is empty: opens and closes are both {0}")]
    EmptyWindow(u8),
}

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text could not be parsed
    #[error("Configuration parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// Every violation found, in the order the checks ran
    #[error("Invalid configuration: {}", join(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
