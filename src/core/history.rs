//! State transition history tracking.
//!
//! Provides immutable tracking of state transitions over time so an
//! audit can reconstruct the path an installation took without parsing
//! activity log text.

use super::hour::Hour;
use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record of a single state transition.
///
/// Transitions are immutable values representing a move from one state
/// to another at a specific clock hour and wall-clock instant.
///
/// # Example
///
/// ```rust
/// use safewatch::core::{Hour, StateTag, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: StateTag::Day,
///     to: StateTag::Night,
///     hour: Hour::new(17).unwrap(),
///     timestamp: Utc::now(),
/// };
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The clock hour that caused the transition
    pub hour: Hour,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state transitions.
///
/// History is immutable - the `record` method returns a new history
/// with the transition added.
///
/// # Example
///
/// ```rust
/// use safewatch::core::{Hour, StateHistory, StateTag, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::new()
///     .record(StateTransition {
///         from: StateTag::Day,
///         to: StateTag::Night,
///         hour: Hour::new(20).unwrap(),
///         timestamp: Utc::now(),
///     })
///     .record(StateTransition {
///         from: StateTag::Night,
///         to: StateTag::Day,
///         hour: Hour::new(10).unwrap(),
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&StateTag::Day, &StateTag::Night, &StateTag::Day]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// This is a pure function - it does not mutate the existing history
    /// but returns a new one with the transition added.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: initial state, then
    /// the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Check that every transition starts where the previous one ended.
    pub fn is_contiguous(&self) -> bool {
        self.transitions
            .windows(2)
            .all(|pair| pair[0].to == pair[1].from)
    }

    /// Get all transitions.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
