//! Core State trait and the closed set of operating states.
//!
//! All state machine states implement this trait, which provides
//! pure methods for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States describe the current
/// operating mode of an installation and are compared, recorded in
/// history and serialized into audit snapshots.
///
/// # Required Traits
///
/// - `Clone`: States must be cloneable for history tracking
/// - `PartialEq`: States must be comparable for transition logic
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable for audits
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this state runs under human supervision.
    ///
    /// Unsupervised states escalate sensitive actions to the security
    /// center instead of treating them as routine.
    ///
    /// Default implementation returns `true`.
    fn is_supervised(&self) -> bool {
        true
    }
}

/// Tag identifying one member of the closed set of operating states.
///
/// The set is known at compile time; every handler matches on it
/// exhaustively, so adding a variant forces every event to be handled.
///
/// # Example
///
/// ```rust
/// use safewatch::core::{State, StateTag};
///
/// assert_eq!(StateTag::Day.name(), "Day");
/// assert!(StateTag::Day.is_supervised());
/// assert!(!StateTag::Night.is_supervised());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum StateTag {
    /// Open hours: staff on site.
    Day,
    /// Closed hours: the installation is unattended.
    Night,
}

impl StateTag {
    /// Every tag, in declaration order.
    pub const ALL: [StateTag; 2] = [StateTag::Day, StateTag::Night];

    /// Lowercase form used inside activity log lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

impl State for StateTag {
    fn name(&self) -> &str {
        match self {
            Self::Day => "Day",
            Self::Night => "Night",
        }
    }

    fn is_supervised(&self) -> bool {
        matches!(self, Self::Day)
    }
}

impl fmt::Display for StateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
