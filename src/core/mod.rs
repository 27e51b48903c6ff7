//! Core state machine types and logic.
//!
//! This module contains the pure functional core of the state machine:
//! - State definitions via the `State` trait and the `StateTag` variant set
//! - Validated hours and the open-hours window
//! - Immutable history tracking
//!
//! All logic in this module is pure (no side effects).

mod history;
mod hour;
mod state;

pub use history::{StateHistory, StateTransition};
pub use hour::{Hour, OpenHours};
pub use state::{State, StateTag};
