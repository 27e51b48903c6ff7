//! Builder API for ergonomic state machine construction.
//!
//! The builder wires a context (fresh, from configuration, or resumed
//! from a checkpoint) to a pair of sinks.

pub mod error;
pub mod machine;

pub use error::BuildError;
pub use machine::SafeMachineBuilder;
