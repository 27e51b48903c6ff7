//! The imperative shell around the pure core.
//!
//! State handlers decide; the machine applies. Side effects leave the
//! crate only through the two sink traits.
//!
//! # Key Concepts
//!
//! - **Handlers**: per-state policy, exhaustive over the variant set
//! - **Reactions**: handler decisions returned as values
//! - **Machine**: owns the context, applies reactions, records history
//! - **Sinks**: fire-and-forget notification and log collaborators

pub mod handlers;
mod machine;
mod reaction;
pub mod sink;

pub use machine::{Context, Event, LogEntry, SafeMachine};
pub use reaction::{Notification, NotificationKind, Reaction};
pub use sink::{
    ForwardingLogSink, LogSink, NotificationSink, NullSink, RecordingLog, RecordingNotifier,
    TracingSink,
};
