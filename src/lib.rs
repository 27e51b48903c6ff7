//! Safewatch: a time-driven state machine for physical access control
//!
//! A context holds the operating state of an installation (a safe, an
//! alarm line, a phone line) and its clock. Events are dispatched to the
//! active state, which decides the side effects (call the security center,
//! write an audit log entry) and may request a transition.
//!
//! # Core Concepts
//!
//! - **State**: `Day` or `Night`, shared stateless singletons from the `registry`
//! - **Handlers**: per-state policy returning a `Reaction` value
//! - **Machine**: owns the context, applies reactions, records history
//! - **Sinks**: fire-and-forget outlets for notifications and log lines
//!
//! # Example
//!
//! ```rust
//! use safewatch::builder::SafeMachineBuilder;
//! use safewatch::core::StateTag;
//! use safewatch::effects::{Event, RecordingLog, RecordingNotifier};
//!
//! let notifier = RecordingNotifier::new();
//! let log = RecordingLog::new();
//! let mut machine = SafeMachineBuilder::new()
//!     .notifier(notifier.clone())
//!     .log_sink(log.clone())
//!     .build()
//!     .unwrap();
//!
//! machine.dispatch(Event::ClockTick(9)).unwrap();
//! machine.dispatch(Event::UseSafe).unwrap();
//! machine.dispatch(Event::ClockTick(18)).unwrap();
//! machine.dispatch(Event::UseSafe).unwrap();
//!
//! assert_eq!(machine.current_state(), StateTag::Night);
//! assert_eq!(notifier.security_calls().len(), 1);
//! assert_eq!(log.lines().len(), 4);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod driver;
pub mod effects;
pub mod error;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{Hour, OpenHours, State, StateHistory, StateTag, StateTransition};
pub use effects::{Context, Event, Notification, NotificationKind, SafeMachine};
pub use error::SafeError;
