//! Handler decisions expressed as values.

use crate::core::StateTag;
use serde::{Deserialize, Serialize};

/// Channel an outbound notification is meant for.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Call the security center
    SecurityCall,
    /// Record a line with the security center
    LogRecord,
}

/// An outbound message to the security-response collaborator.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
}

impl Notification {
    pub fn security_call(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::SecurityCall,
            text: text.into(),
        }
    }

    pub fn log_record(text: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::LogRecord,
            text: text.into(),
        }
    }

    pub fn is_security_call(&self) -> bool {
        self.kind == NotificationKind::SecurityCall
    }
}

/// What a state handler decided for one event.
///
/// Handlers never touch the context; they return a `Reaction` and the
/// machine applies it: notifications first, then the log line, then the
/// transition.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Reaction {
    /// Text of the single activity log entry for this event
    pub log: String,
    /// Notifications to hand to the notification sink, in order
    pub notifications: Vec<Notification>,
    /// Next state, if the handler requested a transition
    pub next: Option<StateTag>,
}

impl Reaction {
    /// A reaction that only writes a log entry.
    pub fn log(text: impl Into<String>) -> Self {
        Self {
            log: text.into(),
            notifications: Vec::new(),
            next: None,
        }
    }

    /// Add a security call.
    pub fn and_call(mut self, text: impl Into<String>) -> Self {
        self.notifications.push(Notification::security_call(text));
        self
    }

    /// Request a transition.
    pub fn transition_to(mut self, next: StateTag) -> Self {
        self.next = Some(next);
        self
    }
}
