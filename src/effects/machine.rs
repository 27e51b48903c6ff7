//! State machine core: owns the context and applies handler decisions.

use crate::core::{Hour, OpenHours, StateHistory, StateTag, StateTransition};
use crate::effects::reaction::Reaction;
use crate::effects::sink::{LogSink, NotificationSink};
use crate::error::SafeError;
use crate::registry::{self, SafeState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// An event raised by a driver.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Event {
    /// The clock moved to a new hour. Carries the raw, unvalidated value.
    ClockTick(i32),
    UseSafe,
    TriggerAlarm,
    PlaceCall,
}

/// One line of the activity log.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the log, starting at 0
    pub sequence: u64,
    /// Clock hour when the entry was written
    pub hour: Hour,
    /// State that handled the event
    pub state: StateTag,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Mutable holder of the current state, the clock and the audit trail.
///
/// Only [`SafeMachine`] mutates a context; handlers receive it by shared
/// reference and answer with a [`Reaction`].
#[derive(Clone, Debug)]
pub struct Context {
    state: &'static SafeState,
    hour: Hour,
    open_hours: OpenHours,
    activity_log: Vec<LogEntry>,
    history: StateHistory<StateTag>,
}

impl Context {
    pub fn new(state: &'static SafeState, hour: Hour, open_hours: OpenHours) -> Self {
        Self {
            state,
            hour,
            open_hours,
            activity_log: Vec::new(),
            history: StateHistory::new(),
        }
    }

    pub(crate) fn restore(
        state: &'static SafeState,
        hour: Hour,
        open_hours: OpenHours,
        activity_log: Vec<LogEntry>,
        history: StateHistory<StateTag>,
    ) -> Self {
        Self {
            state,
            hour,
            open_hours,
            activity_log,
            history,
        }
    }

    pub fn state(&self) -> &'static SafeState {
        self.state
    }

    pub fn state_tag(&self) -> StateTag {
        self.state.tag()
    }

    pub fn hour(&self) -> Hour {
        self.hour
    }

    pub fn open_hours(&self) -> OpenHours {
        self.open_hours
    }

    pub fn activity_log(&self) -> &[LogEntry] {
        &self.activity_log
    }

    pub fn history(&self) -> &StateHistory<StateTag> {
        &self.history
    }
}

/// The state machine core.
///
/// Every entry operation takes `&mut self`, so one event runs to
/// completion (handler, notifications, log append, transition) before the
/// next is accepted. The machine holds no lock of its own; see
/// [`crate::driver::SharedMachine`] for multiple event sources.
pub struct SafeMachine<N, L> {
    context: Context,
    notifier: N,
    log_sink: L,
}

impl<N: NotificationSink, L: LogSink> SafeMachine<N, L> {
    pub fn new(context: Context, notifier: N, log_sink: L) -> Self {
        Self {
            context,
            notifier,
            log_sink,
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Get current state (pure)
    pub fn current_state(&self) -> StateTag {
        self.context.state_tag()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn log_sink(&self) -> &L {
        &self.log_sink
    }

    /// Submit an event. Routes to the matching entry operation.
    ///
    /// Returns the state after the event.
    pub fn dispatch(&mut self, event: Event) -> Result<StateTag, SafeError> {
        match event {
            Event::ClockTick(hour) => self.on_clock_tick(hour),
            Event::UseSafe => Ok(self.on_use_safe()),
            Event::TriggerAlarm => Ok(self.on_trigger_alarm()),
            Event::PlaceCall => Ok(self.on_place_call()),
        }
    }

    /// Move the clock to `hour` and let the active state react.
    ///
    /// Fails with [`SafeError::InvalidHour`] outside `0..=23`; on failure
    /// nothing changes: no hour update, no log entry, no notification.
    pub fn on_clock_tick(&mut self, hour: i32) -> Result<StateTag, SafeError> {
        let hour = Hour::new(hour).inspect_err(|err| {
            warn!(error = %err, state = %self.context.state, "rejected clock tick");
        })?;

        self.context.hour = hour;
        let reaction = self.context.state.on_clock(&self.context, hour);
        Ok(self.apply(reaction))
    }

    pub fn on_use_safe(&mut self) -> StateTag {
        let reaction = self.context.state.on_use(&self.context);
        self.apply(reaction)
    }

    pub fn on_trigger_alarm(&mut self) -> StateTag {
        let reaction = self.context.state.on_alarm(&self.context);
        self.apply(reaction)
    }

    pub fn on_place_call(&mut self) -> StateTag {
        let reaction = self.context.state.on_phone(&self.context);
        self.apply(reaction)
    }

    /// Apply a handler decision to the context.
    fn apply(&mut self, reaction: Reaction) -> StateTag {
        let Reaction {
            log,
            notifications,
            next,
        } = reaction;
        let from = self.context.state_tag();

        for notification in notifications {
            warn!(state = %from, hour = %self.context.hour, text = %notification.text, "notifying security center");
            self.notifier.send(notification);
        }

        debug!(state = %from, hour = %self.context.hour, text = %log, "activity");
        self.log_sink.append(&log);
        self.context.activity_log.push(LogEntry {
            sequence: self.context.activity_log.len() as u64,
            hour: self.context.hour,
            state: from,
            text: log,
            timestamp: Utc::now(),
        });

        if let Some(to) = next.filter(|to| *to != from) {
            info!(%from, %to, hour = %self.context.hour, "state changed");
            self.context.history = self.context.history.record(StateTransition {
                from,
                to,
                hour: self.context.hour,
                timestamp: Utc::now(),
            });
            self.context.state = registry::get(to);
        }

        self.context.state_tag()
    }
}
