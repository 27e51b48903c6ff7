//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::checkpoint::Checkpoint;
use crate::config::{SafeConfig, ValidConfig};
use crate::core::{Hour, OpenHours, StateTag};
use crate::effects::{Context, LogSink, NotificationSink, NullSink, SafeMachine};
use crate::registry;
use tracing::info;

/// Builder for constructing state machines with a fluent API.
///
/// Starts from the conventional defaults: `Day`, hour 0, open 09:00 to
/// 17:00, and sinks that discard everything.
///
/// # Example
///
/// ```rust
/// use safewatch::builder::SafeMachineBuilder;
/// use safewatch::core::StateTag;
/// use safewatch::effects::{RecordingLog, RecordingNotifier};
///
/// let notifier = RecordingNotifier::new();
/// let mut machine = SafeMachineBuilder::new()
///     .notifier(notifier.clone())
///     .log_sink(RecordingLog::new())
///     .build()
///     .unwrap();
///
/// machine.on_clock_tick(21).unwrap();
/// machine.on_use_safe();
///
/// assert_eq!(machine.current_state(), StateTag::Night);
/// assert_eq!(notifier.security_calls().len(), 1);
/// ```
pub struct SafeMachineBuilder<N, L> {
    settings: ValidConfig,
    raw: Option<SafeConfig>,
    checkpoint: Option<Checkpoint>,
    notifier: N,
    log_sink: L,
}

impl SafeMachineBuilder<NullSink, NullSink> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            settings: ValidConfig::default(),
            raw: None,
            checkpoint: None,
            notifier: NullSink,
            log_sink: NullSink,
        }
    }
}

impl Default for SafeMachineBuilder<NullSink, NullSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NotificationSink, L: LogSink> SafeMachineBuilder<N, L> {
    pub fn open_hours(mut self, open_hours: OpenHours) -> Self {
        self.settings.open_hours = open_hours;
        self
    }

    pub fn initial_state(mut self, state: StateTag) -> Self {
        self.settings.initial_state = state;
        self
    }

    pub fn initial_hour(mut self, hour: Hour) -> Self {
        self.settings.initial_hour = hour;
        self
    }

    /// Take every setting from a raw configuration, validated at build time.
    /// Overrides the fluent settings.
    pub fn config(mut self, config: SafeConfig) -> Self {
        self.raw = Some(config);
        self
    }

    /// Continue from a checkpoint instead of a fresh context.
    /// Overrides every other setting.
    pub fn resume(mut self, checkpoint: Checkpoint) -> Self {
        self.checkpoint = Some(checkpoint);
        self
    }

    pub fn notifier<N2: NotificationSink>(self, notifier: N2) -> SafeMachineBuilder<N2, L> {
        SafeMachineBuilder {
            settings: self.settings,
            raw: self.raw,
            checkpoint: self.checkpoint,
            notifier,
            log_sink: self.log_sink,
        }
    }

    pub fn log_sink<L2: LogSink>(self, log_sink: L2) -> SafeMachineBuilder<N, L2> {
        SafeMachineBuilder {
            settings: self.settings,
            raw: self.raw,
            checkpoint: self.checkpoint,
            notifier: self.notifier,
            log_sink,
        }
    }

    /// Build the state machine.
    /// Returns an error if the configuration or checkpoint is invalid.
    pub fn build(self) -> Result<SafeMachine<N, L>, BuildError> {
        let context = match (self.checkpoint, self.raw) {
            (Some(checkpoint), _) => {
                let id = checkpoint.id;
                let context = checkpoint.into_context()?;
                info!(%id, state = %context.state(), hour = %context.hour(), "resumed from checkpoint");
                context
            }
            (None, Some(raw)) => fresh_context(raw.resolve()?),
            (None, None) => fresh_context(self.settings),
        };

        Ok(SafeMachine::new(context, self.notifier, self.log_sink))
    }
}

fn fresh_context(config: ValidConfig) -> Context {
    info!(
        state = %config.initial_state,
        hour = %config.initial_hour,
        open_hours = %config.open_hours,
        "context created"
    );
    Context::new(
        registry::get(config.initial_state),
        config.initial_hour,
        config.open_hours,
    )
}
