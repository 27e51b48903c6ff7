//! Serialized access for drivers with more than one event source.
//!
//! The machine holds no lock. When a UI thread and a clock thread both
//! raise events, they share a [`SharedMachine`], which takes its mutex
//! for exactly one event dispatch at a time.

use crate::checkpoint::Checkpoint;
use crate::core::StateTag;
use crate::effects::{Event, LogSink, NotificationSink, SafeMachine};
use crate::error::SafeError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle to a machine shared between event sources.
///
/// # Example
///
/// ```rust
/// use safewatch::builder::SafeMachineBuilder;
/// use safewatch::core::StateTag;
/// use safewatch::driver::SharedMachine;
/// use safewatch::effects::Event;
///
/// let shared = SharedMachine::new(SafeMachineBuilder::new().build().unwrap());
/// let clock = shared.clone();
///
/// std::thread::spawn(move || clock.dispatch(Event::ClockTick(20)))
///     .join()
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(shared.current_state(), StateTag::Night);
/// ```
pub struct SharedMachine<N, L> {
    inner: Arc<Mutex<SafeMachine<N, L>>>,
}

impl<N, L> Clone for SharedMachine<N, L> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<N: NotificationSink, L: LogSink> SharedMachine<N, L> {
    pub fn new(machine: SafeMachine<N, L>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(machine)),
        }
    }

    // A panic inside a sink leaves the context consistent: the log entry
    // and transition are applied after every sink call returns.
    fn lock(&self) -> MutexGuard<'_, SafeMachine<N, L>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Dispatch one event under the lock.
    pub fn dispatch(&self, event: Event) -> Result<StateTag, SafeError> {
        self.lock().dispatch(event)
    }

    pub fn current_state(&self) -> StateTag {
        self.lock().current_state()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.lock().checkpoint()
    }

    /// Read the machine under the lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&SafeMachine<N, L>) -> R) -> R {
        f(&self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SafeMachineBuilder;
    use crate::effects::{RecordingLog, RecordingNotifier};
    use std::thread;

    #[test]
    fn events_from_many_threads_are_all_applied() {
        let notifier = RecordingNotifier::new();
        let shared = SharedMachine::new(
            SafeMachineBuilder::new()
                .notifier(notifier.clone())
                .log_sink(RecordingLog::new())
                .build()
                .unwrap(),
        );

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        shared.dispatch(Event::TriggerAlarm).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(notifier.security_calls().len(), 100);
        let sequences: Vec<u64> = shared.inspect(|m| {
            m.context()
                .activity_log()
                .iter()
                .map(|entry| entry.sequence)
                .collect()
        });
        assert_eq!(sequences, (0..100).collect::<Vec<u64>>());
    }

    #[test]
    fn invalid_tick_through_handle_changes_nothing() {
        let shared = SharedMachine::new(SafeMachineBuilder::new().build().unwrap());

        assert_eq!(
            shared.dispatch(Event::ClockTick(-5)),
            Err(SafeError::InvalidHour { hour: -5 })
        );
        assert!(shared.checkpoint().activity_log.is_empty());
    }
}
