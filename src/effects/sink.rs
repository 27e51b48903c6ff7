//! Outbound collaborators: where notifications and log lines go.
//!
//! The machine treats every sink call as fire-and-forget. Delivery,
//! retries and acknowledgement belong to the sink.

use crate::effects::reaction::{Notification, NotificationKind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// Receives notifications meant for the security center.
pub trait NotificationSink {
    fn send(&mut self, notification: Notification);
}

/// Receives activity log lines, in call order.
pub trait LogSink {
    fn append(&mut self, text: &str);
}

impl<T: NotificationSink + ?Sized> NotificationSink for Box<T> {
    fn send(&mut self, notification: Notification) {
        (**self).send(notification)
    }
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn append(&mut self, text: &str) {
        (**self).append(text)
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn send(&mut self, _notification: Notification) {}
}

impl LogSink for NullSink {
    fn append(&mut self, _text: &str) {}
}

/// Emits every notification and log line as a `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn send(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::SecurityCall => {
                warn!(target: "safewatch::call", text = %notification.text, "security call")
            }
            NotificationKind::LogRecord => {
                info!(target: "safewatch::call", text = %notification.text, "log record")
            }
        }
    }
}

impl LogSink for TracingSink {
    fn append(&mut self, text: &str) {
        info!(target: "safewatch::record", text, "activity");
    }
}

fn lock<T>(buffer: &Mutex<T>) -> MutexGuard<'_, T> {
    buffer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keeps every notification in memory. Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far.
    pub fn sent(&self) -> Vec<Notification> {
        lock(&self.sent).clone()
    }

    pub fn security_calls(&self) -> Vec<Notification> {
        lock(&self.sent)
            .iter()
            .filter(|n| n.is_security_call())
            .cloned()
            .collect()
    }
}

impl NotificationSink for RecordingNotifier {
    fn send(&mut self, notification: Notification) {
        lock(&self.sent).push(notification);
    }
}

/// Keeps every log line in memory. Clones share the same buffer.
#[derive(Clone, Debug, Default)]
pub struct RecordingLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        lock(&self.lines).clone()
    }
}

impl LogSink for RecordingLog {
    fn append(&mut self, text: &str) {
        lock(&self.lines).push(text.to_string());
    }
}

/// Forwards every log line to a notification sink as a
/// [`NotificationKind::LogRecord`], recording it with the security center.
#[derive(Clone, Debug)]
pub struct ForwardingLogSink<N> {
    inner: N,
}

impl<N: NotificationSink> ForwardingLogSink<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> N {
        self.inner
    }
}

impl<N: NotificationSink> LogSink for ForwardingLogSink<N> {
    fn append(&mut self, text: &str) {
        self.inner.send(Notification::log_record(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_clones_share_buffer() {
        let notifier = RecordingNotifier::new();
        let mut writer = notifier.clone();

        writer.send(Notification::security_call("emergency: alarm triggered"));
        writer.send(Notification::log_record("alarm bell (day)"));

        assert_eq!(notifier.sent().len(), 2);
        assert_eq!(notifier.security_calls().len(), 1);
    }

    #[test]
    fn recording_log_keeps_call_order() {
        let log = RecordingLog::new();
        let mut writer = log.clone();

        writer.append("first");
        writer.append("second");

        assert_eq!(log.lines(), vec!["first", "second"]);
    }

    #[test]
    fn forwarding_sink_sends_log_records() {
        let notifier = RecordingNotifier::new();
        let mut sink = ForwardingLogSink::new(notifier.clone());

        sink.append("safe used (day) at 10:00");

        assert_eq!(
            notifier.sent(),
            vec![Notification::log_record("safe used (day) at 10:00")]
        );
        assert!(notifier.security_calls().is_empty());
    }

    #[test]
    fn forwarding_sink_hands_back_its_notifier() {
        let mut sink = ForwardingLogSink::new(RecordingNotifier::new());
        sink.append("call placed (day) at 11:00");

        let notifier = sink.into_inner();

        assert_eq!(
            notifier.sent(),
            vec![Notification::log_record("call placed (day) at 11:00")]
        );
    }

    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn tracing_sink_emits_events_for_both_roles() {
        let output = CapturedOutput::default();
        let writer = output.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let mut sink = TracingSink;
            sink.send(Notification::security_call("emergency: alarm triggered"));
            sink.send(Notification::log_record("alarm bell (night) at 02:00"));
            sink.append("safe used (day) at 10:00");
        });

        let text = String::from_utf8(output.0.lock().unwrap().clone()).unwrap();
        assert!(text.contains("WARN"));
        assert!(text.contains("security call"));
        assert!(text.contains("emergency: alarm triggered"));
        assert!(text.contains("log record"));
        assert!(text.contains("safewatch::record"));
        assert!(text.contains("safe used (day) at 10:00"));
    }

    #[test]
    fn boxed_sinks_delegate() {
        let log = RecordingLog::new();
        let mut boxed: Box<dyn LogSink> = Box::new(log.clone());
        boxed.append("boxed");

        let mut null: Box<dyn NotificationSink> = Box::new(NullSink);
        null.send(Notification::security_call("dropped"));

        assert_eq!(log.lines(), vec!["boxed"]);
    }
}
