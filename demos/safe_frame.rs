//! Safe Frame
//!
//! A console stand-in for the security panel: a clock advances one hour
//! per step while the panel presses the safe, alarm and phone buttons.
//!
//! Key concepts:
//! - A driver built only on `dispatch` and the two sink traits
//! - Day/Night transitions driven by the clock alone
//! - Night-time escalation to the security center
//! - Audit snapshot at the end of the run
//!
//! Run with: RUST_LOG=safewatch=debug cargo run --example safe_frame

use safewatch::builder::SafeMachineBuilder;
use safewatch::config::SafeConfig;
use safewatch::core::Hour;
use safewatch::effects::{Event, LogSink, Notification, NotificationSink};
use tracing_subscriber::EnvFilter;

/// Prints to the console the way the panel's text screen shows lines.
struct Screen;

impl NotificationSink for Screen {
    fn send(&mut self, notification: Notification) {
        println!("  call! {}", notification.text);
    }
}

impl LogSink for Screen {
    fn append(&mut self, text: &str) {
        println!("  record {}", text);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Safe Frame ===\n");

    let config = SafeConfig::from_json(r#"{ "opens": 9, "closes": 17 }"#)?;
    let mut machine = SafeMachineBuilder::new()
        .config(config)
        .notifier(Screen)
        .log_sink(Screen)
        .build()?;

    let mut hour = Hour::MIDNIGHT;
    for step in 0..24 {
        hour = hour.next();
        println!("{hour} [{}]", machine.current_state());
        machine.dispatch(Event::ClockTick(i32::from(hour)))?;

        match step % 6 {
            1 => {
                machine.dispatch(Event::UseSafe)?;
            }
            3 => {
                machine.dispatch(Event::PlaceCall)?;
            }
            5 => {
                machine.dispatch(Event::TriggerAlarm)?;
            }
            _ => {}
        }
    }

    if let Err(err) = machine.dispatch(Event::ClockTick(25)) {
        println!("\nRejected: {err}");
    }

    let checkpoint = machine.checkpoint();
    println!(
        "\nAudit {}: {} log entries, {} transitions",
        checkpoint.id,
        checkpoint.activity_log.len(),
        checkpoint.history.len()
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
