//! Property-based tests for the state machine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated event sequences.

use proptest::prelude::*;
use safewatch::builder::SafeMachineBuilder;
use safewatch::core::{Hour, OpenHours, StateTag};
use safewatch::effects::{Event, NullSink, RecordingLog, RecordingNotifier, SafeMachine};
use safewatch::SafeError;

fn machine() -> SafeMachine<RecordingNotifier, RecordingLog> {
    SafeMachineBuilder::new()
        .notifier(RecordingNotifier::new())
        .log_sink(RecordingLog::new())
        .build()
        .unwrap()
}

prop_compose! {
    fn arbitrary_event()(variant in 0..4u8, hour in -5..30i32) -> Event {
        match variant {
            0 => Event::ClockTick(hour),
            1 => Event::UseSafe,
            2 => Event::TriggerAlarm,
            _ => Event::PlaceCall,
        }
    }
}

prop_compose! {
    fn arbitrary_window()(opens in 0..24i32, offset in 1..24i32) -> OpenHours {
        let closes = (opens + offset) % 24;
        OpenHours::new(Hour::new(opens).unwrap(), Hour::new(closes).unwrap()).unwrap()
    }
}

proptest! {
    #[test]
    fn tick_keeps_state_in_variant_set(hour in 0..24i32) {
        for initial in StateTag::ALL {
            let mut machine = SafeMachineBuilder::new().initial_state(initial).build().unwrap();
            let state = machine.on_clock_tick(hour).unwrap();
            prop_assert!(StateTag::ALL.contains(&state));
        }
    }

    #[test]
    fn state_after_tick_follows_window(window in arbitrary_window(), hour in 0..24i32) {
        for initial in StateTag::ALL {
            let mut machine = SafeMachineBuilder::new()
                .open_hours(window)
                .initial_state(initial)
                .build()
                .unwrap();

            let state = machine.on_clock_tick(hour).unwrap();
            let expected = if window.contains(Hour::new(hour).unwrap()) {
                StateTag::Day
            } else {
                StateTag::Night
            };
            prop_assert_eq!(state, expected);
        }
    }

    #[test]
    fn out_of_range_tick_is_no_op(
        events in prop::collection::vec(arbitrary_event(), 0..20),
        bad in prop_oneof![i32::MIN..0i32, 24..i32::MAX],
    ) {
        let mut machine = machine();
        for event in events {
            let _ = machine.dispatch(event);
        }

        let state = machine.current_state();
        let hour = machine.context().hour();
        let log_len = machine.context().activity_log().len();
        let sent = machine.notifier().sent().len();

        prop_assert_eq!(machine.on_clock_tick(bad), Err(SafeError::InvalidHour { hour: bad }));
        prop_assert_eq!(machine.current_state(), state);
        prop_assert_eq!(machine.context().hour(), hour);
        prop_assert_eq!(machine.context().activity_log().len(), log_len);
        prop_assert_eq!(machine.notifier().sent().len(), sent);
    }

    #[test]
    fn every_accepted_event_writes_one_log_entry(
        events in prop::collection::vec(arbitrary_event(), 0..40)
    ) {
        let mut machine = machine();
        let mut accepted = 0;
        for event in events {
            if machine.dispatch(event).is_ok() {
                accepted += 1;
            }
        }

        prop_assert_eq!(machine.context().activity_log().len(), accepted);
        prop_assert_eq!(machine.log_sink().lines().len(), accepted);
    }

    #[test]
    fn history_explains_current_state(
        events in prop::collection::vec(arbitrary_event(), 0..40)
    ) {
        let mut machine = machine();
        for event in events {
            let _ = machine.dispatch(event);
        }

        let history = machine.context().history();
        prop_assert!(history.is_contiguous());
        match history.transitions().last() {
            Some(last) => prop_assert_eq!(last.to, machine.current_state()),
            None => prop_assert_eq!(machine.current_state(), StateTag::Day),
        }
    }

    #[test]
    fn alarm_is_state_independent(hour in 0..24i32) {
        let mut machine = SafeMachineBuilder::new()
            .notifier(RecordingNotifier::new())
            .log_sink(NullSink)
            .build()
            .unwrap();
        machine.on_clock_tick(hour).unwrap();

        machine.on_trigger_alarm();

        prop_assert_eq!(machine.notifier().security_calls().len(), 1);
    }
}
