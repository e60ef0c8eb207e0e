//! Property tests for the alarm comparator and state machine.

use outboard_core::alarm::{
    should_escalate, AlarmConfig, AlarmLevel, AlarmMachine, Threshold,
};
use outboard_core::signal::{MovingAverage, Stage};
use outboard_core::traits::AlarmOutput;
use proptest::prelude::*;

#[derive(Default)]
struct CountingOutput {
    writes: u32,
    active: bool,
}

impl AlarmOutput for CountingOutput {
    fn set_alarm(&mut self, active: bool) {
        self.writes += 1;
        self.active = active;
    }
}

fn high() -> Threshold {
    Threshold::High {
        setpoint: 353.15,
        margin: 10.0,
    }
}

proptest! {
    /// A single evaluation lands on the level the comparator dictates.
    #[test]
    fn high_threshold_level_matches_comparison(value in 250.0f32..450.0, previous in 250.0f32..450.0) {
        let trip = high().trip_point();
        let mut machine = AlarmMachine::new(AlarmConfig::new(high()), CountingOutput::default());
        machine.evaluate(previous, 1000);
        let level = machine.evaluate(value, 2000).level;

        if value > trip {
            prop_assert_eq!(level, AlarmLevel::Alarm);
        } else {
            prop_assert_eq!(level, AlarmLevel::Normal);
        }
    }

    #[test]
    fn low_threshold_level_matches_comparison(value in 8.0f32..16.0, previous in 8.0f32..16.0) {
        let mut machine = AlarmMachine::new(
            AlarmConfig::new(Threshold::Low { minimum: 12.0 }),
            CountingOutput::default(),
        );
        machine.evaluate(previous, 1000);
        let level = machine.evaluate(value, 2000).level;

        prop_assert_eq!(level == AlarmLevel::Alarm, value < 12.0);
    }

    /// Repeating the same input never transitions twice or rewrites the pin.
    #[test]
    fn unchanged_input_is_idempotent(value in 250.0f32..450.0, repeats in 1usize..50) {
        let mut machine = AlarmMachine::new(AlarmConfig::new(high()), CountingOutput::default());
        machine.evaluate(value, 0);
        let writes = machine.output().writes;
        let state = machine.state();

        for i in 0..repeats {
            let eval = machine.evaluate(value, 1000 * (i as u32 + 1));
            prop_assert!(!eval.transitioned);
        }
        prop_assert_eq!(machine.output().writes, writes);
        prop_assert_eq!(machine.state(), state);
    }

    /// The transition timestamp moves exactly when the level changes,
    /// and the output always mirrors the level.
    #[test]
    fn timestamp_changes_only_on_transition(values in proptest::collection::vec(300.0f32..420.0, 1..60)) {
        let mut machine = AlarmMachine::new(AlarmConfig::new(high()), CountingOutput::default());
        let mut transitions = 0;

        for (i, value) in values.iter().enumerate() {
            let now = 1000 * (i as u32 + 1);
            let before = machine.state();
            let eval = machine.evaluate(*value, now);
            let after = machine.state();

            if eval.transitioned {
                transitions += 1;
                prop_assert_ne!(before.level, after.level);
                prop_assert_eq!(after.last_transition_ms, now);
            } else {
                prop_assert_eq!(before, after);
            }
            if transitions > 0 {
                prop_assert_eq!(machine.output().active, after.level.is_active());
            }
        }
        prop_assert_eq!(machine.output().writes, transitions);
    }

    /// Escalation needs strictly more than the dwell, whatever the wrap point.
    #[test]
    fn escalation_respects_dwell(last in any::<u32>(), elapsed in 0u32..10_000, dwell in 0u32..10_000) {
        let now = last.wrapping_add(elapsed);
        prop_assert_eq!(should_escalate(true, last, now, dwell), elapsed > dwell);
        prop_assert!(!should_escalate(false, last, now, dwell));
    }

    /// A constant input fills the window and the average settles on it.
    #[test]
    fn moving_average_converges(start in 0.0f32..3.3, target in 0.0f32..3.3, window in 1usize..40) {
        let mut avg = MovingAverage::new(window);
        for _ in 0..window {
            avg.process(start).unwrap();
        }
        let mut out = 0.0;
        for _ in 0..window {
            out = avg.process(target).unwrap();
        }
        prop_assert!((out - target).abs() < 1e-3);
    }
}
