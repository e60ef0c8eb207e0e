//! Per-quantity monitor
//!
//! A monitor owns one signal chain and one alarm machine. Each sample
//! tick the firmware hands it the raw reading; the monitor conditions it,
//! evaluates the alarm and keeps the latest value for telemetry.
//!
//! A failed reading (ADC error or a stage rejecting it) skips the tick:
//! the alarm is not evaluated and the last good value is kept.

use crate::alarm::{AlarmMachine, AlarmState, EscalationAction, Evaluation, NoEscalation};
use crate::signal::Stage;
use crate::traits::{AlarmOutput, SensorError};
use crate::TimestampMs;

/// Which monitored quantity a monitor watches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MonitorKind {
    Coolant,
    Battery,
    Bilge,
}

/// Copyable view of a monitor, the only state shared with other tasks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorSnapshot {
    pub alarm_active: bool,
    pub escalated: bool,
    /// Latest conditioned value, `None` until the first valid reading
    pub value: Option<f32>,
}

pub struct Monitor<C, O, E = NoEscalation> {
    chain: C,
    alarm: AlarmMachine<O, E>,
    last_value: Option<f32>,
}

impl<C, O, E> Monitor<C, O, E>
where
    C: Stage,
    O: AlarmOutput,
    E: EscalationAction,
{
    pub fn new(chain: C, alarm: AlarmMachine<O, E>) -> Self {
        Self {
            chain,
            alarm,
            last_value: None,
        }
    }

    /// Run one sample through the chain and the alarm machine
    pub fn tick(
        &mut self,
        sample: Result<f32, SensorError>,
        now_ms: TimestampMs,
    ) -> Result<Evaluation, SensorError> {
        let value = self.chain.process(sample?)?;
        self.last_value = Some(value);
        Ok(self.alarm.evaluate(value, now_ms))
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            alarm_active: self.alarm.level().is_active(),
            escalated: self.alarm.is_escalated(),
            value: self.last_value,
        }
    }

    /// Clear smoothing history; the alarm state is kept
    pub fn reset_signal(&mut self) {
        self.chain.reset();
    }

    pub fn alarm_state(&self) -> AlarmState {
        self.alarm.state()
    }

    pub fn alarm(&self) -> &AlarmMachine<O, E> {
        &self.alarm
    }

    pub fn last_value(&self) -> Option<f32> {
        self.last_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alarm::{AlarmConfig, Threshold};
    use crate::signal::{Identity, MovingAverage};

    struct Flag(bool);

    impl AlarmOutput for Flag {
        fn set_alarm(&mut self, active: bool) {
            self.0 = active;
        }
    }

    fn bilge() -> Monitor<Identity, Flag> {
        let config = AlarmConfig::new(Threshold::High {
            setpoint: 0.5,
            margin: 0.0,
        });
        Monitor::new(Identity, AlarmMachine::new(config, Flag(false)))
    }

    #[test]
    fn test_snapshot_before_first_reading() {
        let monitor = bilge();
        assert_eq!(monitor.snapshot(), MonitorSnapshot::default());
    }

    #[test]
    fn test_digital_switch_through_high_threshold() {
        let mut monitor = bilge();
        let eval = monitor.tick(Ok(1.0), 1000).unwrap();
        assert!(eval.transitioned);
        assert!(monitor.alarm().output().0);
        assert_eq!(
            monitor.snapshot(),
            MonitorSnapshot {
                alarm_active: true,
                escalated: false,
                value: Some(1.0),
            }
        );

        monitor.tick(Ok(0.0), 2000).unwrap();
        assert!(!monitor.snapshot().alarm_active);
    }

    #[test]
    fn test_sensor_error_leaves_state_untouched() {
        let mut monitor = bilge();
        monitor.tick(Ok(1.0), 1000).unwrap();
        let before = monitor.alarm_state();

        let result = monitor.tick(Err(SensorError::OpenCircuit), 2000);
        assert_eq!(result, Err(SensorError::OpenCircuit));
        assert_eq!(monitor.alarm_state(), before);
        assert_eq!(monitor.last_value(), Some(1.0));
    }

    #[test]
    fn test_reset_signal_keeps_alarm() {
        let config = AlarmConfig::new(Threshold::Low { minimum: 12.0 });
        let mut monitor = Monitor::new(
            MovingAverage::new(4),
            AlarmMachine::new(config, Flag(false)),
        );
        monitor.tick(Ok(11.0), 100).unwrap();
        monitor.reset_signal();
        assert!(monitor.snapshot().alarm_active);
        // History gone: the next sample is the whole average
        monitor.tick(Ok(13.0), 200).unwrap();
        assert_eq!(monitor.last_value(), Some(13.0));
        assert!(!monitor.snapshot().alarm_active);
    }
}
