//! Alarm output trait

/// Local annunciator driven by an alarm state machine
///
/// Implementations drive a buzzer, lamp or relay. Writes are
/// fire-and-forget; the state machine only calls this on a transition.
pub trait AlarmOutput {
    /// Assert (`true`) or release (`false`) the alarm
    fn set_alarm(&mut self, active: bool);
}
