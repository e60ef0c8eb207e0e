//! Escalation of long-standing alarms
//!
//! An alarm that stays active longer than its dwell escalates once. The
//! action is pluggable: [`NoEscalation`] does nothing, a critical lamp or
//! second buzzer can be plugged in by the firmware.

use crate::TimestampMs;

/// Whether an active alarm has outlasted `dwell_ms`
///
/// Strictly greater than the dwell. Tick arithmetic wraps.
pub fn should_escalate(
    active: bool,
    last_transition_ms: TimestampMs,
    now_ms: TimestampMs,
    dwell_ms: u32,
) -> bool {
    active && now_ms.wrapping_sub(last_transition_ms) > dwell_ms
}

/// Side effect run when an alarm escalates
pub trait EscalationAction {
    /// Called once when the alarm escalates
    fn escalate(&mut self);

    /// Called once when an escalated alarm clears
    fn clear(&mut self);
}

/// Escalation hook that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEscalation;

impl EscalationAction for NoEscalation {
    fn escalate(&mut self) {}

    fn clear(&mut self) {}
}

/// Optional action, for outputs that may not be configured
impl<T: EscalationAction> EscalationAction for Option<T> {
    fn escalate(&mut self) {
        if let Some(action) = self {
            action.escalate();
        }
    }

    fn clear(&mut self) {
        if let Some(action) = self {
            action.clear();
        }
    }
}
