//! Alarm hysteresis state machine and escalation

pub mod escalation;
pub mod machine;
pub mod threshold;

pub use escalation::{should_escalate, EscalationAction, NoEscalation};
pub use machine::{AlarmConfig, AlarmLevel, AlarmMachine, AlarmState, Evaluation};
pub use threshold::Threshold;

/// Default time an alarm must stay active before it escalates
pub const DEFAULT_ESCALATION_DWELL_MS: u32 = 3000;
