//! Alarm annunciators

pub mod buzzer;
pub mod critical;

pub use buzzer::AlarmBuzzer;
pub use critical::CriticalLamp;
