//! Sensors and conversion stages

pub mod battery_divider;
pub mod coolant_sender;
pub mod float_switch;

pub use battery_divider::BatteryDivider;
pub use coolant_sender::CoolantSender;
pub use float_switch::FloatSwitch;
