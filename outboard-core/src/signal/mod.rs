//! Signal conditioning
//!
//! Each stage turns one `f32` into another and may reject the reading.
//! Stages are composed with [`Stage::then`] into a fixed chain that a
//! monitor owns:
//!
//! ```text
//! coolant: raw -> volts -> rail guard -> smoothed -> ohms -> kelvin -> calibrated
//! battery: raw -> volts -> smoothed -> battery volts -> calibrated
//! ```

pub mod calibration;
pub mod chain;
pub mod conversion;
pub mod divider;
pub mod smoothing;

pub use calibration::{calibrate, LinearCalibration};
pub use chain::{Chain, Identity, Stage};
pub use conversion::{to_voltage, AdcToVoltage};
pub use divider::{voltage_to_resistance, DividerResistance, RailGuard};
pub use smoothing::{ExponentialSmoother, MovingAverage, Smoother, MAX_WINDOW};
