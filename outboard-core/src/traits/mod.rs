//! Hardware abstraction traits
//!
//! These traits define the interface between the monitor logic and the
//! drivers, outputs and publishing sink that surround it.

pub mod output;
pub mod sensor;
pub mod sink;

pub use output::AlarmOutput;
pub use sensor::SensorError;
pub use sink::ValueSink;
