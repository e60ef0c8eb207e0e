//! Embassy async tasks
//!
//! Each task runs independently and communicates via the snapshot cells
//! in `channels`.

pub mod monitor;
pub mod telemetry;

pub use monitor::{monitor_task, AnalogMonitor, BilgeMonitor, MonitorSet};
pub use telemetry::{telemetry_task, TelemetryConfig};
