//! Telemetry metrics and the publisher adapter

pub mod adapter;
pub mod metric;

pub use adapter::{publish_snapshot, TelemetryAdapter, MAX_MONITORS};
pub use metric::{metric_path, suffix, Metric, MetricPath, MonitorMetrics, PathError, MAX_PATH_LEN};
