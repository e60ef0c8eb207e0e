//! Snapshot to sink adapter
//!
//! On every publish tick the adapter reads each registered monitor's
//! snapshot and hands the values to the sink unchanged: the alarm level
//! as 0/1, the latest conditioned value if there is one, and the
//! escalation flag when its metric is enabled.

use heapless::Vec;

use super::metric::{Metric, MonitorMetrics};
use crate::monitor::{MonitorKind, MonitorSnapshot};
use crate::traits::ValueSink;

/// Maximum registered monitors
pub const MAX_MONITORS: usize = 4;

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

fn send<S: ValueSink>(sink: &mut S, metric: &Metric, value: f32) {
    sink.publish(metric.path.as_str(), value, metric.unit, metric.description);
}

/// Publish one snapshot
pub fn publish_snapshot<S: ValueSink>(
    sink: &mut S,
    metrics: &MonitorMetrics,
    snapshot: &MonitorSnapshot,
) {
    if let Some(value) = snapshot.value {
        send(sink, &metrics.value, value);
    }
    send(sink, &metrics.alarm, flag(snapshot.alarm_active));
    if let Some(critical) = &metrics.critical {
        send(sink, critical, flag(snapshot.escalated));
    }
}

#[derive(Default)]
pub struct TelemetryAdapter {
    entries: Vec<(MonitorKind, MonitorMetrics), MAX_MONITORS>,
}

impl TelemetryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a monitor's metrics
    ///
    /// Hands the metrics back if the adapter is full.
    pub fn register(
        &mut self,
        kind: MonitorKind,
        metrics: MonitorMetrics,
    ) -> Result<(), MonitorMetrics> {
        self.entries
            .push((kind, metrics))
            .map_err(|(_, metrics)| metrics)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Publish every registered monitor, in registration order
    pub fn poll<S, F>(&self, mut snapshot_of: F, sink: &mut S)
    where
        S: ValueSink,
        F: FnMut(MonitorKind) -> MonitorSnapshot,
    {
        for (kind, metrics) in &self.entries {
            let snapshot = snapshot_of(*kind);
            publish_snapshot(sink, metrics, &snapshot);
        }
    }

    /// Every metric that can be published, for metadata announcements
    pub fn metrics(&self) -> impl Iterator<Item = &Metric> {
        self.entries.iter().flat_map(|(_, metrics)| metrics.iter())
    }
}
