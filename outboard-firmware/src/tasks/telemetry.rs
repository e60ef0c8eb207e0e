//! Telemetry UART task
//!
//! Streams monitor snapshots to the network gateway as protocol frames.
//! Announces the vessel once at boot, sends metric metadata on the first
//! publish and every `meta_refresh_cycles` publishes after that, and a
//! value frame per metric on every publish.

use defmt::*;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;
use heapless::{Deque, String};

use outboard_core::config::MAX_NAME_LEN;
use outboard_core::telemetry::TelemetryAdapter;
use outboard_core::traits::ValueSink;
use outboard_protocol::{Frame, TelemetryMessage, MAX_FRAME_SIZE};

use crate::channels::load_snapshot;

/// Frames buffered between two flushes
///
/// Three monitors with every metric enabled queue nine value frames and
/// nine metadata frames on a refresh cycle.
const FRAME_QUEUE_LEN: usize = 20;

const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Telemetry settings from the `[vessel]` section
pub struct TelemetryConfig {
    pub vessel: String<MAX_NAME_LEN>,
    pub publish_interval_ms: u32,
    pub meta_refresh_cycles: u16,
}

/// Outgoing frame queue
///
/// Publishing never blocks: a frame that does not fit is dropped.
struct FrameQueue {
    frames: Deque<Frame, FRAME_QUEUE_LEN>,
    dropped: u32,
}

impl FrameQueue {
    const fn new() -> Self {
        Self {
            frames: Deque::new(),
            dropped: 0,
        }
    }

    fn push(&mut self, message: TelemetryMessage<'_>) {
        match message.to_frame() {
            Ok(frame) => {
                if self.frames.push_back(frame).is_err() {
                    self.dropped += 1;
                }
            }
            Err(e) => warn!("Failed to encode telemetry message: {}", e),
        }
    }

    /// Write every queued frame, oldest first
    async fn flush(&mut self, tx: &mut BufferedUartTx<'static, UART0>) {
        if self.dropped > 0 {
            warn!("Telemetry queue full, dropped {} frames", self.dropped);
            self.dropped = 0;
        }

        let mut buf = [0u8; MAX_FRAME_SIZE];
        while let Some(frame) = self.frames.pop_front() {
            let len = match frame.encode(&mut buf) {
                Ok(len) => len,
                Err(e) => {
                    warn!("Failed to encode frame: {}", e);
                    continue;
                }
            };
            if let Err(e) = tx.write_all(&buf[..len]).await {
                warn!("Failed to send telemetry frame: {:?}", e);
                self.frames.clear();
                break;
            }
        }
    }
}

impl ValueSink for FrameQueue {
    fn publish(&mut self, path: &str, value: f32, _unit: &str, _description: &str) {
        self.push(TelemetryMessage::Value { path, value });
    }
}

/// Queue a metadata frame for every metric the adapter can publish
fn announce_metrics(adapter: &TelemetryAdapter, queue: &mut FrameQueue) {
    for metric in adapter.metrics() {
        queue.push(TelemetryMessage::Meta {
            path: metric.path.as_str(),
            unit: metric.unit,
            description: metric.description,
        });
    }
}

/// Telemetry task - publishes snapshots at the publish interval
#[embassy_executor::task]
pub async fn telemetry_task(
    mut tx: BufferedUartTx<'static, UART0>,
    adapter: TelemetryAdapter,
    config: TelemetryConfig,
) {
    info!(
        "Telemetry task started ({} monitors, every {} ms)",
        adapter.len(),
        config.publish_interval_ms
    );

    let mut queue = FrameQueue::new();
    queue.push(TelemetryMessage::Hello {
        vessel: config.vessel.as_str(),
        version: FIRMWARE_VERSION,
    });
    queue.flush(&mut tx).await;

    let mut ticker = Ticker::every(Duration::from_millis(config.publish_interval_ms as u64));
    let mut cycle: u16 = 0;

    loop {
        ticker.next().await;

        if cycle == 0 {
            trace!("Announcing metric metadata");
            announce_metrics(&adapter, &mut queue);
        }
        cycle += 1;
        if cycle >= config.meta_refresh_cycles {
            cycle = 0;
        }

        adapter.poll(load_snapshot, &mut queue);
        queue.flush(&mut tx).await;
    }
}
