//! State shared between tasks
//!
//! The monitor task is the only writer. The telemetry task copies the
//! latest snapshot out on every publish tick.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use outboard_core::monitor::{MonitorKind, MonitorSnapshot};

type SnapshotCell = Mutex<CriticalSectionRawMutex, Cell<MonitorSnapshot>>;

const NO_READING: MonitorSnapshot = MonitorSnapshot {
    alarm_active: false,
    escalated: false,
    value: None,
};

static COOLANT_SNAPSHOT: SnapshotCell = Mutex::new(Cell::new(NO_READING));
static BATTERY_SNAPSHOT: SnapshotCell = Mutex::new(Cell::new(NO_READING));
static BILGE_SNAPSHOT: SnapshotCell = Mutex::new(Cell::new(NO_READING));

fn cell(kind: MonitorKind) -> &'static SnapshotCell {
    match kind {
        MonitorKind::Coolant => &COOLANT_SNAPSHOT,
        MonitorKind::Battery => &BATTERY_SNAPSHOT,
        MonitorKind::Bilge => &BILGE_SNAPSHOT,
    }
}

/// Publish a monitor's latest snapshot
pub fn store_snapshot(kind: MonitorKind, snapshot: MonitorSnapshot) {
    cell(kind).lock(|c| c.set(snapshot));
}

/// Copy out a monitor's latest snapshot
pub fn load_snapshot(kind: MonitorKind) -> MonitorSnapshot {
    cell(kind).lock(|c| c.get())
}
