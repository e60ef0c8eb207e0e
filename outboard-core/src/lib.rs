//! Board-agnostic core logic for the outboard monitor firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Signal conditioning stages (scaling, smoothing, divider inversion,
//!   calibration) and the chain that composes them
//! - The alarm hysteresis state machine and its escalation hook
//! - Monitors, the per-quantity pipeline owners
//! - Telemetry metric paths and the publisher adapter
//! - Vessel configuration types and the TOML subset parser

#![no_std]
#![deny(unsafe_code)]

pub mod alarm;
pub mod battery;
pub mod config;
pub mod monitor;
pub mod signal;
pub mod telemetry;
pub mod traits;

/// Millisecond tick count since boot
///
/// Wraps after ~49.7 days; all interval arithmetic uses `wrapping_sub`.
pub type TimestampMs = u32;
