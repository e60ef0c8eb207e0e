//! Telemetry Link Protocol
//!
//! This crate defines the UART protocol between the monitor (RP2040) and
//! the gateway that owns the boat network. The monitor only ever talks;
//! the gateway turns each value into a boat-data update at its dotted path.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ TYPE │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–250B      │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! Payloads are postcard-encoded; the frame TYPE selects the message.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{TelemetryMessage, MSG_HELLO, MSG_META, MSG_VALUE};
