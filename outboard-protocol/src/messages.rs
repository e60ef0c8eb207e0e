//! Message types for the telemetry link
//!
//! All messages flow monitor → gateway:
//! - `Hello` once at boot, so the gateway knows which vessel is talking
//! - `Meta` announces the unit and description for a path
//! - `Value` carries one reading

use serde::{Deserialize, Serialize};

use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message type IDs
pub const MSG_HELLO: u8 = 0x01;
pub const MSG_META: u8 = 0x10;
pub const MSG_VALUE: u8 = 0x11;

/// Messages from the monitor to the gateway
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelemetryMessage<'a> {
    /// Boot announcement
    Hello { vessel: &'a str, version: &'a str },
    /// Metadata for a metric path
    Meta {
        path: &'a str,
        unit: &'a str,
        description: &'a str,
    },
    /// One reading
    Value { path: &'a str, value: f32 },
}

#[derive(Serialize, Deserialize)]
struct HelloPayload<'a> {
    vessel: &'a str,
    version: &'a str,
}

#[derive(Serialize, Deserialize)]
struct MetaPayload<'a> {
    path: &'a str,
    unit: &'a str,
    description: &'a str,
}

#[derive(Serialize, Deserialize)]
struct ValuePayload<'a> {
    path: &'a str,
    value: f32,
}

fn encode<T: Serialize>(msg_type: u8, payload: &T) -> Result<Frame, FrameError> {
    let mut buffer = [0u8; MAX_PAYLOAD_SIZE];
    let bytes = postcard::to_slice(payload, &mut buffer).map_err(|e| match e {
        postcard::Error::SerializeBufferFull => FrameError::PayloadTooLarge,
        _ => FrameError::Codec,
    })?;
    Frame::new(msg_type, bytes)
}

fn decode<'a, T: Deserialize<'a>>(payload: &'a [u8]) -> Result<T, FrameError> {
    postcard::from_bytes(payload).map_err(|_| FrameError::Codec)
}

impl<'a> TelemetryMessage<'a> {
    /// Encode this message into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match *self {
            TelemetryMessage::Hello { vessel, version } => {
                encode(MSG_HELLO, &HelloPayload { vessel, version })
            }
            TelemetryMessage::Meta {
                path,
                unit,
                description,
            } => encode(
                MSG_META,
                &MetaPayload {
                    path,
                    unit,
                    description,
                },
            ),
            TelemetryMessage::Value { path, value } => {
                encode(MSG_VALUE, &ValuePayload { path, value })
            }
        }
    }

    /// Decode a message from a frame, borrowing strings from its payload
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        match frame.msg_type {
            MSG_HELLO => {
                let p: HelloPayload<'a> = decode(&frame.payload)?;
                Ok(TelemetryMessage::Hello {
                    vessel: p.vessel,
                    version: p.version,
                })
            }
            MSG_META => {
                let p: MetaPayload<'a> = decode(&frame.payload)?;
                Ok(TelemetryMessage::Meta {
                    path: p.path,
                    unit: p.unit,
                    description: p.description,
                })
            }
            MSG_VALUE => {
                let p: ValuePayload<'a> = decode(&frame.payload)?;
                Ok(TelemetryMessage::Value {
                    path: p.path,
                    value: p.value,
                })
            }
            other => Err(FrameError::UnknownType(other)),
        }
    }
}
