//! Vessel configuration
//!
//! Configuration is written as `vessel.toml`, embedded in the firmware
//! image and parsed at boot.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, parse_pin, validate, ParseError};
pub use types::*;
