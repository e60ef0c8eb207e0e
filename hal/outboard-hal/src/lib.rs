//! Outboard Hardware Abstraction Layer
//!
//! Traits the monitor logic is written against, implemented by the
//! chip-specific HAL (`outboard-hal-rp2040`) and by mocks in host tests.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  outboard-firmware / outboard-drivers   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  outboard-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌─────────────────────┐
//!          │ outboard-hal-rp2040 │
//!          └─────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`adc::AnalogInput`] - Raw analog samples

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;

pub use adc::{AdcError, AnalogInput};
pub use gpio::{InputPin, OutputPin};
