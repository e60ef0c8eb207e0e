//! RP2040-specific HAL for the outboard monitor firmware
//!
//! Implements the `outboard-hal` traits on top of `embassy-rp`:
//!
//! - Pin bank for config-driven digital pin assignment
//! - GPIO allocation (conflict detection at boot)
//! - Digital output and input wrappers
//! - Blocking ADC bank for the analog sender inputs

#![no_std]

pub mod adc;
pub mod gpio;
pub mod pins;

pub use adc::{AdcBank, AdcChannel, AdcInput};
pub use gpio::{GpioAllocator, GpioInput, GpioOutput};
pub use pins::{PinBank, PinError, RemainingPeripherals};
