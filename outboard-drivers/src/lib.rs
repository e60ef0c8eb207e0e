//! Hardware driver implementations
//!
//! Concrete implementations of the `outboard-core` traits for the parts
//! fitted to the boat:
//!
//! - Coolant temperature sender curve and battery divider scaling
//! - High-water float switch
//! - Alarm buzzer and critical lamp outputs
//! - Signal chain builders for each analog monitor

#![no_std]
#![deny(unsafe_code)]

pub mod chain;
pub mod output;
pub mod sensor;
