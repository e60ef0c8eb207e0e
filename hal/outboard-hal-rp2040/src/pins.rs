//! Config-driven pin assignment
//!
//! The digital alarm outputs and the float switch are assigned in
//! `vessel.toml`, so their pins are taken from a bank by number at boot.
//! GPIO0/1 (UART0 telemetry link) and GPIO26-29 (analog inputs) keep
//! their concrete types and are handed out through
//! [`RemainingPeripherals`] instead.

use embassy_rp::gpio::AnyPin;
use embassy_rp::peripherals::{ADC, PIN_0, PIN_1, PIN_26, PIN_27, PIN_28, PIN_29, UART0};
use embassy_rp::{Peri, Peripherals};

/// Error when requesting a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number out of range (0-29 valid)
    InvalidPin,
    /// Pin already taken
    AlreadyTaken,
    /// Pin reserved for the telemetry UART or the analog inputs
    Reserved,
}

/// First and one-past-last bankable GPIO
const BANK_FIRST: u8 = 2;
const BANK_END: u8 = 26;
const BANK_SIZE: usize = (BANK_END - BANK_FIRST) as usize;

/// Digital GPIO2-25, taken by number
pub struct PinBank {
    pins: [Option<Peri<'static, AnyPin>>; BANK_SIZE],
}

/// Peripherals left over after the pin bank is built
pub struct RemainingPeripherals {
    pub uart0: Peri<'static, UART0>,
    pub uart_tx: Peri<'static, PIN_0>,
    pub uart_rx: Peri<'static, PIN_1>,
    pub adc: Peri<'static, ADC>,
    pub pin26: Peri<'static, PIN_26>,
    pub pin27: Peri<'static, PIN_27>,
    pub pin28: Peri<'static, PIN_28>,
    pub pin29: Peri<'static, PIN_29>,
}

impl PinBank {
    /// Split the peripherals into the pin bank and everything else
    pub fn from_peripherals(p: Peripherals) -> (Self, RemainingPeripherals) {
        let bank = Self {
            pins: [
                Some(p.PIN_2.into()),
                Some(p.PIN_3.into()),
                Some(p.PIN_4.into()),
                Some(p.PIN_5.into()),
                Some(p.PIN_6.into()),
                Some(p.PIN_7.into()),
                Some(p.PIN_8.into()),
                Some(p.PIN_9.into()),
                Some(p.PIN_10.into()),
                Some(p.PIN_11.into()),
                Some(p.PIN_12.into()),
                Some(p.PIN_13.into()),
                Some(p.PIN_14.into()),
                Some(p.PIN_15.into()),
                Some(p.PIN_16.into()),
                Some(p.PIN_17.into()),
                Some(p.PIN_18.into()),
                Some(p.PIN_19.into()),
                Some(p.PIN_20.into()),
                Some(p.PIN_21.into()),
                Some(p.PIN_22.into()),
                Some(p.PIN_23.into()),
                Some(p.PIN_24.into()),
                Some(p.PIN_25.into()),
            ],
        };
        let remaining = RemainingPeripherals {
            uart0: p.UART0,
            uart_tx: p.PIN_0,
            uart_rx: p.PIN_1,
            adc: p.ADC,
            pin26: p.PIN_26,
            pin27: p.PIN_27,
            pin28: p.PIN_28,
            pin29: p.PIN_29,
        };
        (bank, remaining)
    }

    /// Take a pin by GPIO number
    pub fn take(&mut self, pin_num: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins[slot(pin_num)?]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }

    /// Fail the way [`take`](Self::take) would, without taking the pin
    pub fn check(&self, pin_num: u8) -> Result<(), PinError> {
        if self.pins[slot(pin_num)?].is_some() {
            Ok(())
        } else {
            Err(PinError::AlreadyTaken)
        }
    }
}

/// Bank index of a GPIO
fn slot(pin_num: u8) -> Result<usize, PinError> {
    if pin_num >= 30 {
        Err(PinError::InvalidPin)
    } else if !(BANK_FIRST..BANK_END).contains(&pin_num) {
        Err(PinError::Reserved)
    } else {
        Ok((pin_num - BANK_FIRST) as usize)
    }
}
