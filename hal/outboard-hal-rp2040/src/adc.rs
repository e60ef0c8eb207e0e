//! ADC bank for the analog sender inputs
//!
//! RP2040 has a single 12-bit ADC with four external channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//!
//! The bank owns the converter and all four channels. Reads are blocking;
//! a conversion takes about 2 µs, far below the sample period.

use embassy_rp::adc::{Adc, Blocking, Channel, Config};
use embassy_rp::gpio::Pull;
use embassy_rp::peripherals::{ADC, PIN_26, PIN_27, PIN_28, PIN_29};
use embassy_rp::Peri;
use outboard_hal::{AdcError, AnalogInput};

/// Full-scale raw reading of the 12-bit converter
pub const ADC_FULL_SCALE: u16 = 4095;

/// ADC channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// ADC0 on GPIO26
    Adc0,
    /// ADC1 on GPIO27
    Adc1,
    /// ADC2 on GPIO28
    Adc2,
    /// ADC3 on GPIO29
    Adc3,
}

impl AdcChannel {
    /// Get the GPIO pin for this ADC channel
    pub fn gpio(&self) -> u8 {
        match self {
            AdcChannel::Adc0 => 26,
            AdcChannel::Adc1 => 27,
            AdcChannel::Adc2 => 28,
            AdcChannel::Adc3 => 29,
        }
    }

    /// Get ADC channel from GPIO pin
    pub fn from_gpio(gpio: u8) -> Option<Self> {
        match gpio {
            26 => Some(AdcChannel::Adc0),
            27 => Some(AdcChannel::Adc1),
            28 => Some(AdcChannel::Adc2),
            29 => Some(AdcChannel::Adc3),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Converter plus the four external channels
pub struct AdcBank {
    adc: Adc<'static, Blocking>,
    channels: [Channel<'static>; 4],
}

impl AdcBank {
    /// Take the ADC and the four analog-capable pins
    pub fn new(
        adc: Peri<'static, ADC>,
        pin26: Peri<'static, PIN_26>,
        pin27: Peri<'static, PIN_27>,
        pin28: Peri<'static, PIN_28>,
        pin29: Peri<'static, PIN_29>,
    ) -> Self {
        Self {
            adc: Adc::new_blocking(adc, Config::default()),
            channels: [
                Channel::new_pin(pin26, Pull::None),
                Channel::new_pin(pin27, Pull::None),
                Channel::new_pin(pin28, Pull::None),
                Channel::new_pin(pin29, Pull::None),
            ],
        }
    }

    /// Sample one channel
    pub fn read(&mut self, channel: AdcChannel) -> Result<u16, AdcError> {
        self.adc
            .blocking_read(&mut self.channels[channel.index()])
            .map_err(|_| AdcError::ConversionFailed)
    }

    /// Borrow one channel as an [`AnalogInput`]
    pub fn input(&mut self, channel: AdcChannel) -> AdcInput<'_> {
        AdcInput {
            bank: self,
            channel,
        }
    }
}

/// Single channel view of an [`AdcBank`]
pub struct AdcInput<'a> {
    bank: &'a mut AdcBank,
    channel: AdcChannel,
}

impl AnalogInput for AdcInput<'_> {
    fn read(&mut self) -> Result<u16, AdcError> {
        let raw = self.bank.read(self.channel)?;
        Ok(raw.min(ADC_FULL_SCALE))
    }

    fn full_scale(&self) -> u16 {
        ADC_FULL_SCALE
    }
}
