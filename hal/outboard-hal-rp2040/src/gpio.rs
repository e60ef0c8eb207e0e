//! GPIO allocation and digital pin wrappers

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;
use heapless::FnvIndexSet;
use outboard_hal::{InputPin, OutputPin};

use crate::pins::PinError;

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: usize = 30;

/// GPIO allocator to track pin usage
///
/// The firmware runs every configured pin through one allocator before
/// touching hardware, so a config that wires two functions to the same
/// pin is rejected at boot.
pub struct GpioAllocator {
    allocated: FnvIndexSet<u8, 32>,
}

impl Default for GpioAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioAllocator {
    pub fn new() -> Self {
        Self {
            allocated: FnvIndexSet::new(),
        }
    }

    /// Claim a GPIO pin
    pub fn allocate(&mut self, pin: u8) -> Result<(), PinError> {
        if pin >= GPIO_COUNT as u8 {
            return Err(PinError::InvalidPin);
        }
        if self.allocated.contains(&pin) {
            return Err(PinError::AlreadyTaken);
        }
        self.allocated
            .insert(pin)
            .map_err(|_| PinError::InvalidPin)?;
        Ok(())
    }

    pub fn allocated_count(&self) -> usize {
        self.allocated.len()
    }
}

/// Push-pull output implementing [`OutputPin`]
///
/// Drives the raw pin level. Active-low wiring is handled by the driver
/// that owns the pin.
pub struct GpioOutput {
    output: Output<'static>,
}

impl GpioOutput {
    /// Configure the pin as an output driven low
    pub fn new(pin: Peri<'static, AnyPin>) -> Self {
        Self {
            output: Output::new(pin, Level::Low),
        }
    }
}

impl OutputPin for GpioOutput {
    fn set_high(&mut self) {
        self.output.set_high();
    }

    fn set_low(&mut self) {
        self.output.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.output.is_set_high()
    }
}

/// Digital input implementing [`InputPin`]
pub struct GpioInput {
    input: Input<'static>,
}

impl GpioInput {
    pub fn new(pin: Peri<'static, AnyPin>, pull_up: bool) -> Self {
        let pull = if pull_up { Pull::Up } else { Pull::None };
        Self {
            input: Input::new(pin, pull),
        }
    }
}

impl InputPin for GpioInput {
    fn is_high(&self) -> bool {
        self.input.is_high()
    }
}
