//! GPIO alarm buzzer
//!
//! Drives a buzzer, strobe or relay through a GPIO pin (directly or via an
//! optocoupler/MOSFET).

use outboard_core::traits::AlarmOutput;
use outboard_hal::OutputPin;

/// Alarm output on a GPIO pin
///
/// The pin can be configured as active-high (default) or active-low.
pub struct AlarmBuzzer<P> {
    pin: P,
    /// If true, alarm ON = pin LOW
    inverted: bool,
    /// Current logical state (true = sounding)
    active: bool,
}

impl<P: OutputPin> AlarmBuzzer<P> {
    /// Create a buzzer output, driven to silent
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut buzzer = Self {
            pin,
            inverted,
            active: false,
        };
        buzzer.drive(false);
        buzzer
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn drive(&mut self, active: bool) {
        self.active = active;
        self.pin.set_state(active != self.inverted);
    }
}

impl<P: OutputPin> AlarmOutput for AlarmBuzzer<P> {
    fn set_alarm(&mut self, active: bool) {
        self.drive(active);
    }
}
