//! High-water float switch

use outboard_hal::InputPin;

/// Bilge float switch on a digital input
///
/// Most switches close to ground when the float lifts, so the input is
/// usually wired active-low with the internal pull-up.
pub struct FloatSwitch<P> {
    pin: P,
    /// If true, high water = pin LOW
    inverted: bool,
}

impl<P: InputPin> FloatSwitch<P> {
    pub fn new(pin: P, inverted: bool) -> Self {
        Self { pin, inverted }
    }

    pub fn is_high_water(&self) -> bool {
        self.pin.is_high() != self.inverted
    }

    /// Switch state as a monitor sample: 1.0 for high water, 0.0 otherwise
    pub fn sample(&self) -> f32 {
        if self.is_high_water() {
            1.0
        } else {
            0.0
        }
    }
}
