//! Critical alarm lamp
//!
//! Second output lit when an alarm has been active past its escalation
//! dwell, e.g. a strobe on the helm or a louder horn.

use outboard_core::alarm::EscalationAction;
use outboard_hal::OutputPin;

pub struct CriticalLamp<P> {
    pin: P,
    /// If true, lamp ON = pin LOW
    inverted: bool,
    lit: bool,
}

impl<P: OutputPin> CriticalLamp<P> {
    /// Create a lamp output, driven dark
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut lamp = Self {
            pin,
            inverted,
            lit: false,
        };
        lamp.drive(false);
        lamp
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn drive(&mut self, lit: bool) {
        self.lit = lit;
        self.pin.set_state(lit != self.inverted);
    }
}

impl<P: OutputPin> EscalationAction for CriticalLamp<P> {
    fn escalate(&mut self) {
        self.drive(true);
    }

    fn clear(&mut self) {
        self.drive(false);
    }
}
