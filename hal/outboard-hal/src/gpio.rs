//! GPIO pin abstractions
//!
//! Alarm buzzers, critical lamps and float switches only ever see these
//! traits. Levels are electrical; drivers apply active-low wiring on top.

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high
    fn set_high(&mut self);

    /// Drive the pin low
    fn set_low(&mut self);

    /// Drive the pin to `high`
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Last level written to the pin
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Pin reads high
    fn is_high(&self) -> bool;

    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
