//! Battery bank record

use crate::alarm::Threshold;

/// Voltage limits and latest reading of a battery bank
///
/// A plain record: limits are not cross-checked. The monitor refreshes
/// `current_voltage` on every valid reading.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Battery {
    nominal_voltage: f32,
    minimum_voltage: f32,
    maximum_voltage: f32,
    current_voltage: f32,
}

impl Default for Battery {
    /// 12 V lead-acid house bank
    fn default() -> Self {
        Self::new(12.6, 12.0, 14.4, 0.0)
    }
}

impl Battery {
    pub const fn new(
        nominal_voltage: f32,
        minimum_voltage: f32,
        maximum_voltage: f32,
        current_voltage: f32,
    ) -> Self {
        Self {
            nominal_voltage,
            minimum_voltage,
            maximum_voltage,
            current_voltage,
        }
    }

    pub fn nominal_voltage(&self) -> f32 {
        self.nominal_voltage
    }

    pub fn minimum_voltage(&self) -> f32 {
        self.minimum_voltage
    }

    pub fn maximum_voltage(&self) -> f32 {
        self.maximum_voltage
    }

    pub fn current_voltage(&self) -> f32 {
        self.current_voltage
    }

    pub fn set_nominal_voltage(&mut self, voltage: f32) {
        self.nominal_voltage = voltage;
    }

    pub fn set_minimum_voltage(&mut self, voltage: f32) {
        self.minimum_voltage = voltage;
    }

    pub fn set_maximum_voltage(&mut self, voltage: f32) {
        self.maximum_voltage = voltage;
    }

    pub fn set_current_voltage(&mut self, voltage: f32) {
        self.current_voltage = voltage;
    }

    /// Under-voltage alarm threshold
    pub fn threshold(&self) -> Threshold {
        Threshold::Low {
            minimum: self.minimum_voltage,
        }
    }

    /// Latest reading as a fraction of the minimum-to-maximum span
    ///
    /// `None` when the span is empty or inverted.
    pub fn charge_fraction(&self) -> Option<f32> {
        let span = self.maximum_voltage - self.minimum_voltage;
        if span <= 0.0 {
            return None;
        }
        let fraction = (self.current_voltage - self.minimum_voltage) / span;
        Some(fraction.clamp(0.0, 1.0))
    }
}
