//! Battery voltage divider
//!
//! Circuit: V_batt -- R_top -- ADC_PIN -- R_bottom -- GND
//! V_batt = V_pin * (R_top + R_bottom) / R_bottom

use outboard_core::signal::Stage;
use outboard_core::traits::SensorError;

/// Scale the voltage at the ADC pin back up to the battery voltage
#[derive(Debug, Clone, Copy)]
pub struct BatteryDivider {
    ratio: f32,
}

impl BatteryDivider {
    /// `bottom_ohms` must be positive; config validation guarantees it
    pub fn new(top_ohms: f32, bottom_ohms: f32) -> Self {
        Self {
            ratio: (top_ohms + bottom_ohms) / bottom_ohms,
        }
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }
}

impl Stage for BatteryDivider {
    fn process(&mut self, input: f32) -> Result<f32, SensorError> {
        let volts = input * self.ratio;
        if volts.is_finite() {
            Ok(volts)
        } else {
            Err(SensorError::OutOfRange)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        let divider = BatteryDivider::new(10_000.0, 2_500.0);
        assert_eq!(divider.ratio(), 5.0);
    }

    #[test]
    fn test_scales_pin_voltage() {
        let mut divider = BatteryDivider::new(10_000.0, 2_500.0);
        assert_eq!(divider.process(2.5), Ok(12.5));
    }

    #[test]
    fn test_zero_bottom_rejected_at_runtime() {
        let mut divider = BatteryDivider::new(10_000.0, 0.0);
        assert_eq!(divider.process(1.0), Err(SensorError::OutOfRange));
    }
}
