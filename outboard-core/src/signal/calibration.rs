//! Linear calibration

use super::chain::Stage;
use crate::traits::SensorError;

/// `value * gain + offset`
pub fn calibrate(value: f32, gain: f32, offset: f32) -> f32 {
    value * gain + offset
}

/// Final trim stage of a chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCalibration {
    pub gain: f32,
    pub offset: f32,
}

impl Default for LinearCalibration {
    fn default() -> Self {
        Self {
            gain: 1.0,
            offset: 0.0,
        }
    }
}

impl LinearCalibration {
    pub const fn new(gain: f32, offset: f32) -> Self {
        Self { gain, offset }
    }
}

impl Stage for LinearCalibration {
    fn process(&mut self, input: f32) -> Result<f32, SensorError> {
        Ok(calibrate(input, self.gain, self.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_by_default() {
        let mut cal = LinearCalibration::default();
        assert_eq!(cal.process(353.15), Ok(353.15));
    }

    #[test]
    fn test_gain_and_offset() {
        assert_eq!(calibrate(10.0, 2.0, -1.0), 19.0);
        let mut cal = LinearCalibration::new(0.5, 4.0);
        assert_eq!(cal.process(8.0), Ok(8.0));
    }
}
