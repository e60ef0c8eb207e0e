//! Raw ADC sample to volts

use super::chain::Stage;
use crate::traits::SensorError;

/// Scale a raw sample to volts
///
/// `raw` is clamped to `full_scale_raw`, so the result is always in
/// `[0, reference_voltage]`.
pub fn to_voltage(raw: u16, full_scale_raw: u16, reference_voltage: f32) -> f32 {
    if full_scale_raw == 0 {
        return 0.0;
    }
    let raw = raw.min(full_scale_raw);
    raw as f32 * reference_voltage / full_scale_raw as f32
}

/// First stage of the analog chains
///
/// Its input is the raw sample widened to `f32`.
#[derive(Debug, Clone, Copy)]
pub struct AdcToVoltage {
    pub full_scale_raw: u16,
    pub reference_voltage: f32,
}

impl AdcToVoltage {
    pub const fn new(full_scale_raw: u16, reference_voltage: f32) -> Self {
        Self {
            full_scale_raw,
            reference_voltage,
        }
    }
}

impl Stage for AdcToVoltage {
    fn process(&mut self, input: f32) -> Result<f32, SensorError> {
        if !input.is_finite() || input < 0.0 {
            return Err(SensorError::ConversionError);
        }
        let raw = if input >= self.full_scale_raw as f32 {
            self.full_scale_raw
        } else {
            input as u16
        };
        Ok(to_voltage(raw, self.full_scale_raw, self.reference_voltage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        let d = a - b;
        d < 1e-4 && d > -1e-4
    }

    #[test]
    fn test_endpoints() {
        assert_eq!(to_voltage(0, 4095, 3.29), 0.0);
        assert!(close(to_voltage(4095, 4095, 3.29), 3.29));
    }

    #[test]
    fn test_midscale() {
        assert!(close(to_voltage(2048, 4096, 3.3), 1.65));
    }

    #[test]
    fn test_raw_clamped_to_full_scale() {
        assert!(close(to_voltage(u16::MAX, 4095, 3.29), 3.29));
    }

    #[test]
    fn test_zero_full_scale() {
        assert_eq!(to_voltage(100, 0, 3.29), 0.0);
    }

    #[test]
    fn test_stage_rejects_garbage() {
        let mut stage = AdcToVoltage::new(4095, 3.29);
        assert_eq!(stage.process(f32::NAN), Err(SensorError::ConversionError));
        assert_eq!(stage.process(-1.0), Err(SensorError::ConversionError));
        assert!(close(stage.process(5000.0).unwrap(), 3.29));
    }
}
