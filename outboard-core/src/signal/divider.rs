//! Voltage divider inversion
//!
//! Circuit: V_ref -- R_fixed -- ADC_PIN -- sender -- GND
//! R_sender = R_fixed * V / (V_ref - V)

use super::chain::Stage;
use crate::traits::SensorError;

/// Guard band at each rail, as a fraction of the reference voltage
///
/// About 20 counts on a 12-bit converter. Readings this close to a rail
/// are a broken or shorted sender, not a temperature.
pub const RAIL_GUARD_FRACTION: f32 = 0.005;

/// Invert the divider to get the sender resistance in ohms
///
/// Fails closed: readings within the guard band of either rail are
/// reported as faults instead of producing a huge or zero resistance.
pub fn voltage_to_resistance(
    voltage: f32,
    reference_voltage: f32,
    fixed_resistor_ohms: f32,
) -> Result<f32, SensorError> {
    if !voltage.is_finite() {
        return Err(SensorError::OutOfRange);
    }

    let guard = reference_voltage * RAIL_GUARD_FRACTION;
    if voltage >= reference_voltage - guard {
        return Err(SensorError::OpenCircuit);
    }
    if voltage <= guard {
        return Err(SensorError::ShortCircuit);
    }

    Ok(fixed_resistor_ohms * voltage / (reference_voltage - voltage))
}

/// Rejects pin voltages pinned to either rail
///
/// Sits ahead of the smoother so a broken or shorted sender is reported
/// on the first sample instead of dragging the average through the
/// sender curve.
#[derive(Debug, Clone, Copy)]
pub struct RailGuard {
    pub reference_voltage: f32,
}

impl RailGuard {
    pub const fn new(reference_voltage: f32) -> Self {
        Self { reference_voltage }
    }
}

impl Stage for RailGuard {
    fn process(&mut self, input: f32) -> Result<f32, SensorError> {
        let guard = self.reference_voltage * RAIL_GUARD_FRACTION;
        if input >= self.reference_voltage - guard {
            Err(SensorError::OpenCircuit)
        } else if input <= guard {
            Err(SensorError::ShortCircuit)
        } else {
            Ok(input)
        }
    }
}

/// Divider inversion stage (volts in, ohms out)
#[derive(Debug, Clone, Copy)]
pub struct DividerResistance {
    pub reference_voltage: f32,
    pub fixed_resistor_ohms: f32,
}

impl DividerResistance {
    pub const fn new(reference_voltage: f32, fixed_resistor_ohms: f32) -> Self {
        Self {
            reference_voltage,
            fixed_resistor_ohms,
        }
    }
}

impl Stage for DividerResistance {
    fn process(&mut self, input: f32) -> Result<f32, SensorError> {
        voltage_to_resistance(input, self.reference_voltage, self.fixed_resistor_ohms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, eps: f32) -> bool {
        let d = a - b;
        d < eps && d > -eps
    }

    #[test]
    fn test_midpoint_equals_fixed_resistor() {
        let r = voltage_to_resistance(1.645, 3.29, 330.0).unwrap();
        assert!(close(r, 330.0, 0.01));
    }

    #[test]
    fn test_hot_sender() {
        // 70.1 ohm sender (about 80 °C) on a 330 ohm divider
        let v = 3.29 * 70.1 / (330.0 + 70.1);
        let r = voltage_to_resistance(v, 3.29, 330.0).unwrap();
        assert!(close(r, 70.1, 0.01));
    }

    #[test]
    fn test_open_circuit() {
        assert_eq!(
            voltage_to_resistance(3.29, 3.29, 330.0),
            Err(SensorError::OpenCircuit)
        );
        assert_eq!(
            voltage_to_resistance(3.285, 3.29, 330.0),
            Err(SensorError::OpenCircuit)
        );
    }

    #[test]
    fn test_short_circuit() {
        assert_eq!(
            voltage_to_resistance(0.0, 3.29, 330.0),
            Err(SensorError::ShortCircuit)
        );
        assert_eq!(
            voltage_to_resistance(0.01, 3.29, 330.0),
            Err(SensorError::ShortCircuit)
        );
    }

    #[test]
    fn test_rail_guard_passes_mid_scale() {
        let mut guard = RailGuard::new(3.29);
        assert_eq!(guard.process(1.2), Ok(1.2));
        assert_eq!(guard.process(3.27), Ok(3.27));
    }

    #[test]
    fn test_rail_guard_rejects_rails() {
        let mut guard = RailGuard::new(3.29);
        assert_eq!(guard.process(3.29), Err(SensorError::OpenCircuit));
        assert_eq!(guard.process(3.2851), Err(SensorError::OpenCircuit));
        assert_eq!(guard.process(0.0), Err(SensorError::ShortCircuit));
        assert_eq!(guard.process(0.016), Err(SensorError::ShortCircuit));
    }

    #[test]
    fn test_nan_rejected() {
        let mut stage = DividerResistance::new(3.29, 330.0);
        assert_eq!(stage.process(f32::NAN), Err(SensorError::OutOfRange));
    }
}
