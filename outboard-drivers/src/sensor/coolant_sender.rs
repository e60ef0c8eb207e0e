//! Coolant temperature sender
//!
//! Marine engine senders are NTC resistors to ground, roughly 290 Ω at
//! 40 °C falling to about 22 Ω at 120 °C. The curve below follows a
//! 120 °C sender (beta ≈ 3950 K through those two points) and is used as a
//! conversion stage: ohms in, Kelvin out.

use outboard_core::config::KELVIN_OFFSET;
use outboard_core::signal::Stage;
use outboard_core::traits::SensorError;

/// Sender lookup table
///
/// Table format: (resistance_ohms, temperature_celsius), sorted by
/// decreasing resistance (increasing temperature).
///
/// Temperature range: 0 °C to 150 °C
const SENDER_TABLE: &[(f32, f32)] = &[
    (1848.0, 0.0),
    (1109.0, 10.0),
    (689.0, 20.0),
    (442.0, 30.0),
    (291.5, 40.0),
    (197.2, 50.0),
    (136.7, 60.0),
    (96.8, 70.0),
    (69.9, 80.0), // typical running temperature
    (51.3, 90.0),
    (38.4, 100.0),
    (29.1, 110.0),
    (22.4, 120.0),
    (17.4, 130.0),
    (13.8, 140.0),
    (11.0, 150.0), // boiling under pressure
];

/// Convert sender resistance to Kelvin
///
/// Linear interpolation between table entries. Resistance outside the
/// table is `OutOfRange`.
pub fn resistance_to_kelvin(resistance: f32) -> Result<f32, SensorError> {
    let (r_cold, _) = SENDER_TABLE[0];
    let (r_hot, _) = SENDER_TABLE[SENDER_TABLE.len() - 1];

    // NaN fails both comparisons, so test the in-range condition
    if !(resistance <= r_cold && resistance >= r_hot) {
        return Err(SensorError::OutOfRange);
    }

    for pair in SENDER_TABLE.windows(2) {
        let (r_high, t_low) = pair[0];
        let (r_low, t_high) = pair[1];

        if resistance <= r_high && resistance >= r_low {
            let fraction = (r_high - resistance) / (r_high - r_low);
            return Ok(t_low + (t_high - t_low) * fraction + KELVIN_OFFSET);
        }
    }

    Err(SensorError::OutOfRange)
}

/// Sender curve as a chain stage
#[derive(Debug, Clone, Copy, Default)]
pub struct CoolantSender;

impl Stage for CoolantSender {
    fn process(&mut self, input: f32) -> Result<f32, SensorError> {
        resistance_to_kelvin(input)
    }
}
