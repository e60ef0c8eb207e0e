//! Alarm thresholds

/// Trip condition of one monitored quantity
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Threshold {
    /// Alarm when the value rises above `setpoint + margin`
    High { setpoint: f32, margin: f32 },
    /// Alarm when the value falls below `minimum`
    Low { minimum: f32 },
}

impl Threshold {
    /// Value at which the alarm trips
    pub fn trip_point(&self) -> f32 {
        match *self {
            Threshold::High { setpoint, margin } => setpoint + margin,
            Threshold::Low { minimum } => minimum,
        }
    }

    /// Strict comparison: a value exactly at the trip point is not a violation
    pub fn is_violated(&self, value: f32) -> bool {
        match *self {
            Threshold::High { .. } => value > self.trip_point(),
            Threshold::Low { minimum } => value < minimum,
        }
    }

    /// Whether an active alarm may clear
    ///
    /// With `clear_margin == 0.0` this is exactly `!is_violated(value)`.
    /// A positive margin moves the clear point away from the trip point.
    pub fn is_cleared(&self, value: f32, clear_margin: f32) -> bool {
        match *self {
            Threshold::High { .. } => value <= self.trip_point() - clear_margin,
            Threshold::Low { minimum } => value >= minimum + clear_margin,
        }
    }
}
