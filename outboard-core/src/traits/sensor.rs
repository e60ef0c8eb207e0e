//! Sensor pipeline errors

/// Errors that can occur while conditioning a reading
///
/// Any of these makes the monitor skip the tick: the alarm state and the
/// last published value stay as they were.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sender disconnected (divider output pinned at the reference)
    OpenCircuit,
    /// Sender shorted to ground
    ShortCircuit,
    /// Reading outside the sender curve or not a finite number
    OutOfRange,
    /// ADC conversion error
    ConversionError,
}
