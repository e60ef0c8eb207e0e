//! Analog input abstraction

/// Failure of a single analog conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Conversion did not complete
    ConversionFailed,
}

/// One analog channel delivering raw samples
///
/// Samples are in `[0, full_scale()]`.
pub trait AnalogInput {
    /// Take one raw sample
    fn read(&mut self) -> Result<u16, AdcError>;

    /// Largest raw value the converter can produce (4095 for 12 bits)
    fn full_scale(&self) -> u16;
}
