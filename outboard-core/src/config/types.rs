//! Configuration type definitions
//!
//! These types mirror the sections of `vessel.toml`. Every field has a
//! default, so a file only needs to name what differs from the stock
//! installation.

use core::ops::RangeInclusive;

use heapless::{String, Vec};

use crate::alarm::{AlarmConfig, Threshold, DEFAULT_ESCALATION_DWELL_MS};
use crate::battery::Battery;
use crate::signal::{ExponentialSmoother, LinearCalibration, MovingAverage, Smoother};

/// Maximum vessel name length
pub const MAX_NAME_LEN: usize = 24;

/// Maximum number of pins a configuration can claim
pub const MAX_CONFIG_PINS: usize = 12;

/// GPIOs free for alarm outputs and switch inputs
///
/// GPIO0/1 carry the gateway UART and GPIO26-29 are the ADC bank.
pub const DIGITAL_PINS: RangeInclusive<u8> = 2..=25;

/// GPIOs wired to the ADC
pub const ANALOG_PINS: RangeInclusive<u8> = 26..=29;

/// Zero Celsius in Kelvin
pub const KELVIN_OFFSET: f32 = 273.15;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Active-low input with the internal pull-up enabled
    pub const fn switch_to_ground(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// Smoothing method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SmoothingKind {
    #[default]
    MovingAverage,
    Exponential,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SmoothingConfig {
    pub kind: SmoothingKind,
    /// Moving average window in samples
    pub window: u8,
    /// Exponential weight of the newest sample
    pub alpha: f32,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            kind: SmoothingKind::MovingAverage,
            window: 20,
            alpha: 0.1,
        }
    }
}

impl SmoothingConfig {
    pub fn smoother(&self) -> Smoother {
        match self.kind {
            SmoothingKind::MovingAverage => {
                Smoother::MovingAverage(MovingAverage::new(self.window as usize))
            }
            SmoothingKind::Exponential => {
                Smoother::Exponential(ExponentialSmoother::new(self.alpha))
            }
        }
    }
}

/// Common front end of the analog chains
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogConfig {
    /// ADC-capable pin (GPIO26-29)
    pub sensor_pin: PinConfig,
    /// Voltage across the divider, also the ADC reference
    pub reference_voltage: f32,
    pub full_scale_raw: u16,
    pub smoothing: SmoothingConfig,
    pub gain: f32,
    pub offset: f32,
}

impl AnalogConfig {
    fn with_pin(pin: u8) -> Self {
        Self {
            sensor_pin: PinConfig::new(pin),
            reference_voltage: 3.29,
            full_scale_raw: 4095,
            smoothing: SmoothingConfig::default(),
            gain: 1.0,
            offset: 0.0,
        }
    }

    pub fn calibration(&self) -> LinearCalibration {
        LinearCalibration::new(self.gain, self.offset)
    }

    /// Adopt the converter's full-scale reading
    ///
    /// Returns the configured value when it disagreed with the converter.
    pub fn match_converter(&mut self, converter_full_scale: u16) -> Option<u16> {
        if self.full_scale_raw == converter_full_scale {
            return None;
        }
        let configured = self.full_scale_raw;
        self.full_scale_raw = converter_full_scale;
        Some(configured)
    }
}

/// Alarm behaviour shared by all monitors
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmTuning {
    pub alarm_pin: PinConfig,
    /// Secondary output driven when the alarm escalates
    pub critical_pin: Option<PinConfig>,
    /// Publish the `.critical` metric
    pub publish_critical: bool,
    pub clear_margin: f32,
    pub min_dwell_ms: u32,
    pub escalation_dwell_ms: u32,
}

impl AlarmTuning {
    fn with_pin(pin: u8) -> Self {
        Self {
            alarm_pin: PinConfig::new(pin),
            critical_pin: None,
            publish_critical: false,
            clear_margin: 0.0,
            min_dwell_ms: 0,
            escalation_dwell_ms: DEFAULT_ESCALATION_DWELL_MS,
        }
    }

    pub fn alarm_config(&self, threshold: Threshold) -> AlarmConfig {
        AlarmConfig {
            threshold,
            clear_margin: self.clear_margin,
            min_dwell_ms: self.min_dwell_ms,
            escalation_dwell_ms: self.escalation_dwell_ms,
        }
    }
}

/// `[vessel]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VesselInfo {
    pub name: String<MAX_NAME_LEN>,
    pub sample_interval_ms: u32,
    pub publish_interval_ms: u32,
    /// Metadata is re-announced every this many publish cycles
    pub meta_refresh_cycles: u16,
}

impl Default for VesselInfo {
    fn default() -> Self {
        let mut name = String::new();
        // "tinny" fits MAX_NAME_LEN
        let _ = name.push_str("tinny");
        Self {
            name,
            sample_interval_ms: 1000,
            publish_interval_ms: 1000,
            meta_refresh_cycles: 60,
        }
    }
}

/// `[coolant]`: over-temperature alarm on the engine's coolant sender
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CoolantConfig {
    pub enabled: bool,
    pub analog: AnalogConfig,
    /// Fixed resistor between the reference and the sender
    pub fixed_resistor_ohms: f32,
    /// Target running temperature in Kelvin
    pub setpoint_k: f32,
    /// Kelvin above the setpoint before the alarm trips
    pub margin_k: f32,
    pub alarm: AlarmTuning,
}

impl Default for CoolantConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            analog: AnalogConfig::with_pin(26),
            fixed_resistor_ohms: 330.0,
            setpoint_k: 80.0 + KELVIN_OFFSET,
            margin_k: 10.0,
            alarm: AlarmTuning::with_pin(15),
        }
    }
}

impl CoolantConfig {
    pub fn threshold(&self) -> Threshold {
        Threshold::High {
            setpoint: self.setpoint_k,
            margin: self.margin_k,
        }
    }

    pub fn alarm_config(&self) -> AlarmConfig {
        self.alarm.alarm_config(self.threshold())
    }
}

/// `[battery]`: under-voltage alarm on the house bank
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryConfig {
    pub enabled: bool,
    pub analog: AnalogConfig,
    /// Divider resistor from the battery positive to the ADC pin
    pub divider_top_ohms: f32,
    /// Divider resistor from the ADC pin to ground
    pub divider_bottom_ohms: f32,
    pub nominal_voltage: f32,
    pub minimum_voltage: f32,
    pub maximum_voltage: f32,
    pub alarm: AlarmTuning,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            analog: AnalogConfig::with_pin(27),
            divider_top_ohms: 10_000.0,
            divider_bottom_ohms: 2_200.0,
            nominal_voltage: 12.6,
            minimum_voltage: 12.0,
            maximum_voltage: 14.4,
            alarm: AlarmTuning::with_pin(14),
        }
    }
}

impl BatteryConfig {
    /// Battery record before the first reading
    pub fn battery(&self) -> Battery {
        Battery::new(
            self.nominal_voltage,
            self.minimum_voltage,
            self.maximum_voltage,
            0.0,
        )
    }

    pub fn alarm_config(&self) -> AlarmConfig {
        self.alarm.alarm_config(self.battery().threshold())
    }
}

/// `[bilge]`: high-water float switch
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BilgeConfig {
    pub enabled: bool,
    pub switch_pin: PinConfig,
    pub alarm: AlarmTuning,
}

impl Default for BilgeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            switch_pin: PinConfig::switch_to_ground(16),
            alarm: AlarmTuning::with_pin(12),
        }
    }
}

impl BilgeConfig {
    /// Switch reads 0.0 or 1.0; anything above one half is high water
    pub fn alarm_config(&self) -> AlarmConfig {
        self.alarm.alarm_config(Threshold::High {
            setpoint: 0.5,
            margin: 0.0,
        })
    }
}

/// Complete vessel configuration
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct VesselConfig {
    pub vessel: VesselInfo,
    pub coolant: CoolantConfig,
    pub battery: BatteryConfig,
    pub bilge: BilgeConfig,
}

impl VesselConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every pin claimed by an enabled monitor, with the role using it
    pub fn claimed_pins(&self) -> Vec<(u8, &'static str), MAX_CONFIG_PINS> {
        let mut pins = Vec::new();
        let mut claim = |pin: PinConfig, role: &'static str| {
            // MAX_CONFIG_PINS covers every role below
            let _ = pins.push((pin.pin, role));
        };

        if self.coolant.enabled {
            claim(self.coolant.analog.sensor_pin, "coolant sensor");
            claim(self.coolant.alarm.alarm_pin, "coolant alarm");
            if let Some(pin) = self.coolant.alarm.critical_pin {
                claim(pin, "coolant critical");
            }
        }
        if self.battery.enabled {
            claim(self.battery.analog.sensor_pin, "battery sensor");
            claim(self.battery.alarm.alarm_pin, "battery alarm");
            if let Some(pin) = self.battery.alarm.critical_pin {
                claim(pin, "battery critical");
            }
        }
        if self.bilge.enabled {
            claim(self.bilge.switch_pin, "bilge switch");
            claim(self.bilge.alarm.alarm_pin, "bilge alarm");
            if let Some(pin) = self.bilge.alarm.critical_pin {
                claim(pin, "bilge critical");
            }
        }
        pins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = VesselConfig::default();
        assert_eq!(config.vessel.name.as_str(), "tinny");
        assert_eq!(config.vessel.sample_interval_ms, 1000);
        assert_eq!(config.coolant.analog.reference_voltage, 3.29);
        assert_eq!(config.coolant.fixed_resistor_ohms, 330.0);
        assert_eq!(config.coolant.analog.full_scale_raw, 4095);
        assert_eq!(config.coolant.analog.smoothing.window, 20);
        assert_eq!(config.coolant.alarm.escalation_dwell_ms, 3000);
        assert_eq!(config.battery.minimum_voltage, 12.0);
    }

    #[test]
    fn test_coolant_threshold() {
        let config = CoolantConfig::default();
        match config.threshold() {
            Threshold::High { setpoint, margin } => {
                assert_eq!(setpoint, 80.0 + KELVIN_OFFSET);
                assert_eq!(margin, 10.0);
            }
            Threshold::Low { .. } => panic!("coolant alarm must be a high threshold"),
        }
    }

    #[test]
    fn test_battery_alarm_from_record() {
        let mut config = BatteryConfig::default();
        config.minimum_voltage = 11.6;
        config.alarm.clear_margin = 0.2;
        let alarm = config.alarm_config();
        assert_eq!(alarm.threshold, Threshold::Low { minimum: 11.6 });
        assert_eq!(alarm.clear_margin, 0.2);
    }

    #[test]
    fn test_claimed_pins_skip_disabled_monitors() {
        let mut config = VesselConfig::default();
        assert_eq!(config.claimed_pins().len(), 6);

        config.battery.enabled = false;
        config.coolant.alarm.critical_pin = Some(PinConfig::new(13));
        let pins = config.claimed_pins();
        assert_eq!(pins.len(), 5);
        assert!(pins.iter().any(|&(pin, role)| pin == 13 && role == "coolant critical"));
        assert!(!pins.iter().any(|&(pin, _)| pin == 27));
    }

    #[test]
    fn test_match_converter() {
        let mut analog = AnalogConfig::with_pin(26);
        assert_eq!(analog.match_converter(4095), None);

        analog.full_scale_raw = 1023;
        assert_eq!(analog.match_converter(4095), Some(1023));
        assert_eq!(analog.full_scale_raw, 4095);
    }

    #[test]
    fn test_smoother_selection() {
        let mut smoothing = SmoothingConfig::default();
        assert!(matches!(smoothing.smoother(), Smoother::MovingAverage(_)));
        smoothing.kind = SmoothingKind::Exponential;
        assert!(matches!(smoothing.smoother(), Smoother::Exponential(_)));
    }
}
