//! Minimal TOML parser for the vessel configuration
//!
//! Handles only the subset `vessel.toml` uses. It does NOT support the
//! full TOML grammar.
//!
//! Supported:
//! - Key = value pairs (string, integer, float, boolean)
//! - `[vessel]`, `[coolant]`, `[battery]` and `[bilge]` section headers
//! - Comments (`# ...`), including trailing comments
//!
//! Unknown keys are ignored; unknown sections are an error.

use heapless::String as HString;

use super::types::{
    AlarmTuning, AnalogConfig, PinConfig, SmoothingKind, VesselConfig, ANALOG_PINS,
    DIGITAL_PINS, MAX_NAME_LEN,
};
use crate::signal::MAX_WINDOW;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Invalid section header
    InvalidSection,
    /// Invalid value type
    InvalidValue,
    /// Invalid pin string
    InvalidPin,
    /// Value parses but makes no physical sense
    OutOfRange,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Vessel,
    Coolant,
    Battery,
    Bilge,
}

/// Parse TOML configuration into a [`VesselConfig`]
///
/// Starts from the defaults and overrides whatever the file names. The
/// result is checked with [`validate`] before it is returned.
pub fn parse_config(input: &str) -> Result<VesselConfig, ParseError> {
    let mut config = VesselConfig::new();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(strip_comment(line))?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    validate(&config)?;
    Ok(config)
}

/// Reject configurations that would divide by zero, never tick or put a
/// role on a pin that cannot serve it
pub fn validate(config: &VesselConfig) -> Result<(), ParseError> {
    if config.vessel.name.is_empty() || config.vessel.name.contains('.') {
        return Err(ParseError::InvalidValue);
    }
    if config.vessel.sample_interval_ms == 0 || config.vessel.publish_interval_ms == 0 {
        return Err(ParseError::OutOfRange);
    }
    for analog in [&config.coolant.analog, &config.battery.analog] {
        if analog.reference_voltage <= 0.0 || analog.full_scale_raw == 0 {
            return Err(ParseError::OutOfRange);
        }
        if analog.smoothing.window == 0 || usize::from(analog.smoothing.window) > MAX_WINDOW {
            return Err(ParseError::OutOfRange);
        }
    }
    if config.coolant.fixed_resistor_ohms <= 0.0 {
        return Err(ParseError::OutOfRange);
    }
    if config.battery.divider_bottom_ohms <= 0.0 || config.battery.divider_top_ohms < 0.0 {
        return Err(ParseError::OutOfRange);
    }
    validate_pins(config)
}

/// Pin ranges of every enabled monitor
fn validate_pins(config: &VesselConfig) -> Result<(), ParseError> {
    let analog = [
        (config.coolant.enabled, &config.coolant.analog, &config.coolant.alarm),
        (config.battery.enabled, &config.battery.analog, &config.battery.alarm),
    ];
    for (_, analog, alarm) in analog.into_iter().filter(|(enabled, _, _)| *enabled) {
        if !ANALOG_PINS.contains(&analog.sensor_pin.pin) {
            return Err(ParseError::InvalidPin);
        }
        validate_outputs(alarm)?;
    }

    if config.bilge.enabled {
        digital_pin(config.bilge.switch_pin)?;
        validate_outputs(&config.bilge.alarm)?;
    }
    Ok(())
}

fn validate_outputs(alarm: &AlarmTuning) -> Result<(), ParseError> {
    digital_pin(alarm.alarm_pin)?;
    match alarm.critical_pin {
        Some(pin) => digital_pin(pin),
        None => Ok(()),
    }
}

fn digital_pin(pin: PinConfig) -> Result<(), ParseError> {
    if DIGITAL_PINS.contains(&pin.pin) {
        Ok(())
    } else {
        Err(ParseError::InvalidPin)
    }
}

fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let header = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?;

    match header.trim() {
        "vessel" => Ok(Section::Vessel),
        "coolant" => Ok(Section::Coolant),
        "battery" => Ok(Section::Battery),
        "bilge" => Ok(Section::Bilge),
        _ => Err(ParseError::InvalidSection),
    }
}

/// Drop a trailing comment that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return value[..i].trim(),
            _ => {}
        }
    }
    value.trim()
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(&line[eq_pos + 1..]);

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

fn parse_float(value: &str) -> Result<f32, ParseError> {
    let v: f32 = value.parse().map_err(|_| ParseError::InvalidValue)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseError::InvalidValue)
    }
}

fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Parse a pin string like "gpio15", "!gpio12", "^gpio16", "!^gpio16"
pub fn parse_pin(value: &str) -> Result<PinConfig, ParseError> {
    let mut s = parse_string(value);
    let mut inverted = false;
    let mut pull_up = false;

    loop {
        if let Some(rest) = s.strip_prefix('!') {
            inverted = true;
            s = rest;
        } else if let Some(rest) = s.strip_prefix('^') {
            pull_up = true;
            s = rest;
        } else {
            break;
        }
    }

    let digits = s.strip_prefix("gpio").ok_or(ParseError::InvalidPin)?;
    let pin: u8 = digits.parse().map_err(|_| ParseError::InvalidPin)?;
    if pin >= 30 {
        return Err(ParseError::InvalidPin);
    }

    Ok(PinConfig {
        pin,
        inverted,
        pull_up,
    })
}

fn parse_smoothing(value: &str) -> Result<SmoothingKind, ParseError> {
    match parse_string(value) {
        "moving_average" => Ok(SmoothingKind::MovingAverage),
        "exponential" => Ok(SmoothingKind::Exponential),
        _ => Err(ParseError::InvalidValue),
    }
}

/// Keys shared by the analog sections
fn apply_analog(key: &str, value: &str, analog: &mut AnalogConfig) -> Result<bool, ParseError> {
    match key {
        "sensor_pin" => analog.sensor_pin = parse_pin(value)?,
        "reference_voltage" => analog.reference_voltage = parse_float(value)?,
        "full_scale_raw" => analog.full_scale_raw = parse_int(value)?,
        "smoothing" => analog.smoothing.kind = parse_smoothing(value)?,
        "window" => analog.smoothing.window = parse_int(value)?,
        "alpha" => analog.smoothing.alpha = parse_float(value)?,
        "gain" => analog.gain = parse_float(value)?,
        "offset" => analog.offset = parse_float(value)?,
        _ => return Ok(false),
    }
    Ok(true)
}

/// Keys shared by every monitor section
fn apply_alarm(key: &str, value: &str, alarm: &mut AlarmTuning) -> Result<bool, ParseError> {
    match key {
        "alarm_pin" => alarm.alarm_pin = parse_pin(value)?,
        "critical_pin" => alarm.critical_pin = Some(parse_pin(value)?),
        "publish_critical" => alarm.publish_critical = parse_bool(value)?,
        "clear_margin" => alarm.clear_margin = parse_float(value)?,
        "min_dwell_ms" => alarm.min_dwell_ms = parse_int(value)?,
        "escalation_dwell_ms" => alarm.escalation_dwell_ms = parse_int(value)?,
        _ => return Ok(false),
    }
    Ok(true)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut VesselConfig,
) -> Result<(), ParseError> {
    match section {
        Section::Vessel => match key {
            "name" => {
                config.vessel.name = HString::<MAX_NAME_LEN>::try_from(parse_string(value))
                    .map_err(|_| ParseError::InvalidValue)?;
            }
            "sample_interval_ms" => config.vessel.sample_interval_ms = parse_int(value)?,
            "publish_interval_ms" => config.vessel.publish_interval_ms = parse_int(value)?,
            "meta_refresh_cycles" => config.vessel.meta_refresh_cycles = parse_int(value)?,
            _ => {}
        },
        Section::Coolant => {
            let c = &mut config.coolant;
            if apply_analog(key, value, &mut c.analog)? || apply_alarm(key, value, &mut c.alarm)? {
                return Ok(());
            }
            match key {
                "enabled" => c.enabled = parse_bool(value)?,
                "fixed_resistor_ohms" => c.fixed_resistor_ohms = parse_float(value)?,
                "setpoint_k" => c.setpoint_k = parse_float(value)?,
                "margin_k" => c.margin_k = parse_float(value)?,
                _ => {}
            }
        }
        Section::Battery => {
            let b = &mut config.battery;
            if apply_analog(key, value, &mut b.analog)? || apply_alarm(key, value, &mut b.alarm)? {
                return Ok(());
            }
            match key {
                "enabled" => b.enabled = parse_bool(value)?,
                "divider_top_ohms" => b.divider_top_ohms = parse_float(value)?,
                "divider_bottom_ohms" => b.divider_bottom_ohms = parse_float(value)?,
                "nominal_voltage" => b.nominal_voltage = parse_float(value)?,
                "minimum_voltage" => b.minimum_voltage = parse_float(value)?,
                "maximum_voltage" => b.maximum_voltage = parse_float(value)?,
                _ => {}
            }
        }
        Section::Bilge => {
            let b = &mut config.bilge;
            if apply_alarm(key, value, &mut b.alarm)? {
                return Ok(());
            }
            match key {
                "enabled" => b.enabled = parse_bool(value)?,
                "switch_pin" => b.switch_pin = parse_pin(value)?,
                _ => {}
            }
        }
        Section::Root => {}
    }

    Ok(())
}
