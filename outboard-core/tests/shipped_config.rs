//! The vessel.toml shipped with the firmware parses to the documented defaults

use outboard_core::config::{parse_config, PinConfig, SmoothingKind, VesselConfig};

const SHIPPED: &str = include_str!("../../outboard-firmware/vessel.toml");

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn shipped_config_parses() {
    let config = parse_config(SHIPPED).expect("shipped vessel.toml must parse");
    let defaults = VesselConfig::default();

    assert_eq!(config.vessel, defaults.vessel);
    assert_eq!(config.claimed_pins(), defaults.claimed_pins());
}

#[test]
fn shipped_coolant_section() {
    let coolant = parse_config(SHIPPED).unwrap().coolant;

    assert!(coolant.enabled);
    assert_eq!(coolant.analog.sensor_pin, PinConfig::new(26));
    assert!(close(coolant.analog.reference_voltage, 3.29));
    assert_eq!(coolant.analog.full_scale_raw, 4095);
    assert_eq!(coolant.analog.smoothing.kind, SmoothingKind::MovingAverage);
    assert_eq!(coolant.analog.smoothing.window, 20);
    assert!(close(coolant.fixed_resistor_ohms, 330.0));
    assert!(close(coolant.setpoint_k, 353.15));
    assert!(close(coolant.margin_k, 10.0));
    assert_eq!(coolant.alarm.alarm_pin, PinConfig::new(15));
    assert_eq!(coolant.alarm.escalation_dwell_ms, 3000);
}

#[test]
fn shipped_battery_and_bilge_sections() {
    let config = parse_config(SHIPPED).unwrap();

    let battery = config.battery;
    assert_eq!(battery.analog.sensor_pin, PinConfig::new(27));
    assert!(close(battery.minimum_voltage, 12.0));
    assert!(close(battery.divider_top_ohms, 10_000.0));
    assert!(close(battery.divider_bottom_ohms, 2_200.0));

    let bilge = config.bilge;
    assert_eq!(bilge.switch_pin, PinConfig::switch_to_ground(16));
    assert_eq!(bilge.alarm.alarm_pin, PinConfig::new(12));
}
