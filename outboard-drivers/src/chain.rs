//! Signal chain builders
//!
//! Assemble the fixed stage order for each analog monitor from its
//! configuration section.

use outboard_core::config::{BatteryConfig, CoolantConfig};
use outboard_core::signal::{
    AdcToVoltage, Chain, DividerResistance, LinearCalibration, RailGuard, Smoother, Stage,
};

use crate::sensor::{BatteryDivider, CoolantSender};

/// raw -> volts -> rail guard -> smoothed -> ohms -> kelvin -> calibrated
pub type CoolantChain = Chain<
    Chain<
        Chain<Chain<Chain<AdcToVoltage, RailGuard>, Smoother>, DividerResistance>,
        CoolantSender,
    >,
    LinearCalibration,
>;

/// raw -> volts -> smoothed -> battery volts -> calibrated
pub type BatteryChain =
    Chain<Chain<Chain<AdcToVoltage, Smoother>, BatteryDivider>, LinearCalibration>;

pub fn coolant_chain(config: &CoolantConfig) -> CoolantChain {
    let analog = &config.analog;
    AdcToVoltage::new(analog.full_scale_raw, analog.reference_voltage)
        .then(RailGuard::new(analog.reference_voltage))
        .then(analog.smoothing.smoother())
        .then(DividerResistance::new(
            analog.reference_voltage,
            config.fixed_resistor_ohms,
        ))
        .then(CoolantSender)
        .then(analog.calibration())
}

pub fn battery_chain(config: &BatteryConfig) -> BatteryChain {
    let analog = &config.analog;
    AdcToVoltage::new(analog.full_scale_raw, analog.reference_voltage)
        .then(analog.smoothing.smoother())
        .then(BatteryDivider::new(
            config.divider_top_ohms,
            config.divider_bottom_ohms,
        ))
        .then(analog.calibration())
}

#[cfg(test)]
mod tests {
    use super::*;
    use outboard_core::alarm::{AlarmLevel, AlarmMachine};
    use outboard_core::monitor::Monitor;
    use outboard_core::traits::{AlarmOutput, SensorError};

    struct Flag(bool);

    impl AlarmOutput for Flag {
        fn set_alarm(&mut self, active: bool) {
            self.0 = active;
        }
    }

    /// Coolant monitor latched in `Alarm` by a 110 °C sender
    fn overheated_monitor() -> Monitor<CoolantChain, Flag> {
        let config = CoolantConfig::default();
        let alarm = AlarmMachine::new(config.alarm_config(), Flag(false));
        let mut monitor = Monitor::new(coolant_chain(&config), alarm);
        for tick in 0..25 {
            monitor.tick(Ok(raw_for_ohms(29.1)), tick * 1000).unwrap();
        }
        assert_eq!(monitor.alarm_state().level, AlarmLevel::Alarm);
        monitor
    }

    fn close(a: f32, b: f32, eps: f32) -> bool {
        let d = a - b;
        d < eps && d > -eps
    }

    /// Raw count the ADC would report for a sender resistance
    fn raw_for_ohms(ohms: f32) -> f32 {
        let volts = 3.29 * ohms / (330.0 + ohms);
        let raw = volts / 3.29 * 4095.0;
        // round half up without std
        (raw + 0.5) as u16 as f32
    }

    #[test]
    fn test_coolant_chain_at_running_temperature() {
        let mut chain = coolant_chain(&CoolantConfig::default());
        let k = chain.process(raw_for_ohms(69.9)).unwrap();
        assert!(close(k, 353.15, 0.5));
    }

    #[test]
    fn test_coolant_chain_open_sender() {
        let mut chain = coolant_chain(&CoolantConfig::default());
        assert_eq!(chain.process(4095.0), Err(SensorError::OpenCircuit));
    }

    #[test]
    fn test_open_sender_keeps_overheat_alarm() {
        let mut monitor = overheated_monitor();
        let hot = monitor.last_value();

        for tick in 25..60 {
            assert_eq!(
                monitor.tick(Ok(4095.0), tick * 1000),
                Err(SensorError::OpenCircuit)
            );
            assert_eq!(monitor.alarm_state().level, AlarmLevel::Alarm);
        }
        assert!(monitor.alarm().output().0);
        assert_eq!(monitor.last_value(), hot);
    }

    #[test]
    fn test_shorted_sender_keeps_overheat_alarm() {
        let mut monitor = overheated_monitor();

        for tick in 25..60 {
            assert_eq!(
                monitor.tick(Ok(0.0), tick * 1000),
                Err(SensorError::ShortCircuit)
            );
            assert_eq!(monitor.alarm_state().level, AlarmLevel::Alarm);
        }
    }

    #[test]
    fn test_coolant_chain_calibration_applied() {
        let mut config = CoolantConfig::default();
        config.analog.offset = -2.0;
        let mut chain = coolant_chain(&config);
        let k = chain.process(raw_for_ohms(69.9)).unwrap();
        assert!(close(k, 351.15, 0.5));
    }

    #[test]
    fn test_coolant_chain_smooths_before_inversion() {
        let mut chain = coolant_chain(&CoolantConfig::default());
        chain.process(raw_for_ohms(96.8)).unwrap();
        let k = chain.process(raw_for_ohms(51.3)).unwrap();
        // Averaged volts land between 70 °C and 90 °C
        assert!(k > 343.15 && k < 363.15);
    }

    #[test]
    fn test_battery_chain() {
        let config = BatteryConfig::default();
        let mut chain = battery_chain(&config);
        // 12.2 V through 10k/2k2 is 2.2 V at the pin
        let raw = 2.2 / 3.29 * 4095.0;
        let volts = chain.process(raw).unwrap();
        assert!(close(volts, 12.2, 0.02));
    }

    #[test]
    fn test_battery_chain_reset_clears_smoothing() {
        let mut chain = battery_chain(&BatteryConfig::default());
        chain.process(1000.0).unwrap();
        chain.reset();
        let first = chain.process(2000.0).unwrap();
        let again = battery_chain(&BatteryConfig::default()).process(2000.0).unwrap();
        assert_eq!(first, again);
    }
}
