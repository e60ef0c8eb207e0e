//! Outboard - Coolant, House Battery and Bilge Monitor Firmware
//!
//! Main firmware binary for RP2040-based boat monitors. Watches the
//! outboard's coolant sender, the house battery bank and the bilge float
//! switch, sounds a local alarm for each and streams readings to the
//! network gateway over UART.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use outboard_core::alarm::AlarmMachine;
use outboard_core::config::{parse_config, AlarmTuning, AnalogConfig, VesselConfig};
use outboard_core::monitor::{Monitor, MonitorKind};
use outboard_core::signal::Identity;
use outboard_core::telemetry::{MonitorMetrics, PathError, TelemetryAdapter};
use outboard_drivers::chain::{battery_chain, coolant_chain};
use outboard_drivers::output::{AlarmBuzzer, CriticalLamp};
use outboard_drivers::sensor::FloatSwitch;
use outboard_hal::AnalogInput;
use outboard_hal_rp2040::{
    AdcBank, AdcChannel, GpioAllocator, GpioInput, GpioOutput, PinBank, PinError,
};

use crate::tasks::monitor::{Buzzer, Lamp};
use crate::tasks::{AnalogMonitor, BilgeMonitor, MonitorSet, TelemetryConfig};

mod channels;
mod tasks;

/// Embedded configuration (compiled into firmware)
/// Edit vessel.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../vessel.toml");

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 32]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Outboard monitor firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    info!(
        "Vessel '{}': sample every {} ms, publish every {} ms",
        config.vessel.name.as_str(),
        config.vessel.sample_interval_ms,
        config.vessel.publish_interval_ms
    );

    let (mut bank, rest) = PinBank::from_peripherals(p);

    // Setup UART for the gateway link (GPIO0 TX, GPIO1 RX)
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 512]);
    let rx_buf = RX_BUF.init([0u8; 32]);

    let uart = Uart::new_blocking(rest.uart0, rest.uart_tx, rest.uart_rx, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, _rx) = uart.split();

    info!("UART initialized for gateway link");

    // ADC sender inputs live on GPIO26-29
    let adc = AdcBank::new(rest.adc, rest.pin26, rest.pin27, rest.pin28, rest.pin29);

    let monitors = build_monitors(&config, &mut bank, adc);
    let adapter = build_adapter(&config, &monitors);

    let telemetry_config = TelemetryConfig {
        vessel: config.vessel.name.clone(),
        publish_interval_ms: config.vessel.publish_interval_ms,
        meta_refresh_cycles: config.vessel.meta_refresh_cycles,
    };

    // Spawn tasks
    spawner
        .spawn(tasks::monitor_task(monitors, config.vessel.sample_interval_ms))
        .unwrap();
    spawner
        .spawn(tasks::telemetry_task(tx, adapter, telemetry_config))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration
///
/// Falls back to the built-in defaults if vessel.toml fails to parse or
/// wires two functions to the same pin.
fn load_config() -> VesselConfig {
    let config = match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            config
        }
        Err(e) => {
            error!("Failed to parse embedded config: {}", e);
            error!("Using built-in defaults");
            return VesselConfig::default();
        }
    };

    match check_pin_conflicts(&config) {
        Ok(()) => config,
        Err(pin) => {
            error!("gpio{} is claimed more than once, using built-in defaults", pin);
            VesselConfig::default()
        }
    }
}

/// Run every claimed pin through the allocator
fn check_pin_conflicts(config: &VesselConfig) -> Result<(), u8> {
    let mut allocator = GpioAllocator::new();
    for (pin, role) in config.claimed_pins() {
        if let Err(e) = allocator.allocate(pin) {
            error!("Cannot claim gpio{} for {}: {}", pin, role, e);
            return Err(pin);
        }
    }
    debug!("{} pins claimed", allocator.allocated_count());
    Ok(())
}

/// Fail if any output pin of a monitor cannot be taken
fn check_outputs(bank: &PinBank, tuning: &AlarmTuning) -> Result<(), PinError> {
    bank.check(tuning.alarm_pin.pin)?;
    match tuning.critical_pin {
        Some(critical) => bank.check(critical.pin),
        None => Ok(()),
    }
}

/// Build the alarm buzzer and optional critical lamp for one monitor
///
/// Every pin is checked before any is taken, so a failure leaves the
/// bank as it was. Duplicate pins never get here, `load_config` rejects
/// them.
fn alarm_outputs(bank: &mut PinBank, tuning: &AlarmTuning) -> Result<(Buzzer, Lamp), PinError> {
    check_outputs(bank, tuning)?;

    let alarm_pin = bank.take(tuning.alarm_pin.pin)?;
    let buzzer = AlarmBuzzer::new(GpioOutput::new(alarm_pin), tuning.alarm_pin.inverted);

    let lamp = match tuning.critical_pin {
        Some(critical) => {
            let pin = bank.take(critical.pin)?;
            Some(CriticalLamp::new(GpioOutput::new(pin), critical.inverted))
        }
        None => None,
    };

    Ok((buzzer, lamp))
}

fn sensor_channel(pin: u8) -> Result<AdcChannel, PinError> {
    AdcChannel::from_gpio(pin).ok_or(PinError::InvalidPin)
}

/// Scale the chain to the converter actually fitted
fn match_converter(
    adc: &mut AdcBank,
    channel: AdcChannel,
    analog: &mut AnalogConfig,
    kind: MonitorKind,
) {
    let full_scale = adc.input(channel).full_scale();
    if let Some(configured) = analog.match_converter(full_scale) {
        warn!(
            "{} full_scale_raw {} does not match the converter, using {}",
            kind, configured, full_scale
        );
    }
}

/// Construct every enabled monitor
///
/// A monitor whose pins cannot be claimed is left disabled.
fn build_monitors(config: &VesselConfig, bank: &mut PinBank, mut adc: AdcBank) -> MonitorSet {
    let coolant = if config.coolant.enabled {
        let mut cfg = config.coolant;
        let built = sensor_channel(cfg.analog.sensor_pin.pin).and_then(|channel| {
            let (buzzer, lamp) = alarm_outputs(bank, &cfg.alarm)?;
            match_converter(&mut adc, channel, &mut cfg.analog, MonitorKind::Coolant);
            let alarm = AlarmMachine::with_escalation(cfg.alarm_config(), buzzer, lamp);
            Ok(AnalogMonitor {
                monitor: Monitor::new(coolant_chain(&cfg), alarm),
                channel,
            })
        });
        match built {
            Ok(monitor) => {
                info!(
                    "Coolant monitor on gpio{} ({})",
                    monitor.channel.gpio(),
                    monitor.channel
                );
                Some(monitor)
            }
            Err(e) => {
                error!("Coolant monitor disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let battery = if config.battery.enabled {
        let mut cfg = config.battery;
        let built = sensor_channel(cfg.analog.sensor_pin.pin).and_then(|channel| {
            let (buzzer, lamp) = alarm_outputs(bank, &cfg.alarm)?;
            match_converter(&mut adc, channel, &mut cfg.analog, MonitorKind::Battery);
            let alarm = AlarmMachine::with_escalation(cfg.alarm_config(), buzzer, lamp);
            Ok(AnalogMonitor {
                monitor: Monitor::new(battery_chain(&cfg), alarm),
                channel,
            })
        });
        match built {
            Ok(monitor) => {
                info!(
                    "Battery monitor on gpio{} ({})",
                    monitor.channel.gpio(),
                    monitor.channel
                );
                Some(monitor)
            }
            Err(e) => {
                error!("Battery monitor disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    let bilge = if config.bilge.enabled {
        let cfg = &config.bilge;
        let built = bank
            .check(cfg.switch_pin.pin)
            .and_then(|()| check_outputs(bank, &cfg.alarm))
            .and_then(|()| bank.take(cfg.switch_pin.pin))
            .and_then(|switch_pin| {
                let input = GpioInput::new(switch_pin, cfg.switch_pin.pull_up);
                let (buzzer, lamp) = alarm_outputs(bank, &cfg.alarm)?;
                let alarm = AlarmMachine::with_escalation(cfg.alarm_config(), buzzer, lamp);
                Ok(BilgeMonitor {
                    monitor: Monitor::new(Identity, alarm),
                    switch: FloatSwitch::new(input, cfg.switch_pin.inverted),
                })
            });
        match built {
            Ok(monitor) => {
                info!("Bilge monitor on gpio{}", cfg.switch_pin.pin);
                Some(monitor)
            }
            Err(e) => {
                error!("Bilge monitor disabled: {}", e);
                None
            }
        }
    } else {
        None
    };

    MonitorSet {
        adc,
        coolant,
        battery,
        house_bank: config.battery.battery(),
        bilge,
    }
}

/// Register the metrics of every running monitor
fn build_adapter(config: &VesselConfig, monitors: &MonitorSet) -> TelemetryAdapter {
    let vessel = config.vessel.name.as_str();
    let mut adapter = TelemetryAdapter::new();

    let mut register = |kind: MonitorKind, metrics: Result<MonitorMetrics, PathError>| {
        match metrics {
            Ok(metrics) => {
                if adapter.register(kind, metrics).is_err() {
                    warn!("No room to publish {}", kind);
                }
            }
            Err(e) => error!("Cannot build metric paths for {}: {}", kind, e),
        }
    };

    if monitors.coolant.is_some() {
        register(
            MonitorKind::Coolant,
            MonitorMetrics::coolant(vessel, config.coolant.alarm.publish_critical),
        );
    }
    if monitors.battery.is_some() {
        register(
            MonitorKind::Battery,
            MonitorMetrics::battery(vessel, config.battery.alarm.publish_critical),
        );
    }
    if monitors.bilge.is_some() {
        register(
            MonitorKind::Bilge,
            MonitorMetrics::bilge(vessel, config.bilge.alarm.publish_critical),
        );
    }

    adapter
}
