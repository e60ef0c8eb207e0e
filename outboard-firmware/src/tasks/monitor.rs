//! Monitor task
//!
//! Samples every enabled monitor once per tick, in a fixed order:
//! coolant, battery, bilge. The task owns the ADC, the switch input, the
//! signal chains and the alarm machines; only snapshots leave it.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use outboard_core::alarm::Evaluation;
use outboard_core::battery::Battery;
use outboard_core::monitor::{Monitor, MonitorKind};
use outboard_core::signal::Identity;
use outboard_core::traits::SensorError;
use outboard_core::TimestampMs;
use outboard_drivers::chain::{BatteryChain, CoolantChain};
use outboard_drivers::output::{AlarmBuzzer, CriticalLamp};
use outboard_drivers::sensor::FloatSwitch;
use outboard_hal::AnalogInput;
use outboard_hal_rp2040::{AdcBank, AdcChannel, GpioInput, GpioOutput};

use crate::channels::store_snapshot;

pub type Buzzer = AlarmBuzzer<GpioOutput>;
pub type Lamp = Option<CriticalLamp<GpioOutput>>;

/// Analog monitor bound to its ADC channel
pub struct AnalogMonitor<C> {
    pub monitor: Monitor<C, Buzzer, Lamp>,
    pub channel: AdcChannel,
}

pub struct BilgeMonitor {
    pub monitor: Monitor<Identity, Buzzer, Lamp>,
    pub switch: FloatSwitch<GpioInput>,
}

/// Everything the monitor task owns
pub struct MonitorSet {
    pub adc: AdcBank,
    pub coolant: Option<AnalogMonitor<CoolantChain>>,
    pub battery: Option<AnalogMonitor<BatteryChain>>,
    pub house_bank: Battery,
    pub bilge: Option<BilgeMonitor>,
}

fn read_raw(adc: &mut AdcBank, channel: AdcChannel) -> Result<f32, SensorError> {
    adc.input(channel)
        .read()
        .map(f32::from)
        .map_err(|_| SensorError::ConversionError)
}

/// Log the interesting outcomes of one evaluation
fn report(kind: MonitorKind, was_escalated: bool, result: Result<Evaluation, SensorError>) {
    match result {
        Ok(eval) => {
            if eval.transitioned {
                info!("{}: alarm now {}", kind, eval.level);
            }
            if eval.escalated && !was_escalated {
                warn!("{}: alarm escalated", kind);
            }
        }
        Err(e) => warn!("{}: reading skipped: {}", kind, e),
    }
}

impl MonitorSet {
    fn sample(&mut self, now_ms: TimestampMs) {
        if let Some(coolant) = &mut self.coolant {
            let was_escalated = coolant.monitor.snapshot().escalated;
            let raw = read_raw(&mut self.adc, coolant.channel);
            let result = coolant.monitor.tick(raw, now_ms);
            report(MonitorKind::Coolant, was_escalated, result);
            if let Some(kelvin) = coolant.monitor.last_value() {
                trace!("coolant: {} K", kelvin);
            }
            store_snapshot(MonitorKind::Coolant, coolant.monitor.snapshot());
        }

        if let Some(battery) = &mut self.battery {
            let was_escalated = battery.monitor.snapshot().escalated;
            let raw = read_raw(&mut self.adc, battery.channel);
            let result = battery.monitor.tick(raw, now_ms);
            if result.is_ok() {
                if let Some(volts) = battery.monitor.last_value() {
                    self.house_bank.set_current_voltage(volts);
                    if let Some(charge) = self.house_bank.charge_fraction() {
                        trace!("battery: {} V ({} of span)", volts, charge);
                    }
                }
            }
            report(MonitorKind::Battery, was_escalated, result);
            store_snapshot(MonitorKind::Battery, battery.monitor.snapshot());
        }

        if let Some(bilge) = &mut self.bilge {
            let was_escalated = bilge.monitor.snapshot().escalated;
            let result = bilge.monitor.tick(Ok(bilge.switch.sample()), now_ms);
            report(MonitorKind::Bilge, was_escalated, result);
            store_snapshot(MonitorKind::Bilge, bilge.monitor.snapshot());
        }
    }
}

/// Monitor task - runs every monitor at the sample interval
#[embassy_executor::task]
pub async fn monitor_task(mut monitors: MonitorSet, sample_interval_ms: u32) {
    info!(
        "Monitor task started (coolant={}, battery={}, bilge={})",
        monitors.coolant.is_some(),
        monitors.battery.is_some(),
        monitors.bilge.is_some()
    );

    let mut ticker = Ticker::every(Duration::from_millis(sample_interval_ms as u64));

    loop {
        ticker.next().await;

        // Wraps after ~49 days; alarm timing uses wrapping arithmetic
        let now_ms = Instant::now().as_millis() as TimestampMs;
        monitors.sample(now_ms);
    }
}
