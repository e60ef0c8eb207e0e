//! Dotted metric paths
//!
//! Every published value lives at `vessels.<vessel>.<suffix>`, with the
//! vessel name taken from configuration.

use core::fmt::Write;

use heapless::String;

/// Longest full metric path
pub const MAX_PATH_LEN: usize = 80;

pub type MetricPath = String<MAX_PATH_LEN>;

/// Metric path suffixes below `vessels.<vessel>`
pub mod suffix {
    pub const COOLANT_TEMPERATURE: &str = "propulsion.outboard.coolant.temperature";
    pub const COOLANT_ALARM: &str = "propulsion.outboard.coolant.alarm";
    pub const COOLANT_CRITICAL: &str = "propulsion.outboard.coolant.critical";
    pub const BATTERY_VOLTAGE: &str = "electrical.batteries.house.voltage";
    pub const BATTERY_ALARM: &str = "electrical.batteries.house.alarm";
    pub const BATTERY_CRITICAL: &str = "electrical.batteries.house.critical";
    pub const BILGE: &str = "bilge";
    pub const BILGE_ALARM: &str = "bilge.alarm";
    pub const BILGE_CRITICAL: &str = "bilge.critical";
}

/// Unit strings
const UNIT_KELVIN: &str = "K";
const UNIT_VOLT: &str = "V";
const UNIT_BOOLEAN: &str = "Boolean";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PathError {
    /// Vessel name is empty or contains a dot
    InvalidVessel,
    /// Path does not fit `MAX_PATH_LEN`
    TooLong,
}

/// Build `vessels.<vessel>.<suffix>`
pub fn metric_path(vessel: &str, suffix: &str) -> Result<MetricPath, PathError> {
    if vessel.is_empty() || vessel.contains('.') {
        return Err(PathError::InvalidVessel);
    }
    let mut path = MetricPath::new();
    write!(path, "vessels.{}.{}", vessel, suffix).map_err(|_| PathError::TooLong)?;
    Ok(path)
}

/// One published quantity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub path: MetricPath,
    pub unit: &'static str,
    pub description: &'static str,
}

impl Metric {
    pub fn new(
        vessel: &str,
        suffix: &str,
        unit: &'static str,
        description: &'static str,
    ) -> Result<Self, PathError> {
        Ok(Self {
            path: metric_path(vessel, suffix)?,
            unit,
            description,
        })
    }
}

/// Metrics published for one monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorMetrics {
    /// Conditioned reading
    pub value: Metric,
    /// Alarm level as 0/1
    pub alarm: Metric,
    /// Escalation flag as 0/1, when published
    pub critical: Option<Metric>,
}

impl MonitorMetrics {
    pub fn coolant(vessel: &str, publish_critical: bool) -> Result<Self, PathError> {
        Ok(Self {
            value: Metric::new(
                vessel,
                suffix::COOLANT_TEMPERATURE,
                UNIT_KELVIN,
                "The current coolant temperature",
            )?,
            alarm: Metric::new(
                vessel,
                suffix::COOLANT_ALARM,
                UNIT_BOOLEAN,
                "The state of the over temp alarm.",
            )?,
            critical: critical(
                vessel,
                publish_critical,
                suffix::COOLANT_CRITICAL,
                "Over temp alarm has been active past its dwell.",
            )?,
        })
    }

    pub fn battery(vessel: &str, publish_critical: bool) -> Result<Self, PathError> {
        Ok(Self {
            value: Metric::new(
                vessel,
                suffix::BATTERY_VOLTAGE,
                UNIT_VOLT,
                "House battery bank voltage",
            )?,
            alarm: Metric::new(
                vessel,
                suffix::BATTERY_ALARM,
                UNIT_BOOLEAN,
                "The state of the low battery alarm.",
            )?,
            critical: critical(
                vessel,
                publish_critical,
                suffix::BATTERY_CRITICAL,
                "Low battery alarm has been active past its dwell.",
            )?,
        })
    }

    pub fn bilge(vessel: &str, publish_critical: bool) -> Result<Self, PathError> {
        Ok(Self {
            value: Metric::new(
                vessel,
                suffix::BILGE,
                UNIT_BOOLEAN,
                "High water float switch",
            )?,
            alarm: Metric::new(
                vessel,
                suffix::BILGE_ALARM,
                UNIT_BOOLEAN,
                "The state of the high water alarm.",
            )?,
            critical: critical(
                vessel,
                publish_critical,
                suffix::BILGE_CRITICAL,
                "High water alarm has been active past its dwell.",
            )?,
        })
    }

    /// Every metric this monitor publishes
    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        [Some(&self.value), Some(&self.alarm), self.critical.as_ref()]
            .into_iter()
            .flatten()
    }
}

fn critical(
    vessel: &str,
    enabled: bool,
    suffix: &str,
    description: &'static str,
) -> Result<Option<Metric>, PathError> {
    if !enabled {
        return Ok(None);
    }
    Metric::new(vessel, suffix, UNIT_BOOLEAN, description).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_path() {
        let path = metric_path("tinny", suffix::COOLANT_ALARM).unwrap();
        assert_eq!(
            path.as_str(),
            "vessels.tinny.propulsion.outboard.coolant.alarm"
        );
        let path = metric_path("renko", suffix::BILGE).unwrap();
        assert_eq!(path.as_str(), "vessels.renko.bilge");
    }

    #[test]
    fn test_invalid_vessel() {
        assert_eq!(metric_path("", suffix::BILGE), Err(PathError::InvalidVessel));
        assert_eq!(
            metric_path("a.b", suffix::BILGE),
            Err(PathError::InvalidVessel)
        );
    }

    #[test]
    fn test_path_too_long() {
        let vessel = "an-extremely-long-vessel-name-that-cannot-fit-anywhere";
        assert_eq!(
            metric_path(vessel, suffix::COOLANT_TEMPERATURE),
            Err(PathError::TooLong)
        );
    }

    #[test]
    fn test_coolant_metrics() {
        let metrics = MonitorMetrics::coolant("tinny", false).unwrap();
        assert_eq!(metrics.value.unit, "K");
        assert_eq!(metrics.alarm.unit, "Boolean");
        assert!(metrics.critical.is_none());
        assert_eq!(metrics.iter().count(), 2);

        let metrics = MonitorMetrics::coolant("tinny", true).unwrap();
        assert_eq!(
            metrics.critical.unwrap().path.as_str(),
            "vessels.tinny.propulsion.outboard.coolant.critical"
        );
    }

    #[test]
    fn test_battery_metrics() {
        let metrics = MonitorMetrics::battery("tinny", false).unwrap();
        assert_eq!(
            metrics.value.path.as_str(),
            "vessels.tinny.electrical.batteries.house.voltage"
        );
        assert_eq!(metrics.value.unit, "V");
    }
}
