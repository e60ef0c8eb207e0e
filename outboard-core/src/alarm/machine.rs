//! Two-state alarm machine
//!
//! ```text
//!            value violates threshold
//!   Normal ----------------------------> Alarm
//!     ^                                    |
//!     +------------------------------------+
//!            value clears threshold
//! ```
//!
//! Each transition records its timestamp and drives the alarm output once.
//! Staying in a state never touches the output.

use super::escalation::{should_escalate, EscalationAction, NoEscalation};
use super::threshold::Threshold;
use super::DEFAULT_ESCALATION_DWELL_MS;
use crate::traits::AlarmOutput;
use crate::TimestampMs;

/// Binary alarm level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlarmLevel {
    #[default]
    Normal,
    Alarm,
}

impl AlarmLevel {
    pub fn is_active(self) -> bool {
        self == AlarmLevel::Alarm
    }
}

/// Current level and when it was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmState {
    pub level: AlarmLevel,
    pub last_transition_ms: TimestampMs,
}

/// Alarm machine parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlarmConfig {
    pub threshold: Threshold,
    /// Extra distance past the trip point required to clear (0 = symmetric)
    pub clear_margin: f32,
    /// Minimum time a level is held before it may change (0 = immediate)
    pub min_dwell_ms: u32,
    /// Time an alarm must stay active before escalating
    pub escalation_dwell_ms: u32,
}

impl AlarmConfig {
    /// Symmetric comparator with the default escalation dwell
    pub const fn new(threshold: Threshold) -> Self {
        Self {
            threshold,
            clear_margin: 0.0,
            min_dwell_ms: 0,
            escalation_dwell_ms: DEFAULT_ESCALATION_DWELL_MS,
        }
    }
}

/// Outcome of one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Evaluation {
    pub level: AlarmLevel,
    pub transitioned: bool,
    pub escalated: bool,
}

/// Alarm state machine for one monitored quantity
pub struct AlarmMachine<O, E = NoEscalation> {
    config: AlarmConfig,
    state: AlarmState,
    escalated: bool,
    output: O,
    escalation: E,
}

impl<O: AlarmOutput> AlarmMachine<O, NoEscalation> {
    /// Machine without an escalation action
    pub fn new(config: AlarmConfig, output: O) -> Self {
        Self::with_escalation(config, output, NoEscalation)
    }
}

impl<O: AlarmOutput, E: EscalationAction> AlarmMachine<O, E> {
    /// Machine starting in `Normal` at tick 0
    ///
    /// The output is assumed to start released and is not written.
    pub fn with_escalation(config: AlarmConfig, output: O, escalation: E) -> Self {
        Self {
            config,
            state: AlarmState::default(),
            escalated: false,
            output,
            escalation,
        }
    }

    /// Evaluate one conditioned value
    pub fn evaluate(&mut self, value: f32, now_ms: TimestampMs) -> Evaluation {
        let target = self.next_level(value);

        let mut transitioned = false;
        if target != self.state.level && self.dwell_satisfied(now_ms) {
            self.transition(target, now_ms);
            transitioned = true;
        }

        if !self.escalated
            && should_escalate(
                self.state.level.is_active(),
                self.state.last_transition_ms,
                now_ms,
                self.config.escalation_dwell_ms,
            )
        {
            self.escalated = true;
            self.escalation.escalate();
        }

        Evaluation {
            level: self.state.level,
            transitioned,
            escalated: self.escalated,
        }
    }

    fn next_level(&self, value: f32) -> AlarmLevel {
        let threshold = &self.config.threshold;
        match self.state.level {
            AlarmLevel::Normal if threshold.is_violated(value) => AlarmLevel::Alarm,
            AlarmLevel::Alarm if threshold.is_cleared(value, self.config.clear_margin) => {
                AlarmLevel::Normal
            }
            level => level,
        }
    }

    fn dwell_satisfied(&self, now_ms: TimestampMs) -> bool {
        self.config.min_dwell_ms == 0
            || now_ms.wrapping_sub(self.state.last_transition_ms) >= self.config.min_dwell_ms
    }

    fn transition(&mut self, level: AlarmLevel, now_ms: TimestampMs) {
        self.state = AlarmState {
            level,
            last_transition_ms: now_ms,
        };
        self.output.set_alarm(level.is_active());

        if level == AlarmLevel::Normal && self.escalated {
            self.escalated = false;
            self.escalation.clear();
        }
    }

    pub fn state(&self) -> AlarmState {
        self.state
    }

    pub fn level(&self) -> AlarmLevel {
        self.state.level
    }

    pub fn is_escalated(&self) -> bool {
        self.escalated
    }

    pub fn config(&self) -> &AlarmConfig {
        &self.config
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn escalation(&self) -> &E {
        &self.escalation
    }
}
