// src/behavior/trigger.rs

use std::fmt;
use std::time::Duration;

use crate::engine::Stimulus;
use crate::errors::{MockError, Result};
use crate::types::EventKind;

/// Decides whether a behavior fires for a stimulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// External event of the given kind targeting the owning path.
    Event(EventKind),
    /// Periodic internal tick.
    Clock(Duration),
}

impl Trigger {
    pub fn event(kind: EventKind) -> Self {
        Trigger::Event(kind)
    }

    pub fn clock(period: Duration) -> Self {
        Trigger::Clock(period)
    }

    /// Exact match on kind and path; a trigger never fires for a parent or
    /// child path. Clock triggers only match ticks of their own period.
    pub fn matches(&self, stimulus: &Stimulus, owner: &str) -> bool {
        match (self, stimulus) {
            (Trigger::Event(kind), Stimulus::Event(event)) => {
                event.kind == *kind && event.path == owner
            }
            (Trigger::Clock(period), Stimulus::ClockTick { period: tick }) => period == tick,
            _ => false,
        }
    }

    /// Static checks run once, when the behavior is registered.
    pub fn validate(&self, path: &str) -> Result<()> {
        match self {
            Trigger::Clock(period) if period.is_zero() => Err(MockError::ConfigError(format!(
                "clock trigger on '{path}' needs a non-zero interval"
            ))),
            _ => Ok(()),
        }
    }

    pub fn clock_period(&self) -> Option<Duration> {
        match self {
            Trigger::Clock(period) => Some(*period),
            Trigger::Event(_) => None,
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Event(kind) => write!(f, "event({kind})"),
            Trigger::Clock(period) => write!(f, "clock({period:?})"),
        }
    }
}
