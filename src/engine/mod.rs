// src/engine/mod.rs

//! Orchestration engine for vssmock.
//!
//! This module ties together:
//! - the datapoint store (current values + notifications)
//! - the behavior registry (what to do for which stimulus)
//! - the animation scheduler (timed writes)
//! - the runtime loop that reacts to:
//!   - external actuation events
//!   - clock ticks
//!   - shutdown signals
//!
//! The synchronous dispatch logic lives in [`core`]; clock tickers in
//! [`clock`]; the async event loop in [`runtime`].

use std::time::Duration;

use crate::datapoint::Value;
pub use crate::types::{EventKind, RepeatMode};

/// Canonical datapoint path type used throughout the engine.
pub type PathName = String;

/// External event delivered by the broker.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuationEvent {
    pub path: PathName,
    pub kind: EventKind,
    pub value: Value,
}

impl ActuationEvent {
    pub fn actuator_target(path: impl Into<PathName>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            kind: EventKind::ActuatorTarget,
            value: value.into(),
        }
    }

    pub fn current_value(path: impl Into<PathName>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            kind: EventKind::CurrentValue,
            value: value.into(),
        }
    }
}

/// Something that may fire behaviors.
#[derive(Debug, Clone, PartialEq)]
pub enum Stimulus {
    /// An external event for a single path.
    Event(ActuationEvent),
    /// A periodic tick for every clock behavior with this period.
    ClockTick { period: Duration },
}

impl From<ActuationEvent> for Stimulus {
    fn from(event: ActuationEvent) -> Self {
        Stimulus::Event(event)
    }
}

/// Events flowing into the runtime from transports.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    Stimulus(Stimulus),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

/// Engine-wide knobs, usually taken from the `[engine]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Lower bound for the animation tick interval.
    pub min_tick: Duration,
    /// Size of the notification broadcast buffer.
    pub notification_capacity: usize,
}

pub const DEFAULT_MIN_TICK: Duration = Duration::from_millis(50);
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 256;

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            min_tick: DEFAULT_MIN_TICK,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
        }
    }
}

pub mod clock;
pub mod core;
pub mod runtime;

pub use clock::spawn_clocks;
pub use core::{DispatchReport, Engine, EngineBuilder};
pub use runtime::Runtime;
