// src/behavior/registry.rs

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use tracing::debug;

use crate::behavior::Behavior;
use crate::engine::Stimulus;
use crate::errors::Result;

/// Behaviors indexed by owning path, plus an index of clock bindings.
///
/// Filled once while the engine is built; read-only afterwards.
#[derive(Debug, Default)]
pub struct BehaviorRegistry {
    by_path: HashMap<String, Vec<Behavior>>,
    /// Clock period -> (path, index into `by_path[path]`).
    clocks: BTreeMap<Duration, Vec<(String, usize)>>,
}

impl BehaviorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a behavior to its path's list.
    pub fn register(&mut self, behavior: Behavior) -> Result<()> {
        behavior.trigger.validate(&behavior.path)?;
        behavior.action.validate(&behavior.path)?;

        let list = self.by_path.entry(behavior.path.clone()).or_default();
        if let Some(period) = behavior.trigger.clock_period() {
            self.clocks
                .entry(period)
                .or_default()
                .push((behavior.path.clone(), list.len()));
        }

        debug!(
            path = %behavior.path,
            trigger = %behavior.trigger,
            action = %behavior.action,
            "registered behavior"
        );
        list.push(behavior);
        Ok(())
    }

    /// Behaviors owned by `path`, in registration order.
    pub fn behaviors_for(&self, path: &str) -> &[Behavior] {
        self.by_path.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Behaviors whose trigger matches `stimulus`, in registration order.
    pub fn dispatch(&self, stimulus: &Stimulus) -> Vec<&Behavior> {
        match stimulus {
            Stimulus::Event(event) => self
                .behaviors_for(&event.path)
                .iter()
                .filter(|b| b.trigger.matches(stimulus, &b.path))
                .collect(),
            Stimulus::ClockTick { period } => self.clock_behaviors(*period),
        }
    }

    /// Distinct clock periods, shortest first.
    pub fn clock_periods(&self) -> Vec<Duration> {
        self.clocks.keys().copied().collect()
    }

    pub fn clock_behaviors(&self, period: Duration) -> Vec<&Behavior> {
        self.clocks
            .get(&period)
            .into_iter()
            .flatten()
            .filter_map(|(path, idx)| self.by_path.get(path)?.get(*idx))
            .collect()
    }

    /// Total number of registered behaviors.
    pub fn len(&self) -> usize {
        self.by_path.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
