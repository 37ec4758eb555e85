// src/engine/core.rs

//! Engine construction and synchronous stimulus dispatch.
//!
//! Dispatch never blocks: a set action writes the store directly, an
//! animation action only installs a task in the [`AnimationScheduler`].
//! Animation tasks are spawned onto the current Tokio runtime, so
//! [`Engine::ingest`] must be called from within one.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::animation::AnimationScheduler;
use crate::behavior::{Action, Behavior, BehaviorRegistry, BehaviorSpec, EvalContext};
use crate::config::ConfigFile;
use crate::datapoint::{is_well_formed_path, DatapointStore, Fault, Notification, Value};
use crate::engine::{ActuationEvent, EngineOptions, Stimulus};
use crate::errors::{MockError, Result};

/// Outcome of dispatching one stimulus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Behaviors whose trigger matched.
    pub matched: usize,
    /// Matched behaviors whose action ran successfully.
    pub fired: usize,
    /// Matched behaviors whose action failed (reported as faults).
    pub failed: usize,
}

/// Registration API consumed once at startup.
///
/// Datapoint-level problems (malformed or duplicate path) are returned as
/// errors. A behavior that fails validation, or whose literal operands don't
/// fit the datapoint's kind, is skipped and remembered in
/// [`rejected`](Self::rejected); the rest of the datapoint is still
/// registered.
pub struct EngineBuilder {
    store: DatapointStore,
    registry: BehaviorRegistry,
    options: EngineOptions,
    rejected: Vec<MockError>,
}

impl EngineBuilder {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            store: DatapointStore::new(options.notification_capacity),
            registry: BehaviorRegistry::new(),
            options,
            rejected: Vec::new(),
        }
    }

    /// Register every datapoint of a validated [`ConfigFile`], in file order.
    pub fn from_config(cfg: &ConfigFile) -> Result<Self> {
        let mut builder = Self::new(cfg.engine.options()?);

        for record in cfg.datapoint.iter() {
            let initial = record.initial()?;
            let behaviors = record.behavior_specs()?;
            for path in record.target_paths() {
                builder.mock_datapoint(path, initial.clone(), behaviors.clone())?;
            }
        }

        Ok(builder)
    }

    /// Register a datapoint with its initial value and behaviors.
    pub fn mock_datapoint(
        &mut self,
        path: &str,
        initial: Value,
        behaviors: Vec<BehaviorSpec>,
    ) -> Result<&mut Self> {
        if !is_well_formed_path(path) {
            return Err(MockError::ConfigError(format!(
                "malformed datapoint path '{path}'"
            )));
        }

        let kind = initial.kind();
        self.store.insert(path, initial)?;

        for spec in behaviors {
            let registered = spec
                .bind(path)
                .with_literals_as(kind)
                .and_then(|behavior| self.registry.register(behavior));
            if let Err(err) = registered {
                warn!(path = %path, error = %err, "rejected behavior");
                self.rejected.push(err);
            }
        }

        Ok(self)
    }

    /// Behaviors that were skipped during registration.
    pub fn rejected(&self) -> &[MockError] {
        &self.rejected
    }

    pub fn build(self) -> Engine {
        let store = Arc::new(self.store);
        let animations = AnimationScheduler::new(Arc::clone(&store), self.options.min_tick);
        let setup_faults = self.rejected.iter().map(Fault::from).collect();

        debug!(
            datapoints = store.len(),
            behaviors = self.registry.len(),
            rejected = self.rejected.len(),
            "engine built"
        );

        Engine {
            store,
            registry: Arc::new(self.registry),
            animations: Arc::new(animations),
            setup_faults: Arc::new(setup_faults),
        }
    }
}

/// The mocking engine. Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct Engine {
    store: Arc<DatapointStore>,
    registry: Arc<BehaviorRegistry>,
    animations: Arc<AnimationScheduler>,
    setup_faults: Arc<Vec<Fault>>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("store", &self.store)
            .field("behaviors", &self.registry.len())
            .field("animations", &self.animations)
            .finish()
    }
}

impl Engine {
    pub fn builder(options: EngineOptions) -> EngineBuilder {
        EngineBuilder::new(options)
    }

    /// Dispatch a stimulus to every matching behavior, in registration order.
    ///
    /// An event for an unregistered path is reported as an `UnknownPath`
    /// fault and returned as an error; nothing is written. Failing actions
    /// are reported as faults and counted in the report; they never stop the
    /// remaining behaviors from firing.
    pub fn ingest(&self, stimulus: Stimulus) -> Result<DispatchReport> {
        match &stimulus {
            Stimulus::Event(event) => {
                if !self.store.contains(&event.path) {
                    let err = MockError::UnknownPath(event.path.clone());
                    self.store.report(Fault::from(&err));
                    return Err(err);
                }

                debug!(
                    path = %event.path,
                    kind = %event.kind,
                    value = %event.value,
                    "ingesting event"
                );

                let matched = self.registry.dispatch(&stimulus);
                if matched.is_empty() {
                    debug!(path = %event.path, kind = %event.kind, "no behavior matched event");
                }
                Ok(self.fire_all(&matched, Some(event)))
            }
            Stimulus::ClockTick { period } => Ok(self.tick(*period)),
        }
    }

    /// Fire every clock behavior registered for `period`.
    pub fn tick(&self, period: Duration) -> DispatchReport {
        let matched = self.registry.clock_behaviors(period);
        debug!(period = ?period, behaviors = matched.len(), "clock tick");
        self.fire_all(&matched, None)
    }

    fn fire_all(&self, behaviors: &[&Behavior], event: Option<&ActuationEvent>) -> DispatchReport {
        let mut report = DispatchReport {
            matched: behaviors.len(),
            ..DispatchReport::default()
        };

        for behavior in behaviors {
            match self.fire(behavior, event) {
                Ok(()) => report.fired += 1,
                Err(err) => {
                    report.failed += 1;
                    self.store.report(Fault::from(&err));
                }
            }
        }

        report
    }

    /// Run one behavior's action.
    ///
    /// `event` is the firing event, or `None` for clock ticks.
    pub fn fire(&self, behavior: &Behavior, event: Option<&ActuationEvent>) -> Result<()> {
        let current = self.store.get(&behavior.path)?;
        let ctx = EvalContext {
            path: &behavior.path,
            current: &current,
            event,
        };

        match &behavior.action {
            Action::Set(set) => set.fire(&ctx, &self.store),
            Action::Animate(anim) => anim.fire(&ctx, &self.animations).map(|_| ()),
        }
    }

    pub fn get(&self, path: &str) -> Result<Value> {
        self.store.get(path)
    }

    /// Write a value directly, bypassing behaviors.
    pub fn set(&self, path: &str, value: Value) -> Result<()> {
        self.store.set(path, value)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.store.subscribe()
    }

    pub fn store(&self) -> &Arc<DatapointStore> {
        &self.store
    }

    pub fn registry(&self) -> &BehaviorRegistry {
        &self.registry
    }

    pub fn animations(&self) -> &AnimationScheduler {
        &self.animations
    }

    /// Distinct periods of all registered clock triggers.
    pub fn clock_periods(&self) -> Vec<Duration> {
        self.registry.clock_periods()
    }

    /// Faults for behaviors rejected while the engine was built.
    pub fn setup_faults(&self) -> &[Fault] {
        &self.setup_faults
    }

    /// Stop every running animation.
    pub fn shutdown(&self) {
        self.animations.shutdown();
    }
}
