// src/animation/scheduler.rs

//! Per-path animation tasks with preemption.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::animation::interpolate::ControlPoint;
use crate::animation::task::run_animation;
use crate::datapoint::DatapointStore;
use crate::types::RepeatMode;

/// Number of ticks an animation is split into, before the `min_tick` floor.
pub const TICKS_PER_ANIMATION: u32 = 100;

/// Hard lower bound for the tick interval, whatever `min_tick` says.
pub const TICK_FLOOR: Duration = Duration::from_millis(1);

/// Everything an animation task needs once its operands are resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationPlan {
    pub path: String,
    pub duration: Duration,
    pub repeat_mode: RepeatMode,
    pub points: Vec<ControlPoint>,
    pub tick: Duration,
}

/// Internal handle for a running animation.
///
/// - `cancel` wakes the task if it is waiting for its next tick.
/// - `live` is held by the task for the whole of each write. Cancelling
///   flips it to `false` under the same lock, so once [`cancel_existing`]
///   returns the old task can no longer write.
/// - `handle` is the Tokio task driving the animation.
struct ActiveAnimation {
    id: u64,
    cancel: Option<oneshot::Sender<()>>,
    live: Arc<Mutex<bool>>,
    handle: tokio::task::JoinHandle<()>,
}

/// Owns the animation tasks; **per path there is never more than one live
/// animation**. Starting a new one on a busy path cancels the old one first.
pub struct AnimationScheduler {
    store: Arc<DatapointStore>,
    active: Mutex<HashMap<String, ActiveAnimation>>,
    next_id: AtomicU64,
    min_tick: Duration,
}

impl fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("active", &self.active_count())
            .field("min_tick", &self.min_tick)
            .finish_non_exhaustive()
    }
}

impl AnimationScheduler {
    pub fn new(store: Arc<DatapointStore>, min_tick: Duration) -> Self {
        Self {
            store,
            active: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            min_tick,
        }
    }

    /// Tick interval for an animation of the given duration.
    ///
    /// Never below [`TICK_FLOOR`], even with a zero `min_tick`.
    pub fn tick_for(&self, duration: Duration) -> Duration {
        (duration / TICKS_PER_ANIMATION)
            .max(self.min_tick)
            .max(TICK_FLOOR)
    }

    /// Start an animation, replacing whatever was running on the same path.
    ///
    /// Must be called from within a Tokio runtime. Returns the new task's id.
    pub fn start(&self, plan: AnimationPlan) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut active = self.active.lock();

        if let Some(mut existing) = active.remove(&plan.path) {
            cancel_existing(&plan.path, &mut existing);
        }

        info!(
            path = %plan.path,
            animation = id,
            duration = ?plan.duration,
            repeat_mode = ?plan.repeat_mode,
            tick = ?plan.tick,
            points = plan.points.len(),
            "starting animation"
        );

        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let live = Arc::new(Mutex::new(true));
        let path = plan.path.clone();
        let handle = tokio::spawn(run_animation(
            id,
            plan,
            Arc::clone(&self.store),
            Arc::clone(&live),
            cancel_rx,
        ));

        active.insert(
            path,
            ActiveAnimation {
                id,
                cancel: Some(cancel_tx),
                live,
                handle,
            },
        );

        id
    }

    /// Cancel the animation running on `path`, if any.
    ///
    /// Returns `true` if a running animation was cancelled.
    pub fn cancel(&self, path: &str) -> bool {
        let removed = self.active.lock().remove(path);
        match removed {
            Some(mut existing) => {
                let was_running = !existing.handle.is_finished();
                cancel_existing(path, &mut existing);
                was_running
            }
            None => false,
        }
    }

    /// Whether an animation task for `path` is still running.
    pub fn is_active(&self, path: &str) -> bool {
        self.active
            .lock()
            .get(path)
            .is_some_and(|a| !a.handle.is_finished())
    }

    /// Id of the animation currently installed for `path`.
    pub fn active_id(&self, path: &str) -> Option<u64> {
        self.active
            .lock()
            .get(path)
            .filter(|a| !a.handle.is_finished())
            .map(|a| a.id)
    }

    pub fn active_count(&self) -> usize {
        self.active
            .lock()
            .values()
            .filter(|a| !a.handle.is_finished())
            .count()
    }

    /// Cancel every animation. Used on engine shutdown.
    pub fn shutdown(&self) {
        let drained: Vec<(String, ActiveAnimation)> = self.active.lock().drain().collect();
        if !drained.is_empty() {
            info!(count = drained.len(), "cancelling animations for shutdown");
        }
        for (path, mut existing) in drained {
            cancel_existing(&path, &mut existing);
        }
    }
}

/// Cancel a running animation.
fn cancel_existing(path: &str, existing: &mut ActiveAnimation) {
    // Waits for an in-flight write to finish; afterwards the task sees
    // `live == false` and bails out before its next write.
    *existing.live.lock() = false;

    if let Some(cancel) = existing.cancel.take() {
        if cancel.send(()).is_err() {
            debug!(
                path = %path,
                animation = existing.id,
                "animation already finished while cancelling"
            );
        } else {
            debug!(path = %path, animation = existing.id, "animation cancelled");
        }
    }
}
