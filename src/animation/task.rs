// src/animation/task.rs

//! Individual animation task.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::animation::interpolate::{progress, sample};
use crate::animation::scheduler::AnimationPlan;
use crate::datapoint::{DatapointStore, Fault, Value};

/// Drive one animation until it completes or is cancelled.
///
/// - The first write happens immediately with the first control point.
/// - `Once` writes the final point when the duration has elapsed and stops.
/// - `Repeat` / `PingPong` run until cancelled.
/// - If the cancel channel fires or its sender is dropped, the task stops
///   without writing again.
pub async fn run_animation(
    id: u64,
    plan: AnimationPlan,
    store: Arc<DatapointStore>,
    live: Arc<Mutex<bool>>,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    let started = Instant::now();
    let mut ticker = interval(plan.tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;

            _ = &mut cancel_rx => {
                debug!(path = %plan.path, animation = id, "animation task stopping");
                return;
            }

            _ = ticker.tick() => {}
        }

        let (t, finished) = progress(started.elapsed(), plan.duration, plan.repeat_mode);
        let Some(value) = sample(&plan.points, t) else {
            warn!(path = %plan.path, animation = id, "animation has no control points");
            return;
        };

        if !write_if_live(id, &plan.path, value, &store, &live) {
            return;
        }

        if finished {
            info!(path = %plan.path, animation = id, "animation completed");
            return;
        }
    }
}

/// Write one sample unless the animation has been cancelled.
///
/// Returns `false` if the task should stop.
fn write_if_live(
    id: u64,
    path: &str,
    value: Value,
    store: &DatapointStore,
    live: &Mutex<bool>,
) -> bool {
    let live = live.lock();
    if !*live {
        debug!(path = %path, animation = id, "animation cancelled; skipping write");
        return false;
    }

    match store.set(path, value) {
        Ok(()) => true,
        Err(err) => {
            warn!(path = %path, animation = id, error = %err, "animation write failed; stopping");
            store.report(Fault::from(&err));
            false
        }
    }
}
