// src/engine/clock.rs

//! Periodic tickers for clock-triggered behaviors.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::engine::Engine;

/// Spawn one ticker per distinct clock period registered in `engine`.
///
/// Each ticker first fires one full period after it is spawned and then
/// keeps firing every period. A late tick delays the following ones instead
/// of bursting, so tickers drift rather than skip. Abort the returned
/// handles to stop them.
pub fn spawn_clocks(engine: &Engine) -> Vec<JoinHandle<()>> {
    let periods = engine.clock_periods();
    if !periods.is_empty() {
        info!(?periods, "starting clock tickers");
    }

    periods
        .into_iter()
        .map(|period| spawn_clock(engine.clone(), period))
        .collect()
}

fn spawn_clock(engine: Engine, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let report = engine.tick(period);
            debug!(
                period = ?period,
                fired = report.fired,
                failed = report.failed,
                "clock fired"
            );
        }
    })
}
