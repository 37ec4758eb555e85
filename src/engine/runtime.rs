// src/engine/runtime.rs

use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::engine::clock::spawn_clocks;
use crate::engine::{Engine, RuntimeEvent};
use crate::errors::Result;

/// Drives an [`Engine`] from a channel of [`RuntimeEvent`]s.
///
/// This is the async shell around the engine: it owns the clock tickers for
/// the lifetime of the loop and cancels every animation on the way out.
pub struct Runtime {
    engine: Engine,
    event_rx: mpsc::Receiver<RuntimeEvent>,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(engine: Engine, event_rx: mpsc::Receiver<RuntimeEvent>) -> Self {
        Self { engine, event_rx }
    }

    /// Main event loop.
    ///
    /// - Starts one ticker per clock period.
    /// - Feeds every incoming stimulus into the engine.
    /// - Stops on `ShutdownRequested` or when all senders are gone.
    pub async fn run(mut self) -> Result<()> {
        info!("vssmock runtime started");

        let clocks = spawn_clocks(&self.engine);

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            match event {
                RuntimeEvent::Stimulus(stimulus) => match self.engine.ingest(stimulus) {
                    Ok(report) => debug!(
                        matched = report.matched,
                        fired = report.fired,
                        failed = report.failed,
                        "stimulus dispatched"
                    ),
                    // Already reported as a fault by the engine.
                    Err(err) => debug!(error = %err, "stimulus dropped"),
                },
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested; stopping runtime");
                    break;
                }
            }
        }

        for clock in clocks {
            clock.abort();
        }
        self.engine.shutdown();

        info!("runtime exiting");
        Ok(())
    }
}
