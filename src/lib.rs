// src/lib.rs

pub mod animation;
pub mod behavior;
pub mod cli;
pub mod config;
pub mod datapoint;
pub mod engine;
pub mod errors;
pub mod logging;
pub mod transport;
pub mod types;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::{ActionConfig, ConfigFile, TriggerConfig};
use crate::engine::{EngineBuilder, Runtime, RuntimeEvent};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - engine registration
/// - console transport (stdin commands, stdout values)
/// - runtime loop + clock tickers
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = load_and_validate(&args.config)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let builder = EngineBuilder::from_config(&cfg)?;
    if !builder.rejected().is_empty() {
        warn!(
            rejected = builder.rejected().len(),
            "some behaviors were rejected; their datapoints are still mocked"
        );
    }
    let engine = builder.build();
    info!(
        datapoints = engine.store().len(),
        behaviors = engine.registry().len(),
        "engine ready"
    );

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let _printer = transport::spawn_printer(engine.subscribe());
    let _console = if !args.no_console {
        Some(transport::spawn_console(engine.clone(), rt_tx.clone()))
    } else {
        None
    };

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let runtime = Runtime::new(engine, rt_rx);
    runtime.run().await?;
    Ok(())
}

/// Simple dry-run output: print datapoints, initial values and behaviors.
fn print_dry_run(cfg: &ConfigFile) {
    println!("vssmock dry-run");
    println!("  engine.min_tick = {}", cfg.engine.min_tick);
    println!(
        "  engine.notification_capacity = {}",
        cfg.engine.notification_capacity
    );
    println!();

    println!("datapoints ({}):", cfg.paths().count());
    for record in cfg.datapoint.iter() {
        for path in record.target_paths() {
            println!("  - {path}");
            println!("      initial_value: {}", record.initial_value);
            for behavior in record.behavior.iter() {
                let trigger = match &behavior.trigger {
                    TriggerConfig::Event { event } => format!("on {event}"),
                    TriggerConfig::Clock { interval } => format!("every {interval}"),
                };
                let action = match &behavior.action {
                    ActionConfig::Set { value } => format!("set {value}"),
                    ActionConfig::Animation {
                        duration,
                        repeat_mode,
                        values,
                    } => {
                        let values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                        format!(
                            "animate [{}] over {duration} ({repeat_mode:?})",
                            values.join(", ")
                        )
                    }
                };
                println!("      {trigger}: {action}");
            }
        }
    }

    debug!("dry-run complete (engine not started)");
}
