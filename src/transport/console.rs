// src/transport/console.rs

//! Line-oriented stdin/stdout transport.
//!
//! Commands:
//! - `set <path> <value>`: actuator target event
//! - `feed <path> <value>`: current value event
//! - `get <path>`: print the current value
//!
//! Values are parsed against the kind of the target datapoint, so
//! `set Vehicle.Body.Lights.Beam.Low.IsOn true` produces a bool.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::datapoint::{DatapointStore, Notification, Value};
use crate::engine::{ActuationEvent, Engine, EventKind, PathName, RuntimeEvent, Stimulus};

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Ingest(ActuationEvent),
    Get(PathName),
}

/// Parse one input line. Blank lines and `#` comments yield `Ok(None)`.
///
/// For a path the store doesn't know, the value is parsed as an untyped
/// literal and the event is still produced, so the engine can report it.
pub fn parse_command(
    line: &str,
    store: &DatapointStore,
) -> Result<Option<ConsoleCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match verb.to_lowercase().as_str() {
        "get" => {
            if rest.is_empty() {
                return Err("usage: get <path>".to_string());
            }
            Ok(Some(ConsoleCommand::Get(rest.to_string())))
        }
        "set" | "feed" => {
            let (path, text) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| format!("usage: {verb} <path> <value>"))?;
            let text = text.trim();

            let value = match store.kind_of(path) {
                Ok(kind) => Value::parse_as(kind, text)?,
                Err(_) => Value::parse_literal(text),
            };
            let kind = if verb.eq_ignore_ascii_case("set") {
                EventKind::ActuatorTarget
            } else {
                EventKind::CurrentValue
            };

            Ok(Some(ConsoleCommand::Ingest(ActuationEvent {
                path: path.to_string(),
                kind,
                value,
            })))
        }
        other => Err(format!(
            "unknown command '{other}' (expected set, feed or get)"
        )),
    }
}

/// Read commands from stdin and forward events to the runtime.
///
/// Stops at end of input or when the runtime is gone. The engine keeps
/// running after stdin closes.
pub fn spawn_console(engine: Engine, runtime_tx: mpsc::Sender<RuntimeEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let reader = BufReader::new(tokio::io::stdin());
        let mut lines = reader.lines();

        info!("console ready: set <path> <value> | feed <path> <value> | get <path>");

        while let Ok(Some(line)) = lines.next_line().await {
            match parse_command(&line, engine.store()) {
                Ok(None) => {}
                Ok(Some(ConsoleCommand::Get(path))) => match engine.get(&path) {
                    Ok(value) => println!("{path} = {value}"),
                    Err(err) => warn!(error = %err, "get failed"),
                },
                Ok(Some(ConsoleCommand::Ingest(event))) => {
                    let event = RuntimeEvent::Stimulus(Stimulus::Event(event));
                    if runtime_tx.send(event).await.is_err() {
                        debug!("runtime gone; console stopping");
                        return;
                    }
                }
                Err(msg) => warn!(line = %line, "{msg}"),
            }
        }

        debug!("console input ended");
    })
}

/// Print every value change to stdout as `path = value`.
///
/// Faults are already logged by the store. A lagging receiver logs how many
/// notifications it skipped and carries on.
pub fn spawn_printer(mut rx: broadcast::Receiver<Notification>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(Notification::Changed(change)) => println!("{} = {}", change.path, change.new),
                Ok(Notification::Fault(_)) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "printer fell behind; notifications dropped");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}
