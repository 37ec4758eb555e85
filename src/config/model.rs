// src/config/model.rs

use serde::Deserialize;

use crate::behavior::{Action, BehaviorSpec, Expr, Trigger};
use crate::datapoint::Value;
use crate::engine::{EngineOptions, DEFAULT_NOTIFICATION_CAPACITY};
use crate::errors::{MockError, Result};
use crate::types::{parse_duration, EventKind, RepeatMode};

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [engine]
/// min_tick = "50ms"
/// notification_capacity = 256
///
/// [[datapoint]]
/// path = "Vehicle.Cabin.HVAC.Station.Row1.Driver.Temperature"
/// initial_value = 14
///
/// [[datapoint.behavior]]
/// trigger = { type = "event", event = "actuator_target" }
/// action = { type = "animation", duration = "30s", repeat_mode = "once", values = ["$self", "$event.value"] }
/// ```
///
/// All sections are optional at the serde level; [`ConfigFile::try_from`]
/// enforces the semantic rules.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Engine knobs from `[engine]`.
    #[serde(default)]
    pub engine: EngineSection,

    /// All `[[datapoint]]` records, in file order.
    #[serde(default)]
    pub datapoint: Vec<DatapointConfig>,
}

/// A validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub engine: EngineSection,
    pub datapoint: Vec<DatapointConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(engine: EngineSection, datapoint: Vec<DatapointConfig>) -> Self {
        Self { engine, datapoint }
    }

    /// Every configured path, in file order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.datapoint.iter().flat_map(|d| d.target_paths())
    }
}

/// `[engine]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSection {
    /// Lower bound for an animation's tick interval, e.g. `"50ms"`.
    #[serde(default = "default_min_tick")]
    pub min_tick: String,

    /// How many notifications a slow subscriber may fall behind before it
    /// starts losing the oldest ones.
    #[serde(default = "default_notification_capacity")]
    pub notification_capacity: usize,
}

fn default_min_tick() -> String {
    "50ms".to_string()
}

fn default_notification_capacity() -> usize {
    DEFAULT_NOTIFICATION_CAPACITY
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            min_tick: default_min_tick(),
            notification_capacity: default_notification_capacity(),
        }
    }
}

impl EngineSection {
    pub fn options(&self) -> Result<EngineOptions> {
        let min_tick = parse_duration(&self.min_tick)
            .map_err(|e| MockError::ConfigError(format!("[engine].min_tick: {e}")))?;
        Ok(EngineOptions {
            min_tick,
            notification_capacity: self.notification_capacity,
        })
    }
}

/// `[[datapoint]]` record.
///
/// Either `path` names a single datapoint, or `paths` lists several that
/// share the same initial value and behaviors.
#[derive(Debug, Clone, Deserialize)]
pub struct DatapointConfig {
    #[serde(default)]
    pub path: Option<String>,

    #[serde(default)]
    pub paths: Vec<String>,

    /// Bool, number, or a string that is parsed as a literal (`"false"` is a bool).
    pub initial_value: toml::Value,

    /// `[[datapoint.behavior]]` entries, in registration order.
    #[serde(default)]
    pub behavior: Vec<BehaviorConfig>,
}

impl DatapointConfig {
    /// The paths this record registers.
    pub fn target_paths(&self) -> Vec<&str> {
        self.path
            .iter()
            .chain(self.paths.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn initial(&self) -> Result<Value> {
        Value::from_toml(&self.initial_value).map_err(|e| {
            MockError::ConfigError(format!("datapoint '{}': initial_value: {e}", self.label()))
        })
    }

    pub fn behavior_specs(&self) -> Result<Vec<BehaviorSpec>> {
        self.behavior
            .iter()
            .enumerate()
            .map(|(i, b)| {
                b.to_spec().map_err(|e| {
                    MockError::ConfigError(format!(
                        "datapoint '{}': behavior #{}: {e}",
                        self.label(),
                        i + 1
                    ))
                })
            })
            .collect()
    }

    pub(crate) fn label(&self) -> &str {
        self.target_paths().first().copied().unwrap_or("<no path>")
    }
}

/// `[[datapoint.behavior]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct BehaviorConfig {
    pub trigger: TriggerConfig,
    pub action: ActionConfig,
}

/// `trigger = { type = "event", event = "actuator_target" }` or
/// `trigger = { type = "clock", interval = "1s" }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerConfig {
    Event {
        #[serde(default)]
        event: EventKind,
    },
    Clock {
        interval: String,
    },
}

/// `action = { type = "set", value = "$event.value" }` or
/// `action = { type = "animation", duration = "30s", values = [...] }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionConfig {
    Set {
        value: toml::Value,
    },
    Animation {
        duration: String,
        #[serde(default)]
        repeat_mode: RepeatMode,
        values: Vec<toml::Value>,
    },
}

impl BehaviorConfig {
    /// Convert to an unbound behavior.
    ///
    /// Only syntax is checked here (durations, symbols). Semantic checks such
    /// as a zero animation duration happen at registration.
    pub fn to_spec(&self) -> std::result::Result<BehaviorSpec, String> {
        let trigger = match &self.trigger {
            TriggerConfig::Event { event } => Trigger::event(*event),
            TriggerConfig::Clock { interval } => {
                Trigger::clock(parse_duration(interval).map_err(|e| format!("interval: {e}"))?)
            }
        };

        let action = match &self.action {
            ActionConfig::Set { value } => {
                Action::set(Expr::from_toml(value).map_err(|e| format!("value: {e}"))?)
            }
            ActionConfig::Animation {
                duration,
                repeat_mode,
                values,
            } => {
                let duration = parse_duration(duration).map_err(|e| format!("duration: {e}"))?;
                let values = values
                    .iter()
                    .map(Expr::from_toml)
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|e| format!("values: {e}"))?;
                Action::animate(duration, *repeat_mode, values)
            }
        };

        Ok(BehaviorSpec::new(trigger, action))
    }
}
