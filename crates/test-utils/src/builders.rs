use vssmock::config::{
    ActionConfig, BehaviorConfig, ConfigFile, DatapointConfig, EngineSection, RawConfigFile,
    TriggerConfig,
};
use vssmock::engine::{EventKind, RepeatMode};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                engine: EngineSection::default(),
                datapoint: Vec::new(),
            },
        }
    }

    pub fn with_datapoint(mut self, datapoint: DatapointConfig) -> Self {
        self.config.datapoint.push(datapoint);
        self
    }

    pub fn min_tick(mut self, tick: &str) -> Self {
        self.config.engine.min_tick = tick.to_string();
        self
    }

    pub fn notification_capacity(mut self, capacity: usize) -> Self {
        self.config.engine.notification_capacity = capacity;
        self
    }

    /// The raw config, for tests that exercise validation failures.
    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `DatapointConfig`.
pub struct DatapointConfigBuilder {
    datapoint: DatapointConfig,
}

impl DatapointConfigBuilder {
    pub fn new(path: &str, initial_value: impl Into<toml::Value>) -> Self {
        Self {
            datapoint: DatapointConfig {
                path: Some(path.to_string()),
                paths: vec![],
                initial_value: initial_value.into(),
                behavior: vec![],
            },
        }
    }

    /// Several paths sharing one record.
    pub fn many(paths: &[&str], initial_value: impl Into<toml::Value>) -> Self {
        Self {
            datapoint: DatapointConfig {
                path: None,
                paths: paths.iter().map(|p| p.to_string()).collect(),
                initial_value: initial_value.into(),
                behavior: vec![],
            },
        }
    }

    pub fn behavior(mut self, trigger: TriggerConfig, action: ActionConfig) -> Self {
        self.datapoint.behavior.push(BehaviorConfig { trigger, action });
        self
    }

    /// `on actuator_target: set <value>`
    pub fn on_target_set(self, value: impl Into<toml::Value>) -> Self {
        self.behavior(
            TriggerConfig::Event {
                event: EventKind::ActuatorTarget,
            },
            ActionConfig::Set {
                value: value.into(),
            },
        )
    }

    /// `on actuator_target: animate values over duration`
    pub fn on_target_animate(self, duration: &str, repeat_mode: RepeatMode, values: &[&str]) -> Self {
        self.behavior(
            TriggerConfig::Event {
                event: EventKind::ActuatorTarget,
            },
            animation(duration, repeat_mode, values),
        )
    }

    /// `every interval: <action>`
    pub fn every(self, interval: &str, action: ActionConfig) -> Self {
        self.behavior(
            TriggerConfig::Clock {
                interval: interval.to_string(),
            },
            action,
        )
    }

    pub fn build(self) -> DatapointConfig {
        self.datapoint
    }
}

/// Animation action with string operands (`"$self"`, `"$event.value"`, literals).
pub fn animation(duration: &str, repeat_mode: RepeatMode, values: &[&str]) -> ActionConfig {
    ActionConfig::Animation {
        duration: duration.to_string(),
        repeat_mode,
        values: values.iter().map(|v| toml::Value::from(*v)).collect(),
    }
}

pub fn set(value: impl Into<toml::Value>) -> ActionConfig {
    ActionConfig::Set {
        value: value.into(),
    }
}
