// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::datapoint::is_well_formed_path;
use crate::errors::{MockError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::MockError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.engine, raw.datapoint))
    }
}

/// Checks:
/// - there is at least one datapoint
/// - `[engine]` values parse and are in range
/// - each record names its path(s) exactly one way
/// - every path is well-formed and appears only once
/// - initial values and behaviors parse
///
/// It does **not** reject animations with a zero duration or no values;
/// those are dropped per behavior when the engine registers them.
pub fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_datapoints(cfg)?;
    validate_engine_section(cfg)?;
    validate_paths(cfg)?;
    validate_records(cfg)?;
    Ok(())
}

fn ensure_has_datapoints(cfg: &RawConfigFile) -> Result<()> {
    if cfg.datapoint.is_empty() {
        return Err(MockError::ConfigError(
            "config must contain at least one [[datapoint]] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_engine_section(cfg: &RawConfigFile) -> Result<()> {
    let options = cfg.engine.options()?;

    if options.min_tick.is_zero() {
        return Err(MockError::ConfigError(format!(
            "[engine].min_tick must be greater than zero (got '{}')",
            cfg.engine.min_tick
        )));
    }

    if cfg.engine.notification_capacity == 0 {
        return Err(MockError::ConfigError(
            "[engine].notification_capacity must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn validate_paths(cfg: &RawConfigFile) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::new();

    for (i, record) in cfg.datapoint.iter().enumerate() {
        match (&record.path, record.paths.is_empty()) {
            (Some(_), false) => {
                return Err(MockError::ConfigError(format!(
                    "datapoint #{} sets both `path` and `paths`",
                    i + 1
                )));
            }
            (None, true) => {
                return Err(MockError::ConfigError(format!(
                    "datapoint #{} needs `path` or `paths`",
                    i + 1
                )));
            }
            _ => {}
        }

        for path in record.target_paths() {
            if !is_well_formed_path(path) {
                return Err(MockError::ConfigError(format!(
                    "malformed datapoint path '{path}'"
                )));
            }
            if !seen.insert(path) {
                return Err(MockError::DuplicatePath(path.to_string()));
            }
        }
    }

    Ok(())
}

fn validate_records(cfg: &RawConfigFile) -> Result<()> {
    for record in cfg.datapoint.iter() {
        record.initial()?;
        record.behavior_specs()?;
    }
    Ok(())
}
