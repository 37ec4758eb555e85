// src/config/mod.rs

//! Configuration loading and validation for vssmock.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate paths, durations and operands (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_and_validate};
pub use model::{
    ActionConfig, BehaviorConfig, ConfigFile, DatapointConfig, EngineSection, RawConfigFile,
    TriggerConfig,
};
pub use validate::validate_raw_config;
