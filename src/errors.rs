// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::datapoint::{FaultKind, ValueKind};

#[derive(Error, Debug)]
pub enum MockError {
    #[error("Unknown datapoint path: {0}")]
    UnknownPath(String),

    #[error("Type mismatch on '{path}': expected {expected}, got {found}")]
    TypeMismatch {
        path: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("'$event.value' used on '{0}' without an event payload")]
    MissingEventContext(String),

    #[error("Invalid animation on '{path}': {reason}")]
    InvalidAnimationSpec { path: String, reason: String },

    #[error("Duplicate datapoint path: {0}")]
    DuplicatePath(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MockError {
    /// Classification used when the error is published as a fault entry.
    pub fn fault_kind(&self) -> FaultKind {
        match self {
            MockError::UnknownPath(_) => FaultKind::UnknownPath,
            MockError::TypeMismatch { .. } => FaultKind::TypeMismatch,
            MockError::MissingEventContext(_) => FaultKind::MissingEventContext,
            MockError::InvalidAnimationSpec { .. } => FaultKind::InvalidAnimationSpec,
            _ => FaultKind::Internal,
        }
    }

    /// Datapoint path the error is about, when there is one.
    pub fn path(&self) -> Option<&str> {
        match self {
            MockError::UnknownPath(path)
            | MockError::MissingEventContext(path)
            | MockError::DuplicatePath(path) => Some(path),
            MockError::TypeMismatch { path, .. } | MockError::InvalidAnimationSpec { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MockError>;
