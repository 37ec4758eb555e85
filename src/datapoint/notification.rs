// src/datapoint/notification.rs

//! Outbound notifications: value changes and fault reports share one channel.

use std::fmt;
use std::time::SystemTime;

use crate::datapoint::Value;
use crate::errors::MockError;

/// A successful store write.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub path: String,
    pub old: Value,
    pub new: Value,
    pub timestamp: SystemTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    UnknownPath,
    TypeMismatch,
    MissingEventContext,
    InvalidAnimationSpec,
    Internal,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaultKind::UnknownPath => "unknown_path",
            FaultKind::TypeMismatch => "type_mismatch",
            FaultKind::MissingEventContext => "missing_event_context",
            FaultKind::InvalidAnimationSpec => "invalid_animation_spec",
            FaultKind::Internal => "internal",
        };
        f.write_str(name)
    }
}

/// Error entry published when a stimulus or action fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    pub kind: FaultKind,
    pub path: Option<String>,
    pub message: String,
    pub timestamp: SystemTime,
}

impl From<&MockError> for Fault {
    fn from(err: &MockError) -> Self {
        Self {
            kind: err.fault_kind(),
            path: err.path().map(str::to_string),
            message: err.to_string(),
            timestamp: SystemTime::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Changed(ValueChange),
    Fault(Fault),
}

impl Notification {
    pub fn path(&self) -> Option<&str> {
        match self {
            Notification::Changed(change) => Some(&change.path),
            Notification::Fault(fault) => fault.path.as_deref(),
        }
    }
}
