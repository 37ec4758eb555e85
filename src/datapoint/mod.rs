// src/datapoint/mod.rs

//! Datapoints: typed values, the store that holds them, and the
//! notifications it publishes.
//!
//! - [`value`] defines [`Value`] and literal parsing.
//! - [`store`] owns the per-path values and the broadcast channel.
//! - [`notification`] defines what subscribers receive.

pub mod notification;
pub mod store;
pub mod value;

use std::sync::LazyLock;

use regex::Regex;

pub use notification::{Fault, FaultKind, Notification, ValueChange};
pub use store::DatapointStore;
pub use value::{Value, ValueKind};

static PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z0-9_]+)*$").expect("path regex is valid")
});

/// Whether `path` is a well-formed dot-delimited signal path such as
/// `Vehicle.Cabin.Door.Row1.DriverSide.IsOpen`.
pub fn is_well_formed_path(path: &str) -> bool {
    PATH_RE.is_match(path)
}
