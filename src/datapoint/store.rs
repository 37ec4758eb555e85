// src/datapoint/store.rs

//! The datapoint store: single source of truth for current signal values.

use std::collections::HashMap;
use std::fmt;
use std::time::SystemTime;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

use crate::datapoint::{Fault, Notification, Value, ValueChange, ValueKind};
use crate::errors::{MockError, Result};

#[derive(Debug)]
struct Datapoint {
    kind: ValueKind,
    value: Value,
    updated_at: SystemTime,
}

/// Map from path to current value.
///
/// Paths are inserted while the engine is being built and never removed.
/// After that the map itself is read-only; every entry has its own lock, so
/// writers to different paths never contend with each other.
///
/// Every successful [`set`](Self::set) publishes a [`Notification::Changed`]
/// on a bounded broadcast channel. Slow subscribers lag and lose the oldest
/// entries; writers never wait for them.
pub struct DatapointStore {
    entries: HashMap<String, Mutex<Datapoint>>,
    order: Vec<String>,
    notifier: broadcast::Sender<Notification>,
}

impl fmt::Debug for DatapointStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatapointStore")
            .field("paths", &self.order)
            .field("subscribers", &self.notifier.receiver_count())
            .finish()
    }
}

impl DatapointStore {
    /// Create an empty store whose notification buffer holds `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let (notifier, _) = broadcast::channel(capacity.max(1));
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
            notifier,
        }
    }

    /// Register a datapoint with its initial value.
    ///
    /// The initial value fixes the path's [`ValueKind`]. No notification is
    /// emitted for the initial value.
    pub fn insert(&mut self, path: impl Into<String>, initial: Value) -> Result<()> {
        let path = path.into();
        if self.entries.contains_key(&path) {
            return Err(MockError::DuplicatePath(path));
        }

        debug!(path = %path, value = %initial, kind = %initial.kind(), "registered datapoint");

        self.entries.insert(
            path.clone(),
            Mutex::new(Datapoint {
                kind: initial.kind(),
                value: initial,
                updated_at: SystemTime::now(),
            }),
        );
        self.order.push(path);
        Ok(())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Registered paths in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn get(&self, path: &str) -> Result<Value> {
        let entry = self.entry(path)?;
        Ok(entry.lock().value.clone())
    }

    pub fn kind_of(&self, path: &str) -> Result<ValueKind> {
        let entry = self.entry(path)?;
        Ok(entry.lock().kind)
    }

    pub fn last_updated(&self, path: &str) -> Result<SystemTime> {
        let entry = self.entry(path)?;
        Ok(entry.lock().updated_at)
    }

    /// Replace the value stored at `path`.
    ///
    /// The notification is sent while the path's lock is held, so
    /// notifications for a single path arrive in write order. Writing the
    /// same value again still notifies.
    pub fn set(&self, path: &str, value: Value) -> Result<()> {
        let entry = self.entry(path)?;
        let mut dp = entry.lock();

        if value.kind() != dp.kind {
            return Err(MockError::TypeMismatch {
                path: path.to_string(),
                expected: dp.kind,
                found: value.kind(),
            });
        }

        let timestamp = SystemTime::now();
        let old = std::mem::replace(&mut dp.value, value.clone());
        dp.updated_at = timestamp;

        trace!(path = %path, old = %old, new = %value, "datapoint updated");

        // No subscribers is fine; the write itself already happened.
        let _ = self.notifier.send(Notification::Changed(ValueChange {
            path: path.to_string(),
            old,
            new: value,
            timestamp,
        }));

        Ok(())
    }

    /// Publish an error entry on the notification channel.
    pub fn report(&self, fault: Fault) {
        warn!(
            kind = %fault.kind,
            path = fault.path.as_deref().unwrap_or("-"),
            message = %fault.message,
            "fault reported"
        );
        let _ = self.notifier.send(Notification::Fault(fault));
    }

    /// Receive every notification published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    fn entry(&self, path: &str) -> Result<&Mutex<Datapoint>> {
        self.entries
            .get(path)
            .ok_or_else(|| MockError::UnknownPath(path.to_string()))
    }
}
