use tokio::sync::broadcast::{self, error::TryRecvError};
use vssmock::datapoint::{Fault, FaultKind, Notification, Value};

/// Collect every notification currently buffered in `rx`, without waiting.
pub fn drain(rx: &mut broadcast::Receiver<Notification>) -> Vec<Notification> {
    let mut out = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(n) => out.push(n),
            Err(TryRecvError::Lagged(skipped)) => {
                panic!("test receiver lagged by {skipped} notifications; raise the capacity")
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    out
}

/// New values written to `path`, in order.
pub fn changes_for(notifications: &[Notification], path: &str) -> Vec<Value> {
    notifications
        .iter()
        .filter_map(|n| match n {
            Notification::Changed(change) if change.path == path => Some(change.new.clone()),
            _ => None,
        })
        .collect()
}

pub fn faults(notifications: &[Notification]) -> Vec<Fault> {
    notifications
        .iter()
        .filter_map(|n| match n {
            Notification::Fault(fault) => Some(fault.clone()),
            _ => None,
        })
        .collect()
}

pub fn faults_of_kind(notifications: &[Notification], kind: FaultKind) -> Vec<Fault> {
    faults(notifications)
        .into_iter()
        .filter(|f| f.kind == kind)
        .collect()
}

/// Numeric view of a change list; panics on non-numeric values.
pub fn as_numbers(values: &[Value]) -> Vec<f64> {
    values
        .iter()
        .map(|v| v.as_f64().unwrap_or_else(|| panic!("not numeric: {v:?}")))
        .collect()
}
