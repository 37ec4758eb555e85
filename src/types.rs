use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Kind of external event delivered by the broker.
///
/// - `ActuatorTarget`: a client asked the actuator to move to a new value.
/// - `CurrentValue`: a provider reported a new current value for the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    ActuatorTarget,
    CurrentValue,
}

impl Default for EventKind {
    fn default() -> Self {
        EventKind::ActuatorTarget
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::ActuatorTarget => f.write_str("actuator_target"),
            EventKind::CurrentValue => f.write_str("current_value"),
        }
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "actuator_target" => Ok(EventKind::ActuatorTarget),
            "current_value" => Ok(EventKind::CurrentValue),
            other => Err(format!(
                "invalid event kind: {other} (expected \"actuator_target\" or \"current_value\")"
            )),
        }
    }
}

/// What an animation does once it reaches its last control point.
///
/// - `Once`: hold the final value and stop (default).
/// - `Repeat`: jump back to the first control point and start over.
/// - `PingPong`: play the control points backwards, then forwards again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    Once,
    Repeat,
    #[serde(alias = "reverse_repeat")]
    PingPong,
}

impl Default for RepeatMode {
    fn default() -> Self {
        RepeatMode::Once
    }
}

impl FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "once" => Ok(RepeatMode::Once),
            "repeat" => Ok(RepeatMode::Repeat),
            "ping_pong" | "reverse_repeat" => Ok(RepeatMode::PingPong),
            other => Err(format!(
                "invalid repeat_mode: {other} (expected \"once\", \"repeat\" or \"ping_pong\")"
            )),
        }
    }
}

/// Parse a duration string like `"30s"`, `"250ms"`, `"1.5m"`, `"2h"`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    // Find the boundary between the number and the unit suffix.
    let idx = s
        .chars()
        .position(|c| !(c.is_ascii_digit() || c == '.'))
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: f64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;
    let unit = unit_part.trim().to_lowercase();

    let secs = match unit.as_str() {
        "ms" => value / 1000.0,
        "s" => value,
        "m" => value * 60.0,
        "h" => value * 60.0 * 60.0,
        _ => {
            return Err(format!(
                "unsupported duration unit '{}'; expected ms, s, m, or h",
                unit
            ));
        }
    };

    Duration::try_from_secs_f64(secs).map_err(|e| format!("duration '{s}' out of range: {e}"))
}
