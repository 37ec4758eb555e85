// src/animation/interpolate.rs

//! Control points, playhead math and sampling.

use std::time::Duration;

use crate::datapoint::Value;
use crate::types::RepeatMode;

/// A target value at a normalized position (`0.0..=1.0`) of the animation.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPoint {
    pub at: f64,
    pub value: Value,
}

impl ControlPoint {
    /// Spread `values` evenly over `0.0..=1.0`.
    ///
    /// A single value yields a start and an end point holding that value.
    pub fn evenly_spaced(values: Vec<Value>) -> Vec<ControlPoint> {
        if let [only] = values.as_slice() {
            return vec![
                ControlPoint { at: 0.0, value: only.clone() },
                ControlPoint { at: 1.0, value: only.clone() },
            ];
        }

        let last = values.len().saturating_sub(1).max(1) as f64;
        values
            .into_iter()
            .enumerate()
            .map(|(i, value)| ControlPoint {
                at: i as f64 / last,
                value,
            })
            .collect()
    }
}

/// Map elapsed wall time to a normalized position.
///
/// Returns the position and whether the animation is finished. Only `Once`
/// ever finishes.
pub fn progress(elapsed: Duration, duration: Duration, mode: RepeatMode) -> (f64, bool) {
    let total = duration.as_secs_f64();
    if total <= 0.0 {
        return (1.0, true);
    }
    let cycles = elapsed.as_secs_f64() / total;

    match mode {
        RepeatMode::Once => {
            if cycles >= 1.0 {
                (1.0, true)
            } else {
                (cycles, false)
            }
        }
        RepeatMode::Repeat => (cycles.fract(), false),
        RepeatMode::PingPong => {
            let pass = cycles.floor() as u64;
            let t = cycles.fract();
            if pass % 2 == 0 { (t, false) } else { (1.0 - t, false) }
        }
    }
}

/// Sample the value at normalized position `t`.
///
/// Numeric segments are interpolated linearly (ints are rounded); any other
/// segment holds its start value until `t` reaches the next point.
pub fn sample(points: &[ControlPoint], t: f64) -> Option<Value> {
    let first = points.first()?;
    let last = points.last()?;
    let t = t.clamp(0.0, 1.0);

    if t <= first.at {
        return Some(first.value.clone());
    }
    if t >= last.at {
        return Some(last.value.clone());
    }

    let segment = points.windows(2).find(|w| t >= w[0].at && t < w[1].at)?;
    let (a, b) = (&segment[0], &segment[1]);

    match (a.value.as_f64(), b.value.as_f64()) {
        (Some(start), Some(end)) => {
            let span = b.at - a.at;
            let local = if span > 0.0 { (t - a.at) / span } else { 1.0 };
            Value::from_f64(a.value.kind(), lerp(start, end, local))
        }
        _ => Some(a.value.clone()),
    }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
