// src/animation/mod.rs

//! Timed value animations.
//!
//! - [`interpolate`] holds the pure math: control points, playhead, sampling.
//! - [`scheduler`] owns the per-path tasks and enforces preemption.
//! - [`task`] is the loop a single animation runs in.

pub mod interpolate;
pub mod scheduler;
pub mod task;

pub use interpolate::{progress, sample, ControlPoint};
pub use scheduler::{AnimationPlan, AnimationScheduler, TICKS_PER_ANIMATION, TICK_FLOOR};
