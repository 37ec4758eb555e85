// src/behavior/action.rs

//! Actions: what happens to a datapoint once one of its behaviors fires.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::animation::{AnimationPlan, AnimationScheduler, ControlPoint};
use crate::behavior::expression::{resolve, EvalContext, Expr};
use crate::datapoint::{DatapointStore, ValueKind};
use crate::errors::{MockError, Result};
use crate::types::RepeatMode;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Set(SetAction),
    Animate(AnimationAction),
}

impl Action {
    pub fn set(value: impl Into<Expr>) -> Self {
        Action::Set(SetAction {
            value: value.into(),
        })
    }

    pub fn animate(duration: Duration, repeat_mode: RepeatMode, values: Vec<Expr>) -> Self {
        Action::Animate(AnimationAction {
            duration,
            repeat_mode,
            values,
        })
    }

    /// Static checks run once, when the behavior is registered.
    pub fn validate(&self, path: &str) -> Result<()> {
        match self {
            Action::Set(_) => Ok(()),
            Action::Animate(anim) => anim.validate(path),
        }
    }

    /// Convert every literal operand to `kind` (see [`Expr::literal_as`]).
    pub fn literals_as(self, path: &str, kind: ValueKind) -> Result<Action> {
        match self {
            Action::Set(SetAction { value }) => Ok(Action::Set(SetAction {
                value: value.literal_as(path, kind)?,
            })),
            Action::Animate(anim) => {
                let values = anim
                    .values
                    .into_iter()
                    .map(|expr| expr.literal_as(path, kind))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Action::Animate(AnimationAction { values, ..anim }))
            }
        }
    }

    /// Whether resolving this action needs an event payload.
    pub fn needs_event(&self) -> bool {
        match self {
            Action::Set(set) => set.value.needs_event(),
            Action::Animate(anim) => anim.values.iter().any(Expr::needs_event),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Set(set) => write!(f, "set({})", set.value),
            Action::Animate(anim) => {
                let values: Vec<String> = anim.values.iter().map(|v| v.to_string()).collect();
                write!(
                    f,
                    "animate({:?}, {:?}, [{}])",
                    anim.duration,
                    anim.repeat_mode,
                    values.join(", ")
                )
            }
        }
    }
}

/// Immediate assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct SetAction {
    pub value: Expr,
}

impl SetAction {
    /// Resolve the operand and write it through the store.
    ///
    /// An animation running on the same path is left alone; its next tick
    /// may overwrite this value.
    pub fn fire(&self, ctx: &EvalContext<'_>, store: &DatapointStore) -> Result<()> {
        let value = resolve(&self.value, ctx)?;
        debug!(path = %ctx.path, value = %value, "set action fired");
        store.set(ctx.path, value)
    }
}

/// Timed interpolation through a sequence of values.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationAction {
    pub duration: Duration,
    pub repeat_mode: RepeatMode,
    pub values: Vec<Expr>,
}

impl AnimationAction {
    pub fn validate(&self, path: &str) -> Result<()> {
        if self.duration.is_zero() {
            return Err(MockError::InvalidAnimationSpec {
                path: path.to_string(),
                reason: "duration must be greater than zero".to_string(),
            });
        }
        if self.values.is_empty() {
            return Err(MockError::InvalidAnimationSpec {
                path: path.to_string(),
                reason: "value sequence is empty".to_string(),
            });
        }
        Ok(())
    }

    /// Resolve every operand once, using the context as it is right now.
    ///
    /// `$self` therefore captures the value at the moment the animation
    /// starts. All resolved values must share the path's kind.
    pub fn control_points(&self, ctx: &EvalContext<'_>) -> Result<Vec<ControlPoint>> {
        self.validate(ctx.path)?;

        let expected = ctx.current.kind();
        let mut values = Vec::with_capacity(self.values.len());
        for expr in &self.values {
            let value = resolve(expr, ctx)?;
            if value.kind() != expected {
                return Err(MockError::TypeMismatch {
                    path: ctx.path.to_string(),
                    expected,
                    found: value.kind(),
                });
            }
            values.push(value);
        }

        Ok(ControlPoint::evenly_spaced(values))
    }

    /// Start (or replace) the animation task for the acting path.
    ///
    /// Returns the id of the new animation task.
    pub fn fire(&self, ctx: &EvalContext<'_>, animations: &AnimationScheduler) -> Result<u64> {
        let points = self.control_points(ctx)?;
        let plan = AnimationPlan {
            path: ctx.path.to_string(),
            duration: self.duration,
            repeat_mode: self.repeat_mode,
            tick: animations.tick_for(self.duration),
            points,
        };
        Ok(animations.start(plan))
    }
}
