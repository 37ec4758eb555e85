// src/behavior/mod.rs

//! Behaviors: a trigger paired with an action, bound to one datapoint.
//!
//! - [`trigger`] decides *whether* a behavior fires.
//! - [`action`] decides *what* happens to the value.
//! - [`expression`] resolves `$self` / `$event.value` / literal operands.
//! - [`registry`] indexes behaviors by path and clock period.

pub mod action;
pub mod expression;
pub mod registry;
pub mod trigger;

pub use action::{Action, AnimationAction, SetAction};
pub use expression::{resolve, EvalContext, Expr};
pub use registry::BehaviorRegistry;
pub use trigger::Trigger;

use crate::datapoint::ValueKind;
use crate::errors::Result;

/// A behavior that is not yet bound to a path.
///
/// This is what configuration produces; [`BehaviorSpec::bind`] attaches it to
/// a datapoint during registration.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorSpec {
    pub trigger: Trigger,
    pub action: Action,
}

impl BehaviorSpec {
    pub fn new(trigger: Trigger, action: Action) -> Self {
        Self { trigger, action }
    }

    pub fn bind(self, path: impl Into<String>) -> Behavior {
        Behavior {
            path: path.into(),
            trigger: self.trigger,
            action: self.action,
        }
    }
}

/// A registered behavior. Immutable once in the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Behavior {
    pub path: String,
    pub trigger: Trigger,
    pub action: Action,
}

impl Behavior {
    /// Check literal operands against the kind of the owning datapoint.
    ///
    /// A literal that can't be written to the path rejects the whole behavior.
    pub fn with_literals_as(self, kind: ValueKind) -> Result<Behavior> {
        let action = self.action.literals_as(&self.path, kind)?;
        Ok(Behavior { action, ..self })
    }
}
