// src/behavior/expression.rs

//! Symbolic action operands and their evaluation.

use std::fmt;

use crate::datapoint::{Value, ValueKind};
use crate::engine::ActuationEvent;
use crate::errors::{MockError, Result};

pub const SELF_TOKEN: &str = "$self";
pub const EVENT_VALUE_TOKEN: &str = "$event.value";

/// An action operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Value stored at the acting path when the expression is resolved.
    SelfValue,
    /// Payload of the event that fired the behavior.
    EventValue,
    Literal(Value),
}

impl Expr {
    /// Parse an operand token.
    ///
    /// Tokens starting with `$` must be one of the known symbols; everything
    /// else is a literal (see [`Value::parse_literal`]).
    pub fn parse(token: &str) -> std::result::Result<Expr, String> {
        let trimmed = token.trim();
        match trimmed {
            SELF_TOKEN => Ok(Expr::SelfValue),
            EVENT_VALUE_TOKEN => Ok(Expr::EventValue),
            sym if sym.starts_with('$') => Err(format!(
                "unknown symbol '{sym}' (expected {SELF_TOKEN} or {EVENT_VALUE_TOKEN})"
            )),
            _ => Ok(Expr::Literal(Value::parse_literal(token))),
        }
    }

    /// Parse an operand written as a TOML scalar.
    pub fn from_toml(value: &toml::Value) -> std::result::Result<Expr, String> {
        match value {
            toml::Value::String(s) => Expr::parse(s),
            other => Value::from_toml(other).map(Expr::Literal),
        }
    }

    pub fn needs_event(&self) -> bool {
        matches!(self, Expr::EventValue)
    }

    /// Bring a literal operand to the kind of the datapoint it will write.
    ///
    /// Int literals widen to `Float`, and any scalar becomes its text on a
    /// `String` path. Other mismatches are a `TypeMismatch`. Symbols are
    /// returned unchanged; their kind is only known once resolved.
    pub fn literal_as(self, path: &str, kind: ValueKind) -> Result<Expr> {
        match self {
            Expr::Literal(value) if value.kind() == kind => Ok(Expr::Literal(value)),
            Expr::Literal(Value::Int(i)) if kind == ValueKind::Float => {
                Ok(Expr::Literal(Value::Float(i as f64)))
            }
            Expr::Literal(value) if kind == ValueKind::String => {
                Ok(Expr::Literal(Value::String(value.to_string())))
            }
            Expr::Literal(value) => Err(MockError::TypeMismatch {
                path: path.to_string(),
                expected: kind,
                found: value.kind(),
            }),
            symbol => Ok(symbol),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::SelfValue => f.write_str(SELF_TOKEN),
            Expr::EventValue => f.write_str(EVENT_VALUE_TOKEN),
            Expr::Literal(v) => write!(f, "{v}"),
        }
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Literal(value)
    }
}

/// Everything an expression may refer to while a behavior fires.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub path: &'a str,
    pub current: &'a Value,
    /// `None` when the behavior was fired by a clock tick.
    pub event: Option<&'a ActuationEvent>,
}

/// Evaluate `expr` against `ctx`. Never touches the store.
pub fn resolve(expr: &Expr, ctx: &EvalContext<'_>) -> Result<Value> {
    match expr {
        Expr::SelfValue => Ok(ctx.current.clone()),
        Expr::EventValue => ctx
            .event
            .map(|event| event.value.clone())
            .ok_or_else(|| MockError::MissingEventContext(ctx.path.to_string())),
        Expr::Literal(value) => Ok(value.clone()),
    }
}
