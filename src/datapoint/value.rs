// src/datapoint/value.rs

//! Scalar signal values.

use std::cmp::Ordering;
use std::fmt;

/// Type tag of a [`Value`]. Fixed per datapoint once its initial value is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    Float,
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bool => f.write_str("bool"),
            ValueKind::Int => f.write_str("int"),
            ValueKind::Float => f.write_str("float"),
            ValueKind::String => f.write_str("string"),
        }
    }
}

/// Current value of a datapoint.
///
/// Equality and ordering only hold within one variant; values of different
/// kinds are never equal and never ordered.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::String(_) => ValueKind::String,
        }
    }

    /// Parse an untyped literal token.
    ///
    /// `true`/`false` become `Bool`, integer tokens `Int`, other numeric
    /// tokens `Float`; anything else is kept as a `String`.
    pub fn parse_literal(token: &str) -> Value {
        let trimmed = token.trim();
        match trimmed {
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }
        Value::String(trimmed.to_string())
    }

    /// Parse text into a value of a known kind.
    ///
    /// Integral text is accepted for `Float`; nothing else crosses kinds.
    pub fn parse_as(kind: ValueKind, text: &str) -> Result<Value, String> {
        let trimmed = text.trim();
        match kind {
            ValueKind::Bool => match trimmed.to_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                other => Err(format!("'{other}' is not a bool")),
            },
            ValueKind::Int => trimmed
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| format!("'{trimmed}' is not an int: {e}")),
            ValueKind::Float => trimmed
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|e| format!("'{trimmed}' is not a float: {e}")),
            ValueKind::String => Ok(Value::String(text.to_string())),
        }
    }

    /// Convert a TOML scalar from a configuration file.
    ///
    /// TOML strings go through [`Value::parse_literal`], so `"false"` and
    /// `false` both end up as `Bool(false)`.
    pub fn from_toml(value: &toml::Value) -> Result<Value, String> {
        match value {
            toml::Value::Boolean(b) => Ok(Value::Bool(*b)),
            toml::Value::Integer(i) => Ok(Value::Int(*i)),
            toml::Value::Float(f) => Ok(Value::Float(*f)),
            toml::Value::String(s) => Ok(Value::parse_literal(s)),
            other => Err(format!(
                "unsupported value {other}; expected a bool, number or string"
            )),
        }
    }

    /// Numeric view used for interpolation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Build a numeric value of `kind` from an interpolated sample.
    ///
    /// `Int` rounds to the nearest integer. Returns `None` for non-numeric kinds.
    pub fn from_f64(kind: ValueKind, sample: f64) -> Option<Value> {
        match kind {
            ValueKind::Int => Some(Value::Int(sample.round() as i64)),
            ValueKind::Float => Some(Value::Float(sample)),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
