//! Concrete values produced for template fields.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_yaml::Value as YamlValue;
use std::fmt;

/// Display format used for date/time values without an explicit format spec.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A resolved field value.
///
/// Provider functions and literal choice lists both produce `Value`s. The
/// template decides how each one is stringified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// String value
    String(String),

    /// Date/time in UTC
    DateTime(DateTime<Utc>),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as an integer. Booleans count as 0/1.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    /// Try to get this value as a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            Self::Bool(b) => Some(f64::from(u8::from(*b))),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::DateTime(_) => "datetime",
        }
    }

    /// Convert a YAML scalar into a `Value`.
    ///
    /// Sequences and mappings have no scalar form and yield `None`.
    pub fn from_yaml(yaml: &YamlValue) -> Option<Self> {
        match yaml {
            YamlValue::Null => Some(Self::Null),
            YamlValue::Bool(b) => Some(Self::Bool(*b)),
            YamlValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Some(Self::Float(f))
                } else {
                    Some(Self::String(n.to_string()))
                }
            }
            YamlValue::String(s) => Some(Self::String(s.clone())),
            YamlValue::Sequence(_) | YamlValue::Mapping(_) => None,
            YamlValue::Tagged(tagged) => Self::from_yaml(&tagged.value),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            // Whole floats keep a trailing `.0`.
            Self::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                write!(f, "{v:.1}")
            }
            Self::Float(v) => write!(f, "{v}"),
            Self::String(s) => f.write_str(s),
            Self::DateTime(dt) => write!(f, "{}", dt.format(DEFAULT_DATETIME_FORMAT)),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}
