//! Scalar attribute values
//!
//! The graph formats only accept scalar or string attribute values. Richer
//! structures (lists, mappings) must be converted to their string form by
//! the builder before attachment; [`ScalarValue::from_list`] is that
//! conversion.

use serde::{Serialize, Serializer};
use std::fmt;

/// Attribute value attached to a provenance node.
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    Number(f64),
    String(String),
}

impl ScalarValue {
    /// Stringify a list the way the serialized artifact expects it:
    /// `[a, b, c]`.
    pub fn from_list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let joined = items
            .into_iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Self::String(format!("[{joined}]"))
    }

    pub fn as_json(&self) -> serde_json::Value {
        match self {
            Self::Number(n) => serde_json::json!(n),
            Self::String(s) => serde_json::json!(s),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Number(n) => serializer.serialize_f64(*n),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<usize> for ScalarValue {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
