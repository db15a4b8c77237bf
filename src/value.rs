//! Property values
//!
//! Every property managed by the engine carries one of five value shapes.
//! Values read from the device and values declared in a manifest are both
//! canonicalized into [`PropertyValue`] against the property's
//! [`PropertyKind`] so they can be compared directly.

use crate::schema::PropertyKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyword that requests a property's default value.
pub const DEFAULT_KEYWORD: &str = "default";

/// A concrete property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
    Nested(Vec<Vec<String>>),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce this value into the canonical shape for `kind`.
    ///
    /// Returns `None` when the value cannot represent `kind`.
    pub fn canonicalize(&self, kind: PropertyKind) -> Option<PropertyValue> {
        match (kind, self) {
            (PropertyKind::Boolean, PropertyValue::Bool(b)) => Some(PropertyValue::Bool(*b)),
            (PropertyKind::Boolean, PropertyValue::Str(s)) => {
                parse_bool(s).map(PropertyValue::Bool)
            }
            (PropertyKind::Integer, PropertyValue::Int(n)) => Some(PropertyValue::Int(*n)),
            (PropertyKind::Integer, PropertyValue::Str(s)) => {
                s.trim().parse().ok().map(PropertyValue::Int)
            }
            (PropertyKind::String, PropertyValue::Str(s)) => Some(PropertyValue::Str(s.clone())),
            (PropertyKind::String, PropertyValue::Int(n)) => {
                Some(PropertyValue::Str(n.to_string()))
            }
            (PropertyKind::String, PropertyValue::Bool(b)) => {
                Some(PropertyValue::Str(b.to_string()))
            }
            (PropertyKind::FlatList, PropertyValue::List(items)) => {
                Some(PropertyValue::List(items.clone()))
            }
            (PropertyKind::FlatList, PropertyValue::Str(s)) => {
                Some(PropertyValue::List(vec![s.clone()]))
            }
            (PropertyKind::FlatList, PropertyValue::Int(n)) => {
                Some(PropertyValue::List(vec![n.to_string()]))
            }
            (PropertyKind::NestedList, PropertyValue::Nested(rows)) => {
                Some(PropertyValue::Nested(rows.clone()))
            }
            // An empty YAML sequence deserializes as a flat list.
            (PropertyKind::NestedList, PropertyValue::List(items)) if items.is_empty() => {
                Some(PropertyValue::Nested(Vec::new()))
            }
            _ => None,
        }
    }

    /// Convert a loosely typed JSON value into a property value.
    pub fn from_json(value: &serde_json::Value) -> Option<PropertyValue> {
        match value {
            serde_json::Value::Bool(b) => Some(PropertyValue::Bool(*b)),
            serde_json::Value::Number(n) => n.as_i64().map(PropertyValue::Int),
            serde_json::Value::String(s) => Some(PropertyValue::Str(s.clone())),
            serde_json::Value::Array(items) => {
                if items.iter().all(|i| i.is_array()) && !items.is_empty() {
                    let mut rows = Vec::with_capacity(items.len());
                    for row in items {
                        rows.push(scalar_list(row.as_array()?)?);
                    }
                    Some(PropertyValue::Nested(rows))
                } else {
                    scalar_list(items).map(PropertyValue::List)
                }
            }
            serde_json::Value::Null | serde_json::Value::Object(_) => None,
        }
    }
}

fn scalar_list(items: &[serde_json::Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|item| match item {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "on" => Some(true),
        "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(b) => write!(f, "{}", b),
            PropertyValue::Int(n) => write!(f, "{}", n),
            PropertyValue::Str(s) => write!(f, "{}", s),
            PropertyValue::List(items) => write!(f, "[{}]", items.join(", ")),
            PropertyValue::Nested(rows) => {
                let rows: Vec<String> = rows.iter().map(|r| format!("[{}]", r.join(", "))).collect();
                write!(f, "[{}]", rows.join(", "))
            }
        }
    }
}

/// Render an optional value, using `absent` for unconfigured properties.
pub fn display_slot(value: Option<&PropertyValue>) -> String {
    value.map_or_else(|| "absent".to_string(), ToString::to_string)
}

/// A value requested by a manifest for one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Desired {
    /// The `default` keyword: resolved through the property's default policy.
    Default,
    /// A literal value, already canonicalized for the property kind.
    Value(PropertyValue),
}

impl Desired {
    pub fn is_default(&self) -> bool {
        matches!(self, Desired::Default)
    }

    /// The literal value, if any.
    pub fn literal(&self) -> Option<&PropertyValue> {
        match self {
            Desired::Default => None,
            Desired::Value(v) => Some(v),
        }
    }
}

impl fmt::Display for Desired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Desired::Default => write!(f, "{}", DEFAULT_KEYWORD),
            Desired::Value(v) => write!(f, "{}", v),
        }
    }
}
