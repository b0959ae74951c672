//! Input value model
//!
//! `Instance` is the value that schemas are inferred from. It covers every
//! JSON kind plus the two kinds JSON cannot express: dates and pre-built
//! schema fragments that are spliced into the inferred tree verbatim.

use crate::schema::SchemaNode;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Object members of an instance
pub type InstanceMap = BTreeMap<String, Instance>;

/// Key that marks a pre-built schema inside a JSON document
pub const SCHEMA_KEY: &str = "$schema";

// ============================================================================
// Instance
// ============================================================================

/// A value to infer a schema from
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Instance {
    /// A value with no representable kind; never classifiable
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Instance>),
    Object(InstanceMap),
    /// Pre-built schema used as-is instead of being inferred
    Schema(SchemaNode),
}

impl Instance {
    /// Build an object instance from key/value pairs
    pub fn object<K, V, I>(members: I) -> Self
    where
        K: Into<String>,
        V: Into<Instance>,
        I: IntoIterator<Item = (K, V)>,
    {
        Instance::Object(
            members
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build an array instance
    pub fn array<V, I>(items: I) -> Self
    where
        V: Into<Instance>,
        I: IntoIterator<Item = V>,
    {
        Instance::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Instance::Undefined)
    }

    pub fn as_object(&self) -> Option<&InstanceMap> {
        match self {
            Instance::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Instance]> {
        match self {
            Instance::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Instance::String(s) => Some(s),
            _ => None,
        }
    }

    /// Look up an object member
    pub fn get(&self, key: &str) -> Option<&Instance> {
        self.as_object().and_then(|map| map.get(key))
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<JsonValue> for Instance {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Instance::Null,
            JsonValue::Bool(b) => Instance::Bool(b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Instance::Integer(i),
                // u64 beyond i64::MAX and floats
                None => Instance::Number(n.as_f64().unwrap_or(f64::NAN)),
            },
            JsonValue::String(s) => Instance::String(s),
            JsonValue::Array(items) => Instance::Array(items.into_iter().map(Into::into).collect()),
            JsonValue::Object(mut map) => match map.remove(SCHEMA_KEY) {
                Some(JsonValue::Object(raw)) => Instance::Schema(SchemaNode::from_map(raw)),
                other => {
                    if let Some(value) = other {
                        map.insert(SCHEMA_KEY.to_string(), value);
                    }
                    Instance::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
                }
            },
        }
    }
}

impl From<&JsonValue> for Instance {
    fn from(value: &JsonValue) -> Self {
        Instance::from(value.clone())
    }
}

impl From<bool> for Instance {
    fn from(b: bool) -> Self {
        Instance::Bool(b)
    }
}

impl From<i32> for Instance {
    fn from(i: i32) -> Self {
        Instance::Integer(i64::from(i))
    }
}

impl From<i64> for Instance {
    fn from(i: i64) -> Self {
        Instance::Integer(i)
    }
}

impl From<f64> for Instance {
    fn from(n: f64) -> Self {
        Instance::Number(n)
    }
}

impl From<&str> for Instance {
    fn from(s: &str) -> Self {
        Instance::String(s.to_string())
    }
}

impl From<String> for Instance {
    fn from(s: String) -> Self {
        Instance::String(s)
    }
}

impl From<DateTime<Utc>> for Instance {
    fn from(date: DateTime<Utc>) -> Self {
        Instance::Date(date)
    }
}

impl From<Vec<Instance>> for Instance {
    fn from(items: Vec<Instance>) -> Self {
        Instance::Array(items)
    }
}

impl From<InstanceMap> for Instance {
    fn from(map: InstanceMap) -> Self {
        Instance::Object(map)
    }
}

impl From<SchemaNode> for Instance {
    fn from(schema: SchemaNode) -> Self {
        Instance::Schema(schema)
    }
}

impl<T: Into<Instance>> From<Option<T>> for Instance {
    fn from(value: Option<T>) -> Self {
        value.map_or(Instance::Null, Into::into)
    }
}
