//! Schema types

use crate::classify::SemanticType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Schema of a single value
///
/// The keywords produced by inference are modelled as fields; any other
/// keyword read from JSON is kept verbatim in `extra`. Absent keys are
/// `None` and are omitted when serialized, so two nodes are equal exactly
/// when their JSON forms are deep-equal.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SchemaNode {
    /// Semantic type. Absent only on hand-written schema fragments.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SemanticType>,

    /// Nested properties (for objects with at least one key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaNode>>,

    /// Array items schema (for non-empty arrays)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,

    /// Format hint (e.g., "date-time", "email", "uri")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Draft-03 style per-node required flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Additional properties allowed (for objects)
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,

    /// Keywords without a field, or whose value does not fit one
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(SchemaNode::from_map)
    }
}

/// Items of an array schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    /// Positional item schemas, one per element
    Tuple(Vec<SchemaNode>),
    /// One schema shared by every element
    Single(Box<SchemaNode>),
}

impl Items {
    /// Create a shared item schema
    pub fn single(schema: SchemaNode) -> Self {
        Items::Single(Box::new(schema))
    }

    /// Get the shared item schema, if this is not a tuple
    pub fn as_single(&self) -> Option<&SchemaNode> {
        match self {
            Items::Single(schema) => Some(schema),
            Items::Tuple(_) => None,
        }
    }
}

/// Keyword present on a schema node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchemaKey {
    Type,
    Properties,
    Items,
    Format,
    Required,
    AdditionalProperties,
    Other(String),
}

impl SchemaNode {
    /// Create a node with just a type
    pub fn new(schema_type: SemanticType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// Create an object node with nested properties
    pub fn object(properties: BTreeMap<String, SchemaNode>) -> Self {
        Self {
            schema_type: Some(SemanticType::Object),
            properties: (!properties.is_empty()).then_some(properties),
            ..Self::default()
        }
    }

    /// Create an array node with a shared item schema
    pub fn array(items: SchemaNode) -> Self {
        Self::array_of(Some(Items::single(items)))
    }

    /// Create an array node with optional items
    pub fn array_of(items: Option<Items>) -> Self {
        Self {
            schema_type: Some(SemanticType::Array),
            items,
            ..Self::default()
        }
    }

    /// Set format hint
    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Set the required flag
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Set additionalProperties
    #[must_use]
    pub fn with_additional_properties(mut self, allowed: bool) -> Self {
        self.additional_properties = Some(allowed);
        self
    }

    /// Check the node's type
    pub fn is_type(&self, schema_type: SemanticType) -> bool {
        self.schema_type == Some(schema_type)
    }

    /// Check if the node has at least one property
    pub fn has_properties(&self) -> bool {
        self.properties.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// Build a node from a raw JSON schema object
    ///
    /// Never fails: a modelled keyword whose value does not fit its field
    /// is kept in `extra` unchanged.
    pub fn from_map(mut raw: Map<String, Value>) -> Self {
        Self {
            schema_type: take_keyword(&mut raw, "type"),
            properties: take_keyword(&mut raw, "properties"),
            items: take_keyword(&mut raw, "items"),
            format: take_keyword(&mut raw, "format"),
            required: take_keyword(&mut raw, "required"),
            additional_properties: take_keyword(&mut raw, "additionalProperties"),
            extra: raw.into_iter().collect(),
        }
    }

    /// Keywords present on this node
    pub fn keys(&self) -> BTreeSet<SchemaKey> {
        [
            (SchemaKey::Type, self.schema_type.is_some()),
            (SchemaKey::Properties, self.properties.is_some()),
            (SchemaKey::Items, self.items.is_some()),
            (SchemaKey::Format, self.format.is_some()),
            (SchemaKey::Required, self.required.is_some()),
            (
                SchemaKey::AdditionalProperties,
                self.additional_properties.is_some(),
            ),
        ]
        .into_iter()
        .filter_map(|(key, present)| present.then_some(key))
        .chain(self.extra.keys().cloned().map(SchemaKey::Other))
        .collect()
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Convert to pretty JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

impl From<SemanticType> for SchemaNode {
    fn from(schema_type: SemanticType) -> Self {
        SchemaNode::new(schema_type)
    }
}

fn take_keyword<T: DeserializeOwned>(raw: &mut Map<String, Value>, key: &str) -> Option<T> {
    let parsed = T::deserialize(raw.get(key)?).ok()?;
    raw.remove(key);
    Some(parsed)
}
