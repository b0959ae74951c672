//! Inference options
//!
//! Data options deserialize from JSON or YAML using the camelCase keys
//! callers already know (`arrays.mode`, `strings.detectFormat`,
//! `objects.additionalProperties`). Missing keys fall back to defaults.
//! Hooks cannot be expressed in a document and are attached with the
//! `with_*` builder methods.

use crate::error::{Error, Result};
use crate::schema::{ObjectStrategy, RequiredStrategy, StringStrategy};
use crate::schema::{ObjectDefault, RequiredDefault, SchemaNode, StringDefault};
use crate::types::{Instance, InstanceMap};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

// ============================================================================
// Array Mode
// ============================================================================

/// How array item schemas are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrayMode {
    /// Merge every element's schema into the least common schema
    #[default]
    All,
    /// Use the first element's schema only
    First,
    /// Use the first element's schema; fail if any element differs
    Uniform,
    /// One positional schema per element
    Tuple,
}

impl ArrayMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ArrayMode::All => "all",
            ArrayMode::First => "first",
            ArrayMode::Uniform => "uniform",
            ArrayMode::Tuple => "tuple",
        }
    }
}

impl FromStr for ArrayMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(ArrayMode::All),
            "first" => Ok(ArrayMode::First),
            "uniform" => Ok(ArrayMode::Uniform),
            "tuple" => Ok(ArrayMode::Tuple),
            other => Err(Error::unknown_array_mode(other)),
        }
    }
}

impl std::fmt::Display for ArrayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Options
// ============================================================================

/// Options for a single inference call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InferOptions {
    /// Mark every node `required: true` unless a parent overrides it
    pub required: bool,

    /// Array handling
    pub arrays: ArrayOptions,

    /// String handling
    pub strings: StringOptions,

    /// Object handling
    pub objects: ObjectOptions,
}

/// Array handling options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayOptions {
    /// Array mode name; parsed when inference starts
    pub mode: String,
}

impl Default for ArrayOptions {
    fn default() -> Self {
        Self {
            mode: ArrayMode::default().as_str().to_string(),
        }
    }
}

/// String handling options
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringOptions {
    /// Attach a `format` when a string matches a known format
    pub detect_format: bool,

    /// Replaces the default string handling
    #[serde(skip)]
    pub custom: Option<Arc<dyn StringStrategy>>,
}

impl Default for StringOptions {
    fn default() -> Self {
        Self {
            detect_format: true,
            custom: None,
        }
    }
}

impl std::fmt::Debug for StringOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringOptions")
            .field("detect_format", &self.detect_format)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Object handling options
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectOptions {
    /// When false, non-empty objects get `additionalProperties: false`
    pub additional_properties: bool,

    /// Replaces the default object handling
    #[serde(skip)]
    pub custom: Option<Arc<dyn ObjectStrategy>>,

    /// Replaces the default required policy for every node
    #[serde(skip)]
    pub require_override: Option<Arc<dyn RequiredStrategy>>,
}

impl Default for ObjectOptions {
    fn default() -> Self {
        Self {
            additional_properties: true,
            custom: None,
            require_override: None,
        }
    }
}

impl std::fmt::Debug for ObjectOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectOptions")
            .field("additional_properties", &self.additional_properties)
            .field("custom", &self.custom.is_some())
            .field("require_override", &self.require_override.is_some())
            .finish()
    }
}

impl InferOptions {
    /// Create options with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.array_mode()?;
        Ok(options)
    }

    /// Parse options from a YAML document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let options: Self = serde_yaml::from_str(yaml)?;
        options.array_mode()?;
        Ok(options)
    }

    /// Parse options from an already decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let options: Self = serde_json::from_value(value)?;
        options.array_mode()?;
        Ok(options)
    }

    /// The configured array mode
    pub fn array_mode(&self) -> Result<ArrayMode> {
        self.arrays.mode.parse()
    }

    /// Set the global required flag
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set the array mode
    #[must_use]
    pub fn with_array_mode(mut self, mode: ArrayMode) -> Self {
        self.arrays.mode = mode.as_str().to_string();
        self
    }

    /// Enable/disable string format detection
    #[must_use]
    pub fn with_format_detection(mut self, enabled: bool) -> Self {
        self.strings.detect_format = enabled;
        self
    }

    /// Allow/forbid additional properties on inferred objects
    #[must_use]
    pub fn with_additional_properties(mut self, allowed: bool) -> Self {
        self.objects.additional_properties = allowed;
        self
    }

    /// Replace the string handling
    #[must_use]
    pub fn with_string_strategy(mut self, strategy: impl StringStrategy + 'static) -> Self {
        self.strings.custom = Some(Arc::new(strategy));
        self
    }

    /// Replace the string handling with a closure
    #[must_use]
    pub fn with_string_fn<F>(self, f: F) -> Self
    where
        F: Fn(&str, &StringDefault<'_>) -> SchemaNode + Send + Sync + 'static,
    {
        self.with_string_strategy(f)
    }

    /// Replace the object handling
    #[must_use]
    pub fn with_object_strategy(mut self, strategy: impl ObjectStrategy + 'static) -> Self {
        self.objects.custom = Some(Arc::new(strategy));
        self
    }

    /// Replace the object handling with a closure
    #[must_use]
    pub fn with_object_fn<F>(self, f: F) -> Self
    where
        F: Fn(&InstanceMap, &ObjectDefault<'_>) -> Result<SchemaNode> + Send + Sync + 'static,
    {
        self.with_object_strategy(f)
    }

    /// Replace the required policy
    #[must_use]
    pub fn with_required_strategy(mut self, strategy: impl RequiredStrategy + 'static) -> Self {
        self.objects.require_override = Some(Arc::new(strategy));
        self
    }

    /// Replace the required policy with a closure
    #[must_use]
    pub fn with_required_fn<F>(self, f: F) -> Self
    where
        F: Fn(SchemaNode, &Instance, &RequiredDefault) -> SchemaNode + Send + Sync + 'static,
    {
        self.with_required_strategy(f)
    }
}
