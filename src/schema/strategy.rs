//! Pluggable inference policies
//!
//! Each hook receives the value being schematized together with a default
//! continuation, so an override can pre-process its input, post-process the
//! default result, or replace it entirely.
//!
//! Plain closures implement the traits:
//!
//! ```rust,ignore
//! use to_json_schema::{InferOptions, Instance};
//!
//! // Never mark booleans as required, defer to the default otherwise
//! let options = InferOptions::default()
//!     .with_required(true)
//!     .with_required_fn(|schema, value, default| match value {
//!         Instance::Bool(_) => schema,
//!         _ => default.apply(schema),
//!     });
//! ```

use super::inference::{detect_format, SchemaBuilder};
use super::types::SchemaNode;
use crate::classify::{FormatMatcher, SemanticType};
use crate::error::{Error, Result};
use crate::types::{Instance, InstanceMap};

// ============================================================================
// Strategy traits
// ============================================================================

/// Builds the schema of a string value
pub trait StringStrategy: Send + Sync {
    fn build(&self, value: &str, default: &StringDefault<'_>) -> SchemaNode;
}

/// Builds the schema of an object value
pub trait ObjectStrategy: Send + Sync {
    fn build(&self, object: &InstanceMap, default: &ObjectDefault<'_>) -> Result<SchemaNode>;
}

/// Decides whether and how the `required` flag is attached to a schema
pub trait RequiredStrategy: Send + Sync {
    fn apply(&self, schema: SchemaNode, value: &Instance, default: &RequiredDefault) -> SchemaNode;
}

impl<F> StringStrategy for F
where
    F: Fn(&str, &StringDefault<'_>) -> SchemaNode + Send + Sync,
{
    fn build(&self, value: &str, default: &StringDefault<'_>) -> SchemaNode {
        self(value, default)
    }
}

impl<F> ObjectStrategy for F
where
    F: Fn(&InstanceMap, &ObjectDefault<'_>) -> Result<SchemaNode> + Send + Sync,
{
    fn build(&self, object: &InstanceMap, default: &ObjectDefault<'_>) -> Result<SchemaNode> {
        self(object, default)
    }
}

impl<F> RequiredStrategy for F
where
    F: Fn(SchemaNode, &Instance, &RequiredDefault) -> SchemaNode + Send + Sync,
{
    fn apply(&self, schema: SchemaNode, value: &Instance, default: &RequiredDefault) -> SchemaNode {
        self(schema, value, default)
    }
}

// ============================================================================
// Default continuations
// ============================================================================

/// Default string handling: `{type: string}` plus a detected format
pub struct StringDefault<'a> {
    pub(crate) detect_format: bool,
    pub(crate) formats: &'a dyn FormatMatcher,
}

impl StringDefault<'_> {
    pub fn build(&self, value: &str) -> SchemaNode {
        let schema = SchemaNode::new(SemanticType::String);
        if !self.detect_format {
            return schema;
        }
        match detect_format(self.formats, value) {
            Some(format) => schema.with_format(format),
            None => schema,
        }
    }
}

/// Default object handling: one inferred child schema per key
pub struct ObjectDefault<'a> {
    pub(crate) builder: &'a SchemaBuilder<'a>,
}

impl ObjectDefault<'_> {
    /// Build with every property left to the required policy
    pub fn build(&self, object: &InstanceMap) -> Result<SchemaNode> {
        self.builder.default_object_schema(object, &|_| None)
    }

    /// Build with the named properties marked required
    pub fn build_with_required(&self, object: &InstanceMap, required: &[&str]) -> Result<SchemaNode> {
        self.builder.default_object_schema(object, &|key| {
            required.iter().any(|r| *r == key).then_some(true)
        })
    }

    /// Build with a per-property required override
    pub fn build_with(
        &self,
        object: &InstanceMap,
        required_for: &dyn Fn(&str) -> Option<bool>,
    ) -> Result<SchemaNode> {
        self.builder.default_object_schema(object, required_for)
    }
}

/// Default required policy
///
/// An explicit override wins; otherwise `required: true` is attached when
/// the options ask for it. `required: false` is never added by default.
#[derive(Debug, Clone, Copy)]
pub struct RequiredDefault {
    pub(crate) required_override: Option<bool>,
    pub(crate) required: bool,
}

impl RequiredDefault {
    pub fn apply(&self, schema: SchemaNode) -> SchemaNode {
        match self.required_override {
            Some(required) => schema.with_required(required),
            None if self.required => schema.with_required(true),
            None => schema,
        }
    }

    /// The override passed down by the parent, if any
    pub fn required_override(&self) -> Option<bool> {
        self.required_override
    }
}

// ============================================================================
// Built-in strategies
// ============================================================================

/// Key listing the properties that are required
pub const REQUIRED_DIRECTIVE: &str = "$required";

/// Key listing the properties that are optional
pub const OPTIONAL_DIRECTIVE: &str = "$optional";

/// Object strategy driven by `$required` / `$optional` directive keys
///
/// With `$required`, listed properties are required and the rest optional.
/// With `$optional`, listed properties are optional and the rest required.
/// With neither, every property is required. Directive keys never become
/// properties themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredDirectives;

impl ObjectStrategy for RequiredDirectives {
    fn build(&self, object: &InstanceMap, default: &ObjectDefault<'_>) -> Result<SchemaNode> {
        let required = directive_keys(object, REQUIRED_DIRECTIVE);
        let optional = directive_keys(object, OPTIONAL_DIRECTIVE);
        if required.is_some() && optional.is_some() {
            return Err(Error::BothRequiredAndOptionalSpecified);
        }

        let members: InstanceMap = object
            .iter()
            .filter(|(key, _)| {
                key.as_str() != REQUIRED_DIRECTIVE && key.as_str() != OPTIONAL_DIRECTIVE
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        default.build_with(&members, &|key| {
            Some(match (&required, &optional) {
                (Some(listed), _) => listed.iter().any(|k| *k == key),
                (None, Some(listed)) => !listed.iter().any(|k| *k == key),
                (None, None) => true,
            })
        })
    }
}

fn directive_keys<'a>(object: &'a InstanceMap, directive: &str) -> Option<Vec<&'a str>> {
    let listed = object.get(directive)?.as_array()?;
    Some(listed.iter().filter_map(Instance::as_str).collect())
}
