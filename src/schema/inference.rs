//! Schema inference from instances

use super::strategy::{ObjectDefault, RequiredDefault, StringDefault};
use super::types::{Items, SchemaNode};
use super::unify::unify;
use crate::classify::{
    classify, common_type, is_forward_only, matches_format, FormatMatcher, SemanticType,
    StandardFormats,
};
use crate::config::{ArrayMode, InferOptions};
use crate::error::{Error, Result};
use crate::types::{Instance, InstanceMap};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Recursive schema builder for one inference call
///
/// Holds the options and format catalogue read-only for the whole descent.
/// The array mode is parsed on construction, so a bad mode fails before any
/// value is visited.
pub struct SchemaBuilder<'a> {
    options: &'a InferOptions,
    mode: ArrayMode,
    formats: &'a dyn FormatMatcher,
}

impl<'a> SchemaBuilder<'a> {
    /// Create a builder using the standard format catalogue
    pub fn new(options: &'a InferOptions) -> Result<Self> {
        Self::with_formats(options, &StandardFormats)
    }

    /// Create a builder with a custom format catalogue
    pub fn with_formats(options: &'a InferOptions, formats: &'a dyn FormatMatcher) -> Result<Self> {
        let mode = options.array_mode()?;
        Ok(Self {
            options,
            mode,
            formats,
        })
    }

    /// The array mode in effect
    pub fn mode(&self) -> ArrayMode {
        self.mode
    }

    /// Infer the schema of a value
    pub fn build(&self, value: &Instance) -> Result<SchemaNode> {
        self.build_node(value, None)
    }

    /// Infer the schema of a value with an explicit required decision
    ///
    /// `required_override` of `None` leaves the decision to the required
    /// policy.
    pub fn build_node(&self, value: &Instance, required_override: Option<bool>) -> Result<SchemaNode> {
        let schema_type = classify(value).ok_or(Error::TypeIndeterminate)?;

        let schema = match value {
            Instance::Schema(schema) => return Ok(schema.clone()),
            Instance::Object(object) => self.object_schema(object)?,
            Instance::Array(items) => self.array_schema(items)?,
            Instance::String(s) => self.string_schema(s),
            _ => SchemaNode::new(schema_type),
        };

        let mut schema = self.apply_required(schema, value, required_override);

        if schema.is_type(SemanticType::Object)
            && !self.options.objects.additional_properties
            && schema.has_properties()
        {
            schema.additional_properties = Some(false);
        }

        Ok(schema)
    }

    fn apply_required(
        &self,
        schema: SchemaNode,
        value: &Instance,
        required_override: Option<bool>,
    ) -> SchemaNode {
        let default = RequiredDefault {
            required_override,
            required: self.options.required,
        };
        match &self.options.objects.require_override {
            Some(strategy) => strategy.apply(schema, value, &default),
            None => default.apply(schema),
        }
    }

    // ========================================================================
    // Objects
    // ========================================================================

    fn object_schema(&self, object: &InstanceMap) -> Result<SchemaNode> {
        let default = ObjectDefault { builder: self };
        match &self.options.objects.custom {
            Some(strategy) => strategy.build(object, &default),
            None => default.build(object),
        }
    }

    pub(crate) fn default_object_schema(
        &self,
        object: &InstanceMap,
        required_for: &dyn Fn(&str) -> Option<bool>,
    ) -> Result<SchemaNode> {
        let mut properties = BTreeMap::new();
        for (key, value) in object {
            let property = self.build_node(value, required_for(key))?;
            properties.insert(key.clone(), property);
        }
        Ok(SchemaNode::object(properties))
    }

    // ========================================================================
    // Arrays
    // ========================================================================

    fn array_schema(&self, items: &[Instance]) -> Result<SchemaNode> {
        let Some(first) = items.first() else {
            return Ok(SchemaNode::new(SemanticType::Array));
        };
        trace!(mode = %self.mode, len = items.len(), "building array schema");

        let items = match self.mode {
            ArrayMode::First => Some(Items::single(self.build_node(first, None)?)),
            ArrayMode::Uniform => {
                let schema = self.build_node(first, None)?;
                for item in &items[1..] {
                    if self.build_node(item, None)? != schema {
                        return Err(Error::IncompatibleArrayItems);
                    }
                }
                Some(Items::single(schema))
            }
            ArrayMode::Tuple => {
                let schemas = items
                    .iter()
                    .map(|item| self.build_node(item, None))
                    .collect::<Result<Vec<_>>>()?;
                Some(Items::Tuple(schemas))
            }
            ArrayMode::All => self.merged_item_schema(items)?.map(Items::single),
        };

        Ok(SchemaNode::array_of(items))
    }

    /// Least common schema of all elements, or `None` when there is none
    fn merged_item_schema(&self, items: &[Instance]) -> Result<Option<SchemaNode>> {
        if let Some(numeric) = common_type(items).filter(|t| t.is_numeric()) {
            let schema = SchemaNode::new(numeric);
            return Ok(Some(if self.options.required {
                schema.with_required(true)
            } else {
                schema
            }));
        }

        let schemas = items
            .iter()
            .map(|item| self.build_node(item, None))
            .collect::<Result<Vec<_>>>()?;
        let Some(seed) = schemas.last().cloned() else {
            return Ok(None);
        };

        let merged = schemas
            .iter()
            .try_fold(seed, |acc, schema| unify(&acc, schema));
        if merged.is_none() {
            debug!(len = items.len(), "array items have no common schema, omitting items");
        }
        Ok(merged)
    }

    // ========================================================================
    // Strings
    // ========================================================================

    fn string_schema(&self, value: &str) -> SchemaNode {
        let default = StringDefault {
            detect_format: self.options.strings.detect_format,
            formats: self.formats,
        };
        match &self.options.strings.custom {
            Some(strategy) => strategy.build(value, &default),
            None => default.build(value),
        }
    }
}

/// Find the format of a string
///
/// A string that equals a format name gets that format, including
/// forward-only formats. Otherwise the first format whose matcher accepts
/// the content wins, skipping forward-only formats.
pub fn detect_format(formats: &dyn FormatMatcher, value: &str) -> Option<&'static str> {
    let catalogue = formats.formats();
    if let Some(name) = catalogue.iter().find(|name| **name == value) {
        return Some(*name);
    }
    let detected = catalogue
        .iter()
        .filter(|name| !is_forward_only(name))
        .find(|name| matches_format(formats, value, name))
        .copied();
    if let Some(name) = detected {
        trace!(format = name, "detected string format");
    }
    detected
}

// ============================================================================
// Entry points
// ============================================================================

/// Infer a schema with default options
pub fn infer_schema(value: &Instance) -> Result<SchemaNode> {
    infer_schema_with(value, &InferOptions::default())
}

/// Infer a schema with the given options
pub fn infer_schema_with(value: &Instance, options: &InferOptions) -> Result<SchemaNode> {
    SchemaBuilder::new(options)?.build(value)
}

/// Infer a schema with the given options and format catalogue
pub fn infer_schema_with_formats(
    value: &Instance,
    options: &InferOptions,
    formats: &dyn FormatMatcher,
) -> Result<SchemaNode> {
    SchemaBuilder::with_formats(options, formats)?.build(value)
}

/// Infer a schema for a JSON document
pub fn infer_json_schema(value: &serde_json::Value, options: &InferOptions) -> Result<SchemaNode> {
    infer_schema_with(&Instance::from(value), options)
}
