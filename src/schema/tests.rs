//! Schema inference and unification tests

use super::*;
use crate::classify::{FormatMatcher, SemanticType};
use crate::config::{ArrayMode, InferOptions};
use crate::error::Error;
use crate::types::Instance;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn node(value: Value) -> SchemaNode {
    serde_json::from_value(value).unwrap()
}

fn unify_json(a: Value, b: Value) -> Option<Value> {
    unify(&node(a), &node(b)).map(|s| s.to_json())
}

/// Unify both ways and check the results agree
fn unify_both(a: Value, b: Value) -> Option<Value> {
    let forward = unify_json(a.clone(), b.clone());
    let backward = unify_json(b, a);
    assert_eq!(forward, backward, "unify is not commutative");
    forward
}

// ============================================================================
// Schema node
// ============================================================================

#[test]
fn test_node_serialization_omits_absent_keys() {
    let schema = SchemaNode::new(SemanticType::Integer);
    assert_eq!(schema.to_json(), json!({"type": "integer"}));

    let schema = SchemaNode::array(SchemaNode::new(SemanticType::String)).with_required(true);
    assert_eq!(
        schema.to_json(),
        json!({"type": "array", "items": {"type": "string"}, "required": true})
    );
}

#[test]
fn test_node_tuple_items_round_trip() {
    let schema = node(json!({"type": "array", "items": [{"type": "integer"}, {"type": "string"}]}));
    match &schema.items {
        Some(Items::Tuple(items)) => assert_eq!(items.len(), 2),
        other => panic!("expected tuple items, got {other:?}"),
    }

    let schema = node(json!({"type": "array", "items": {"type": "integer"}}));
    assert_eq!(
        schema.items.as_ref().and_then(Items::as_single),
        Some(&SchemaNode::new(SemanticType::Integer))
    );
}

#[test]
fn test_node_keys() {
    let schema = node(json!({"type": "object", "properties": {"a": {"type": "null"}}, "required": true}));
    let keys: Vec<_> = schema.keys().into_iter().collect();
    assert_eq!(
        keys,
        vec![SchemaKey::Type, SchemaKey::Properties, SchemaKey::Required]
    );
}

#[test]
fn test_node_keeps_unmodelled_keywords() {
    let raw = json!({
        "type": "any",
        "enum": ["x", "y"],
        "properties": {"a": {"type": "integer", "minimum": 0}},
        "additionalProperties": {"type": "string"}
    });
    let schema = node(raw.clone());
    assert_eq!(schema.schema_type, None);
    assert_eq!(schema.additional_properties, None);
    assert_eq!(schema.to_json(), raw);

    let keys: Vec<_> = schema.keys().into_iter().collect();
    assert_eq!(
        keys,
        vec![
            SchemaKey::Properties,
            SchemaKey::Other("additionalProperties".to_string()),
            SchemaKey::Other("enum".to_string()),
            SchemaKey::Other("type".to_string()),
        ]
    );
}

#[test]
fn test_node_object_constructor_drops_empty_properties() {
    let schema = SchemaNode::object(Default::default());
    assert_eq!(schema.to_json(), json!({"type": "object"}));
    assert!(!schema.has_properties());
}

// ============================================================================
// Unify
// ============================================================================

#[test]
fn test_unify_identical() {
    let schemas = [
        json!({"type": "integer"}),
        json!({"type": "string", "format": "email", "required": true}),
        json!({"type": "array", "items": {"type": "number"}}),
        json!({"type": "array", "items": [{"type": "number"}, {"type": "null"}]}),
        json!({
            "type": "object",
            "properties": {
                "id": {"type": "integer", "required": true},
                "tags": {"type": "array", "items": {"type": "string"}}
            },
            "additionalProperties": false
        }),
    ];
    for schema in schemas {
        assert_eq!(unify_json(schema.clone(), schema.clone()), Some(schema));
    }
}

#[test]
fn test_unify_integer_number() {
    assert_eq!(
        unify_both(json!({"type": "integer"}), json!({"type": "number"})),
        Some(json!({"type": "number"}))
    );
}

#[test]
fn test_unify_type_mismatch() {
    assert_eq!(
        unify_both(json!({"type": "boolean"}), json!({"type": "integer"})),
        None
    );
    assert_eq!(
        unify_both(json!({"type": "string"}), json!({"type": "null"})),
        None
    );
}

#[test]
fn test_unify_array_items_missing_in_one() {
    let without = json!({"type": "array", "required": true});
    let with = json!({"type": "array", "items": {"type": "number"}, "required": true});
    assert_eq!(unify_both(without.clone(), with), Some(without));

    assert_eq!(
        unify_both(
            json!({"type": "array", "items": {"type": "number"}}),
            json!({"type": "array"})
        ),
        Some(json!({"type": "array"}))
    );
}

#[test]
fn test_unify_array_items_missing_with_required_difference() {
    assert_eq!(
        unify_both(
            json!({"type": "array", "required": false}),
            json!({"type": "array", "items": {"type": "number"}, "required": true})
        ),
        None
    );
}

#[test]
fn test_unify_array_items_widen() {
    assert_eq!(
        unify_both(
            json!({"type": "array", "items": {"type": "integer"}}),
            json!({"type": "array", "items": {"type": "number"}})
        ),
        Some(json!({"type": "array", "items": {"type": "number"}}))
    );
}

#[test]
fn test_unify_array_items_incompatible_drops_items() {
    assert_eq!(
        unify_both(
            json!({"type": "array", "items": {"type": "string"}}),
            json!({"type": "array", "items": {"type": "number"}})
        ),
        Some(json!({"type": "array"}))
    );
}

#[test]
fn test_unify_tuple_items() {
    assert_eq!(
        unify_both(
            json!({"type": "array", "items": [{"type": "integer"}, {"type": "string"}]}),
            json!({"type": "array", "items": [{"type": "number"}, {"type": "string"}]})
        ),
        Some(json!({"type": "array", "items": [{"type": "number"}, {"type": "string"}]}))
    );

    // Different lengths cannot be positionally merged
    assert_eq!(
        unify_both(
            json!({"type": "array", "items": [{"type": "integer"}]}),
            json!({"type": "array", "items": [{"type": "integer"}, {"type": "integer"}]})
        ),
        Some(json!({"type": "array"}))
    );

    assert_eq!(
        unify_both(
            json!({"type": "array", "items": [{"type": "integer"}]}),
            json!({"type": "array", "items": {"type": "integer"}})
        ),
        Some(json!({"type": "array"}))
    );
}

#[test]
fn test_unify_nested_array_items_missing() {
    let without = json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer", "required": true},
            "a": {"type": "array", "required": true}
        }
    });
    let with = json!({
        "type": "object",
        "properties": {
            "id": {"type": "integer", "required": true},
            "a": {"type": "array", "items": {"type": "number"}, "required": true}
        }
    });
    assert_eq!(unify_both(without.clone(), with), Some(without));
}

#[test]
fn test_unify_objects_with_different_properties() {
    assert_eq!(
        unify_both(
            json!({"type": "object", "properties": {"a": {"type": "integer"}}}),
            json!({"type": "object", "properties": {"b": {"type": "integer"}}})
        ),
        Some(json!({"type": "object"}))
    );
}

#[test]
fn test_unify_objects_with_different_property_types() {
    assert_eq!(
        unify_both(
            json!({"type": "object", "properties": {"test": {"type": "boolean", "required": true}}}),
            json!({"type": "object", "properties": {"test": {"type": "integer", "required": true}}})
        ),
        Some(json!({"type": "object"}))
    );
}

#[test]
fn test_unify_objects_with_different_required_values() {
    assert_eq!(
        unify_both(
            json!({"type": "object", "properties": {"test": {"type": "integer", "required": true}}}),
            json!({"type": "object", "properties": {"test": {"type": "integer", "required": false}}})
        ),
        Some(json!({"type": "object"}))
    );
}

#[test]
fn test_unify_objects_with_and_without_properties() {
    assert_eq!(
        unify_both(
            json!({"type": "object", "properties": {"test": {"type": "number", "required": true}}}),
            json!({"type": "object"})
        ),
        Some(json!({"type": "object"}))
    );
}

#[test]
fn test_unify_scalar_keywords_must_match() {
    assert_eq!(
        unify_both(
            json!({"type": "string", "format": "email"}),
            json!({"type": "string", "format": "uri"})
        ),
        None
    );
    assert_eq!(
        unify_both(
            json!({"type": "integer", "required": true}),
            json!({"type": "integer", "required": false})
        ),
        None
    );
    // Different keyword sets on non-containers are incompatible
    assert_eq!(
        unify_both(json!({"type": "string", "format": "email"}), json!({"type": "string"})),
        None
    );
}

#[test]
fn test_unify_unmodelled_keywords_must_match() {
    let with_enum = json!({"type": "string", "enum": ["x"]});
    assert_eq!(
        unify_both(with_enum.clone(), with_enum.clone()),
        Some(with_enum.clone())
    );
    assert_eq!(unify_both(with_enum.clone(), json!({"type": "string", "enum": ["y"]})), None);
    assert_eq!(unify_both(with_enum, json!({"type": "string"})), None);

    assert_eq!(
        unify_both(
            json!({"type": "object", "properties": {"a": {"type": "integer", "minimum": 0}}}),
            json!({"type": "object", "properties": {"a": {"type": "number", "minimum": 0}}})
        ),
        Some(json!({"type": "object", "properties": {"a": {"type": "number", "minimum": 0}}}))
    );
}

#[test]
fn test_unify_does_not_modify_inputs() {
    let a = node(json!({"type": "array", "items": {"type": "integer"}}));
    let b = node(json!({"type": "array", "items": {"type": "number"}}));
    let (a_before, b_before) = (a.clone(), b.clone());
    let _ = unify(&a, &b);
    assert_eq!(a, a_before);
    assert_eq!(b, b_before);
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_builder_rejects_unknown_mode_before_traversal() {
    let mut options = InferOptions::default();
    options.arrays.mode = "merge".to_string();
    let result = SchemaBuilder::new(&options);
    assert!(matches!(result, Err(Error::UnknownArrayMode { ref mode }) if mode == "merge"));
}

#[test]
fn test_builder_reports_mode() {
    let options = InferOptions::default().with_array_mode(ArrayMode::Tuple);
    let builder = SchemaBuilder::new(&options).unwrap();
    assert_eq!(builder.mode(), ArrayMode::Tuple);
}

#[test]
fn test_build_node_required_override() {
    let options = InferOptions::default();
    let builder = SchemaBuilder::new(&options).unwrap();
    let value = Instance::from(1);

    assert_eq!(
        builder.build_node(&value, Some(false)).unwrap().to_json(),
        json!({"type": "integer", "required": false})
    );
    assert_eq!(
        builder.build_node(&value, Some(true)).unwrap().to_json(),
        json!({"type": "integer", "required": true})
    );
    assert_eq!(
        builder.build_node(&value, None).unwrap().to_json(),
        json!({"type": "integer"})
    );
}

#[test]
fn test_build_override_beats_global_required() {
    let options = InferOptions::default().with_required(true);
    let builder = SchemaBuilder::new(&options).unwrap();
    assert_eq!(
        builder.build_node(&Instance::Null, Some(false)).unwrap().to_json(),
        json!({"type": "null", "required": false})
    );
}

#[test]
fn test_build_undefined_nested_in_array() {
    let value = Instance::Array(vec![Instance::from(1), Instance::Undefined]);
    for mode in [ArrayMode::All, ArrayMode::Tuple, ArrayMode::Uniform] {
        let options = InferOptions::default().with_array_mode(mode);
        let err = infer_schema_with(&value, &options).unwrap_err();
        assert!(matches!(err, Error::TypeIndeterminate), "mode {mode}");
    }

    // First mode never inspects the later elements
    let options = InferOptions::default().with_array_mode(ArrayMode::First);
    assert!(infer_schema_with(&value, &options).is_ok());
}

#[test]
fn test_detect_format_literal_name_wins() {
    let formats = crate::classify::StandardFormats;
    assert_eq!(detect_format(&formats, "color"), Some("color"));
    assert_eq!(detect_format(&formats, "hostname"), Some("hostname"));
    assert_eq!(detect_format(&formats, "red"), Some("color"));
    // Forward-only formats are never content-sniffed
    assert_eq!(detect_format(&formats, "localhost"), None);
    assert_eq!(detect_format(&formats, "john"), None);
}

/// Catalogue with one non-standard format and a forward-only name
#[derive(Debug)]
struct PostalFormats;

impl FormatMatcher for PostalFormats {
    fn formats(&self) -> &[&'static str] {
        &["zip", "hostname", "digits"]
    }

    fn is_format(&self, value: &str, name: &str) -> bool {
        let all_digits = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
        match name {
            "zip" => all_digits && value.len() == 5,
            "digits" => all_digits,
            "hostname" => true,
            _ => false,
        }
    }
}

#[test]
fn test_custom_format_catalogue() {
    let options = InferOptions::default();
    let infer = |value: &str| {
        infer_schema_with_formats(&Instance::from(value), &options, &PostalFormats)
            .unwrap()
            .to_json()
    };

    // Catalogue order decides between overlapping formats
    assert_eq!(infer("12345"), json!({"type": "string", "format": "zip"}));
    assert_eq!(infer("123"), json!({"type": "string", "format": "digits"}));
    // Forward-only names are not content-sniffed, even when the matcher accepts
    assert_eq!(infer("abc"), json!({"type": "string"}));
    assert_eq!(infer("hostname"), json!({"type": "string", "format": "hostname"}));
    // Standard formats are not consulted
    assert_eq!(infer("obama@whitehouse.gov"), json!({"type": "string"}));
}

#[test]
fn test_custom_format_catalogue_with_builder() {
    let options = InferOptions::default().with_array_mode(ArrayMode::Tuple);
    let builder = SchemaBuilder::with_formats(&options, &PostalFormats).unwrap();
    let schema = builder.build(&Instance::array(["12345", "zip"])).unwrap();
    assert_eq!(
        schema.to_json(),
        json!({
            "type": "array",
            "items": [
                {"type": "string", "format": "zip"},
                {"type": "string", "format": "zip"}
            ]
        })
    );
}
