//! Schema unification
//!
//! Finds the most specific schema that both inputs describe. Incompatible
//! structure or types yield `None`, except for the lossy joins:
//!
//! - `integer` and `number` join to `number`
//! - two objects that cannot be merged join to a bare `{type: object}`
//! - two arrays whose item schemas cannot be merged join to a bare
//!   `{type: array}`
//!
//! Keywords outside the inferred set must be equal on both sides.

use super::types::{Items, SchemaKey, SchemaNode};
use crate::classify::SemanticType;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Unify two schemas into the least common schema, if one exists
///
/// Never modifies its inputs. `unify(s, s) == Some(s)` for every node.
pub fn unify(a: &SchemaNode, b: &SchemaNode) -> Option<SchemaNode> {
    let a_keys = a.keys();
    let b_keys = b.keys();
    if a_keys != b_keys {
        return unify_mismatched_keys(a, b, &a_keys, &b_keys);
    }

    let schema_type = match (a.schema_type, b.schema_type) {
        (Some(a_type), Some(b_type)) => Some(a_type.widen(b_type)?),
        _ => None,
    };

    let properties = match (&a.properties, &b.properties) {
        (Some(a_props), Some(b_props)) => match unify_properties(a_props, b_props) {
            Some(merged) => Some(merged),
            None => return degrade_to_object(a, b),
        },
        _ => None,
    };

    let items = match (&a.items, &b.items) {
        (Some(a_items), Some(b_items)) => match unify_items(a_items, b_items) {
            Some(merged) => Some(merged),
            None if either_is(a, b, SemanticType::Object) => {
                return degrade_to_object(a, b);
            }
            None if both_are(a, b, SemanticType::Array) => {
                debug!("array item schemas are incompatible, dropping items");
                None
            }
            None => return None,
        },
        _ => None,
    };

    if a.format != b.format
        || a.required != b.required
        || a.additional_properties != b.additional_properties
        || a.extra != b.extra
    {
        return None;
    }

    Some(SchemaNode {
        schema_type,
        properties,
        items,
        format: a.format.clone(),
        required: a.required,
        additional_properties: a.additional_properties,
        extra: a.extra.clone(),
    })
}

/// Join schemas whose keyword sets differ
fn unify_mismatched_keys(
    a: &SchemaNode,
    b: &SchemaNode,
    a_keys: &BTreeSet<SchemaKey>,
    b_keys: &BTreeSet<SchemaKey>,
) -> Option<SchemaNode> {
    if both_are(a, b, SemanticType::Array) {
        let only_items_differ = a_keys
            .symmetric_difference(b_keys)
            .eq([SchemaKey::Items].iter());
        if only_items_differ {
            let (without_items, with_items) = if a.items.is_none() { (a, b) } else { (b, a) };
            let stripped = SchemaNode {
                items: None,
                ..with_items.clone()
            };
            if *without_items == stripped {
                return Some(without_items.clone());
            }
        }
    }

    if both_are(a, b, SemanticType::Object) {
        debug!("object schemas have different keywords, joining to bare object");
        return Some(SchemaNode::new(SemanticType::Object));
    }

    None
}

/// Unify property maps. Both maps must name the same properties.
fn unify_properties(
    a: &BTreeMap<String, SchemaNode>,
    b: &BTreeMap<String, SchemaNode>,
) -> Option<BTreeMap<String, SchemaNode>> {
    if a.len() != b.len() {
        return None;
    }
    a.iter()
        .map(|(name, a_prop)| {
            let b_prop = b.get(name)?;
            Some((name.clone(), unify(a_prop, b_prop)?))
        })
        .collect()
}

fn unify_items(a: &Items, b: &Items) -> Option<Items> {
    match (a, b) {
        (Items::Single(a_schema), Items::Single(b_schema)) => {
            unify(a_schema, b_schema).map(Items::single)
        }
        (Items::Tuple(a_schemas), Items::Tuple(b_schemas)) if a_schemas.len() == b_schemas.len() => {
            a_schemas
                .iter()
                .zip(b_schemas)
                .map(|(a_schema, b_schema)| unify(a_schema, b_schema))
                .collect::<Option<Vec<_>>>()
                .map(Items::Tuple)
        }
        _ => None,
    }
}

fn degrade_to_object(a: &SchemaNode, b: &SchemaNode) -> Option<SchemaNode> {
    if either_is(a, b, SemanticType::Object) {
        debug!("object property schemas are incompatible, joining to bare object");
        Some(SchemaNode::new(SemanticType::Object))
    } else {
        None
    }
}

fn both_are(a: &SchemaNode, b: &SchemaNode, schema_type: SemanticType) -> bool {
    a.is_type(schema_type) && b.is_type(schema_type)
}

fn either_is(a: &SchemaNode, b: &SchemaNode, schema_type: SemanticType) -> bool {
    a.is_type(schema_type) || b.is_type(schema_type)
}
