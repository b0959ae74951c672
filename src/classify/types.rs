//! Semantic types and value classification

use crate::types::Instance;
use serde::{Deserialize, Serialize};

/// Semantic type of a value, as written to a schema's `type` keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Integer,
    Number,
    String,
    Array,
    Object,
    Boolean,
    Null,
    Date,
}

impl SemanticType {
    /// Classification order. `Integer` must precede `Number`.
    pub const ORDER: [SemanticType; 8] = [
        SemanticType::Integer,
        SemanticType::Number,
        SemanticType::String,
        SemanticType::Array,
        SemanticType::Object,
        SemanticType::Boolean,
        SemanticType::Null,
        SemanticType::Date,
    ];

    /// Check whether a value belongs to this type
    pub fn matches(self, value: &Instance) -> bool {
        match self {
            SemanticType::Integer => match value {
                Instance::Integer(_) => true,
                Instance::Number(n) => n.is_finite() && n.fract() == 0.0,
                _ => false,
            },
            SemanticType::Number => matches!(value, Instance::Integer(_) | Instance::Number(_)),
            SemanticType::String => matches!(value, Instance::String(_)),
            SemanticType::Array => matches!(value, Instance::Array(_)),
            SemanticType::Object => matches!(value, Instance::Object(_) | Instance::Schema(_)),
            SemanticType::Boolean => matches!(value, Instance::Bool(_)),
            SemanticType::Null => matches!(value, Instance::Null),
            SemanticType::Date => matches!(value, Instance::Date(_)),
        }
    }

    /// Check if this is `integer` or `number`
    pub fn is_numeric(self) -> bool {
        matches!(self, SemanticType::Integer | SemanticType::Number)
    }

    /// Widen two types to a common one. Only integer/number differ compatibly.
    pub fn widen(self, other: SemanticType) -> Option<SemanticType> {
        match (self, other) {
            (a, b) if a == b => Some(a),
            (SemanticType::Integer, SemanticType::Number)
            | (SemanticType::Number, SemanticType::Integer) => Some(SemanticType::Number),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SemanticType::Integer => "integer",
            SemanticType::Number => "number",
            SemanticType::String => "string",
            SemanticType::Array => "array",
            SemanticType::Object => "object",
            SemanticType::Boolean => "boolean",
            SemanticType::Null => "null",
            SemanticType::Date => "date",
        }
    }
}

impl std::fmt::Display for SemanticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a value into the first semantic type it matches
///
/// Returns `None` only for values with no representable kind
/// ([`Instance::Undefined`]).
pub fn classify(value: &Instance) -> Option<SemanticType> {
    SemanticType::ORDER
        .into_iter()
        .find(|semantic_type| semantic_type.matches(value))
}

/// Find the type shared by all values, widening integer/number to number
///
/// Returns `None` when the slice is empty, a value is unclassifiable, or two
/// values have incompatible types.
pub fn common_type<'a, I>(values: I) -> Option<SemanticType>
where
    I: IntoIterator<Item = &'a Instance>,
{
    let mut values = values.into_iter();
    let first = classify(values.next()?)?;
    values.try_fold(first, |acc, value| acc.widen(classify(value)?))
}
