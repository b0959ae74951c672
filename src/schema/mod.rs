//! Schema inference module
//!
//! Provides JSON schema inference from in-memory values.
//!
//! # Features
//!
//! - **Type Inference**: Infers semantic types from values
//! - **Array Modes**: `all` (merge), `first`, `uniform` and `tuple` item handling
//! - **Schema Unification**: Computes the least common schema of two schemas
//! - **Format Detection**: Attaches string formats from a pluggable catalogue
//! - **Strategies**: Overridable string, object and required policies
//! - **Schema Splicing**: Pre-built schema fragments are used verbatim

mod inference;
mod strategy;
mod types;
mod unify;

pub use inference::{
    detect_format, infer_json_schema, infer_schema, infer_schema_with, infer_schema_with_formats,
    SchemaBuilder,
};
pub use strategy::{
    ObjectDefault, ObjectStrategy, RequiredDefault, RequiredDirectives, RequiredStrategy,
    StringDefault, StringStrategy, OPTIONAL_DIRECTIVE, REQUIRED_DIRECTIVE,
};
pub use types::{Items, SchemaKey, SchemaNode};
pub use unify::unify;

#[cfg(test)]
mod tests;
