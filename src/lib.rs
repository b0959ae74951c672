// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::float_cmp)]

//! # to-json-schema
//!
//! Infers a JSON Schema describing the shape of an in-memory value and,
//! for collections of similar values, the least common schema that still
//! validates all of them.
//!
//! ## Features
//!
//! - **Type Inference**: `integer`, `number`, `string`, `array`, `object`,
//!   `boolean`, `null` and `date` values
//! - **Array Modes**: merge all items, take the first, demand uniform items,
//!   or keep positional tuple schemas
//! - **Schema Unification**: least upper bound of two schemas, widening
//!   `integer` to `number` and degrading to bare containers where needed
//! - **Format Detection**: `date-time`, `email`, `uri`, `color`, ... from a
//!   pluggable catalogue
//! - **Strategies**: override string, object and required handling while
//!   keeping the default as a continuation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use to_json_schema::{infer_schema_with, ArrayMode, InferOptions, Instance, Result};
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let value = Instance::from(json!({"id": 11, "scores": [1, 2.5]}));
//!     let options = InferOptions::default().with_array_mode(ArrayMode::All);
//!
//!     let schema = infer_schema_with(&value, &options)?;
//!     // {"type":"object","properties":{"id":{"type":"integer"},
//!     //  "scores":{"type":"array","items":{"type":"number"}}}}
//!     println!("{}", schema.to_json());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │          infer_schema_with(value, options) → SchemaNode     │
//! └─────────────────────────────┬──────────────────────────────┘
//!                               │
//! ┌──────────────┬──────────────┴─────────────┬───────────────┐
//! │   classify   │        SchemaBuilder       │     unify     │
//! ├──────────────┼────────────────────────────┼───────────────┤
//! │ SemanticType │ objects / arrays / strings │ key-by-key    │
//! │ FormatMatcher│ strategies + continuations │ lossy joins   │
//! └──────────────┴────────────────────────────┴───────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Input value model
pub mod types;

/// Value classification and string formats
pub mod classify;

/// Inference options
pub mod config;

/// Schema inference and unification
pub mod schema;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use classify::{classify, FormatMatcher, SemanticType, StandardFormats};
pub use config::{ArrayMode, InferOptions};
pub use schema::{
    infer_json_schema, infer_schema, infer_schema_with, infer_schema_with_formats, unify, Items,
    RequiredDirectives, SchemaBuilder, SchemaNode,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
