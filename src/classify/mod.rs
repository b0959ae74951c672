//! Value classification module
//!
//! Maps input values to the semantic types written into a schema's `type`
//! keyword, and answers string-format questions through a pluggable
//! catalogue.
//!
//! # Features
//!
//! - **Fixed priority**: `integer` is tested before `number`, so integral
//!   values never classify as `number`
//! - **Format catalogue**: [`FormatMatcher`] trait with the built-in
//!   [`StandardFormats`]
//! - **Forward-only formats**: formats that are assigned by literal name only

mod formats;
mod types;

pub use formats::{is_forward_only, FormatMatcher, StandardFormats, FORWARD_ONLY_FORMATS};
pub use types::{classify, common_type, SemanticType};

/// Check whether a string matches a named format in the given catalogue
pub fn matches_format(matcher: &dyn FormatMatcher, value: &str, name: &str) -> bool {
    matcher.is_format(value, name)
}

#[cfg(test)]
mod tests;
