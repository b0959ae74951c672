//! Error types for to-json-schema
//!
//! Every fallible operation in the crate returns `Result<T, Error>` where
//! Error is defined here. Inference failures are fatal: no partial schema
//! is ever returned alongside an error.

use thiserror::Error;

/// The main error type for to-json-schema
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Inference Errors
    // ============================================================================
    #[error("Type of value couldn't be determined")]
    TypeIndeterminate,

    #[error("Invalid schema, incompatible array items")]
    IncompatibleArrayItems,

    #[error("Defining both '$required' and '$optional' fields is not allowed")]
    BothRequiredAndOptionalSpecified,

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Unknown array mode: {mode}")]
    UnknownArrayMode { mode: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors (command-line host only)
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unknown array mode error
    pub fn unknown_array_mode(mode: impl Into<String>) -> Self {
        Self::UnknownArrayMode { mode: mode.into() }
    }

    /// Check if this error was caused by the options rather than the input value
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownArrayMode { .. }
                | Error::Config { .. }
                | Error::YamlParse(_)
                | Error::JsonParse(_)
        )
    }
}

/// Result type alias for to-json-schema
pub type Result<T> = std::result::Result<T, Error>;
