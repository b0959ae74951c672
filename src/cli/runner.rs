//! CLI runner - executes commands

use crate::classify::{is_forward_only, FormatMatcher, StandardFormats};
use crate::cli::commands::{Cli, Commands};
use crate::config::{ArrayMode, InferOptions};
use crate::error::{Error, Result};
use crate::schema::{infer_schema_with, unify, RequiredDirectives, SchemaNode};
use crate::types::Instance;
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Infer { input } => {
                let document = match input {
                    Some(path) => fs::read_to_string(path)?,
                    None => {
                        let mut buffer = String::new();
                        std::io::stdin().read_to_string(&mut buffer)?;
                        buffer
                    }
                };
                let schema = self.infer_document(&document)?;
                println!("{}", self.render(&schema)?);
                Ok(())
            }
            Commands::Unify { first, second } => {
                let first = read_schema(first)?;
                let second = read_schema(second)?;
                match unify(&first, &second) {
                    Some(schema) => {
                        println!("{}", self.render(&schema)?);
                        Ok(())
                    }
                    None => Err(Error::config("schemas have no common schema")),
                }
            }
            Commands::Formats => {
                for name in StandardFormats.formats() {
                    if is_forward_only(name) {
                        println!("{name} (by name only)");
                    } else {
                        println!("{name}");
                    }
                }
                Ok(())
            }
        }
    }

    /// Infer the schema of a JSON document using the CLI options
    pub fn infer_document(&self, document: &str) -> Result<SchemaNode> {
        let options = self.options()?;
        let value: Value = serde_json::from_str(document)?;
        debug!(mode = %options.arrays.mode, required = options.required, "inferring schema");
        infer_schema_with(&Instance::from(value), &options)
    }

    /// Build inference options from files, inline JSON and flags
    pub fn options(&self) -> Result<InferOptions> {
        let mut options = if let Some(json) = &self.cli.options_json {
            InferOptions::from_json(json)?
        } else if let Some(path) = &self.cli.options {
            load_options(path)?
        } else {
            InferOptions::default()
        };

        if let Some(mode) = &self.cli.mode {
            options = options.with_array_mode(mode.parse::<ArrayMode>()?);
        }
        if self.cli.required {
            options = options.with_required(true);
        }
        if self.cli.directives {
            options = options.with_object_strategy(RequiredDirectives);
        }
        Ok(options)
    }

    fn render(&self, schema: &SchemaNode) -> Result<String> {
        if self.cli.compact {
            Ok(serde_json::to_string(schema)?)
        } else {
            Ok(schema.to_json_pretty())
        }
    }
}

fn load_options(path: &Path) -> Result<InferOptions> {
    let content = fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => InferOptions::from_yaml(&content),
        _ => InferOptions::from_json(&content),
    }
}

fn read_schema(path: &Path) -> Result<SchemaNode> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
