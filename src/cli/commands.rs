//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Infer JSON schemas from JSON documents
#[derive(Parser, Debug)]
#[command(name = "to-json-schema")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Options file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long, global = true)]
    pub options: Option<PathBuf>,

    /// Inline options JSON
    #[arg(long, global = true)]
    pub options_json: Option<String>,

    /// Array mode (all, first, uniform, tuple); overrides the options
    #[arg(short, long, global = true)]
    pub mode: Option<String>,

    /// Mark every node required
    #[arg(short, long, global = true)]
    pub required: bool,

    /// Honour `$required` / `$optional` keys in objects
    #[arg(long, global = true)]
    pub directives: bool,

    /// Print compact JSON instead of pretty JSON
    #[arg(long, global = true)]
    pub compact: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer the schema of a JSON document
    Infer {
        /// Input document (stdin when omitted)
        input: Option<PathBuf>,
    },

    /// Compute the least common schema of two schema documents
    Unify {
        /// First schema
        first: PathBuf,

        /// Second schema
        second: PathBuf,
    },

    /// List the string formats that can be detected
    Formats,
}
