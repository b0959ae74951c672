//! CLI module
//!
//! Command-line host for the inference library. All file and stdin I/O
//! lives here; the library modules never touch the filesystem.
//!
//! # Commands
//!
//! - `infer` - Infer the schema of a JSON document
//! - `unify` - Merge two schema documents
//! - `formats` - List detectable string formats

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
