//! CLI module
//!
//! Command-line interface for converting JSON files.
//!
//! # Commands
//!
//! - `json2parquet` - Convert JSON files to Parquet
//! - `describe` - Print the schema the engine infers for JSON files

mod commands;
mod runner;

pub use commands::{Cli, Commands, JsonArgs, OutputFormat, ParquetArgs};
pub use runner::Runner;
