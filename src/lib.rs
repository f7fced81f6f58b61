//! # Parquet Converter
//!
//! Converts JSON files to Apache Parquet files. Reading, type inference and
//! Parquet encoding all happen inside an embedded DuckDB engine; this crate
//! builds the SQL for it and flattens nested struct columns.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use parquet_converter::{Converter, DuckDbEngine, ReadParams, Result, WriteParams};
//!
//! fn main() -> Result<()> {
//!     let converter = Converter::new(DuckDbEngine::open_in_memory()?);
//!
//!     converter.json_to_parquet(
//!         "data/*.json",
//!         "data.parquet",
//!         &WriteParams::new(),
//!         &ReadParams::new(),
//!     )?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! CLI flags ──► ReadParams / WriteParams ──► SQL ──► Engine (DuckDB)
//!                              │
//!                              └─► Converter ──► schema::flatten ──► Engine
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// SQL quoting helpers
pub mod sql;

/// JSON read and Parquet write parameters
pub mod params;

/// Engine trait and scratch tables
pub mod engine;

/// DuckDB engine
pub mod database;

/// Column types and struct flattening
pub mod schema;

/// JSON to Parquet conversion
pub mod convert;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use convert::{copy_statement, Converter};
pub use database::DuckDbEngine;
pub use engine::Engine;
pub use error::{Error, Result};
pub use params::{ReadParams, WriteParams};
pub use schema::{ColumnDesc, ColumnType, TableDesc};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
