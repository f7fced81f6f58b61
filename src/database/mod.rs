//! DuckDB engine
//!
//! The embedded engine that does all JSON reading, type inference and
//! Parquet writing. This module only hands it SQL.

mod engine;

pub use engine::DuckDbEngine;
