//! Parameter builder
//!
//! Typed configuration rendered into the SQL fragments DuckDB expects.
//!
//! # Overview
//!
//! - [`ReadParams`] renders a `read_json(...)` table function call
//! - [`WriteParams`] renders the option list of a `COPY ... TO ...` statement
//!
//! Nothing here validates option combinations; the engine rejects invalid ones.

mod read;
mod write;

pub use read::{parse_columns, JsonCompression, JsonFormat, ReadParams, Records};
pub use write::{HivePartitionConfig, ParquetCompression, WriteParams};
