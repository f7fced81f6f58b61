//! Schema module
//!
//! Column descriptions reported by the engine and struct flattening.
//!
//! # Features
//!
//! - **Type Model**: `ColumnType`, `ColumnDesc`, `TableDesc`
//! - **Struct Flattening**: nested struct fields promoted to top-level columns
//! - **Flattened Projection**: a `SELECT` that writes a table with all
//!   structs flattened

mod flatten;
mod types;

pub use flatten::{flatten_columns, flatten_struct_column, flattened_select};
pub use types::{ColumnDesc, ColumnType, TableDesc};
