//! JSON to Parquet conversion
//!
//! Everything heavy happens inside the engine; the converter builds the
//! statements and keeps scratch tables scoped.

use crate::engine::{Engine, ScratchTable};
use crate::error::{Result, ResultExt};
use crate::params::{ReadParams, WriteParams};
use crate::schema::{self, ColumnDesc, TableDesc};
use crate::sql::quote_literal;
use std::time::Instant;

/// Base name of the table JSON is imported into before flattening
const IMPORT_TABLE: &str = "json_import";

/// `COPY (<query>) TO '<dest>' (<options>)`
fn copy_to(query: &str, dest: &str, write: &WriteParams) -> String {
    format!("COPY ({query}) TO {} {}", quote_literal(dest), write.params())
}

/// SQL for a plain JSON to Parquet conversion
pub fn copy_statement(source: &str, dest: &str, write: &WriteParams, read: &ReadParams) -> String {
    copy_to(
        &format!("SELECT * FROM {}", read.read_json(source)),
        dest,
        write,
    )
}

/// Converts JSON files through an [`Engine`]
pub struct Converter<E: Engine> {
    engine: E,
}

impl<E: Engine> Converter<E> {
    /// Create a converter over an engine handle
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// The engine this converter drives
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Convert `source` (a file or glob) into Parquet at `dest`
    pub fn json_to_parquet(
        &self,
        source: &str,
        dest: &str,
        write: &WriteParams,
        read: &ReadParams,
    ) -> Result<()> {
        tracing::info!("Converting {} to {}", source, dest);
        let start = Instant::now();

        self.engine
            .execute(&copy_statement(source, dest, write, read))?;

        tracing::info!(
            "Wrote {} in {}ms",
            dest,
            start.elapsed().as_millis()
        );
        Ok(())
    }

    /// Convert `source` into Parquet at `dest` with every struct column
    /// flattened into top-level columns
    pub fn json_to_flattened_parquet(
        &self,
        source: &str,
        dest: &str,
        write: &WriteParams,
        read: &ReadParams,
    ) -> Result<()> {
        tracing::info!("Converting {} to {} (flattened)", source, dest);
        let start = Instant::now();

        let table = self.import_json(source, read)?;

        let select = schema::flattened_select(&self.engine, table.name())
            .with_context(|| format!("failed building flattened select for {source}"))?;
        self.engine.execute(&copy_to(&select, dest, write))?;

        table.release()?;

        tracing::info!(
            "Wrote {} in {}ms",
            dest,
            start.elapsed().as_millis()
        );
        Ok(())
    }

    /// Schema the engine infers for `source`
    pub fn describe_json(&self, source: &str, read: &ReadParams) -> Result<TableDesc> {
        self.engine
            .describe(&format!("SELECT * FROM {}", read.read_json(source)))
            .with_context(|| format!("failed describing {source}"))
    }

    /// Schema of `source` after flattening every struct column
    pub fn describe_json_flattened(
        &self,
        source: &str,
        read: &ReadParams,
    ) -> Result<TableDesc> {
        let table_desc = self.describe_json(source, read)?;
        let columns = schema::flatten_columns(&self.engine, &table_desc)?;
        Ok(TableDesc::new(columns))
    }

    /// Flatten a single struct column
    pub fn flatten_struct_column(&self, column: &ColumnDesc) -> Result<Vec<ColumnDesc>> {
        schema::flatten_struct_column(&self.engine, column)
    }

    /// Flattened projection over an existing table
    pub fn flattened_select(&self, table: &str) -> Result<String> {
        schema::flattened_select(&self.engine, table)
    }

    /// Describe a table name or query
    pub fn table_desc(&self, relation: &str) -> Result<TableDesc> {
        self.engine.describe(relation)
    }

    fn import_json(&self, source: &str, read: &ReadParams) -> Result<ScratchTable<'_, E>> {
        ScratchTable::create(
            &self.engine,
            IMPORT_TABLE,
            &format!("AS SELECT * FROM {}", read.read_json(source)),
        )
        .with_context(|| format!("failed importing {source}"))
    }
}
