//! Query engine seam
//!
//! The converter never talks to DuckDB directly; it goes through the
//! [`Engine`] trait so a connection handle is passed explicitly and tests
//! can wrap it to inject failures.
//!
//! # Overview
//!
//! - `Engine` - execute a statement, describe a relation
//! - `ScratchTable` - a temporary table that is always dropped

use crate::error::Result;
use crate::schema::TableDesc;
use crate::sql::quote_identifier;

/// A queryable SQL engine
pub trait Engine {
    /// Execute a statement that returns no rows
    fn execute(&self, sql: &str) -> Result<()>;

    /// Describe the columns of a relation.
    ///
    /// `relation` is anything DuckDB accepts after `DESCRIBE`: a (quoted)
    /// table name or a full `SELECT` query.
    fn describe(&self, relation: &str) -> Result<TableDesc>;
}

impl<E: Engine + ?Sized> Engine for &E {
    fn execute(&self, sql: &str) -> Result<()> {
        (**self).execute(sql)
    }

    fn describe(&self, relation: &str) -> Result<TableDesc> {
        (**self).describe(relation)
    }
}

/// Build a scratch table name from a base name and the current time.
///
/// Two callers using the same base within the same microsecond get the
/// same name; there is no stronger collision guarantee.
pub fn scratch_table_name(base: &str) -> String {
    format!("{base}_tmp_{}", chrono::Utc::now().timestamp_micros())
}

/// A temporary table that lives only as long as this guard.
///
/// Call [`ScratchTable::release`] on the success path so a failing drop is
/// reported. If the guard is dropped without being released (early return,
/// error, unwind) the table is still dropped and failures are logged.
pub struct ScratchTable<'a, E: Engine + ?Sized> {
    engine: &'a E,
    name: String,
    released: bool,
}

impl<'a, E: Engine + ?Sized> ScratchTable<'a, E> {
    /// Create `CREATE TEMP TABLE "<base>_tmp_<micros>" <definition>`.
    ///
    /// `definition` is either a column list (`(C1 INTEGER)`) or an
    /// `AS SELECT ...` clause.
    pub fn create(engine: &'a E, base: &str, definition: &str) -> Result<Self> {
        let name = scratch_table_name(base);
        engine.execute(&format!(
            "CREATE TEMP TABLE {} {definition}",
            quote_identifier(&name)
        ))?;

        tracing::debug!("Created scratch table {}", name);

        Ok(Self {
            engine,
            name,
            released: false,
        })
    }

    /// Unquoted table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Quoted table name, ready to splice into SQL
    pub fn relation(&self) -> String {
        quote_identifier(&self.name)
    }

    /// Drop the table, propagating any engine error
    pub fn release(mut self) -> Result<()> {
        self.released = true;
        drop_table(self.engine, &self.name)
    }
}

impl<E: Engine + ?Sized> Drop for ScratchTable<'_, E> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = drop_table(self.engine, &self.name) {
            tracing::warn!("Failed to drop scratch table {}: {}", self.name, e);
        }
    }
}

fn drop_table<E: Engine + ?Sized>(engine: &E, name: &str) -> Result<()> {
    engine.execute(&format!("DROP TABLE {}", quote_identifier(name)))?;
    tracing::debug!("Dropped scratch table {}", name);
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing;
