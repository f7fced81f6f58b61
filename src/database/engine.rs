//! DuckDB-based query engine
//!
//! DuckDB reads the JSON, infers the types and writes Parquet directly to
//! its destination. We only prepare statements and read schemas back.

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::schema::{ColumnDesc, TableDesc};
use duckdb::Connection;

/// Query engine backed by a DuckDB connection
pub struct DuckDbEngine {
    /// DuckDB connection
    conn: Connection,
    /// Database location (for logging)
    location: String,
}

impl DuckDbEngine {
    /// Create an engine over an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::engine("Failed to create DuckDB connection", e))?;

        Ok(Self {
            conn,
            location: ":memory:".to_string(),
        })
    }

    /// Underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Database location (`:memory:` or a file path)
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Names of every table visible to this connection, temporary ones
    /// included
    pub fn table_names(&self) -> Result<Vec<String>> {
        let query = "SELECT table_name FROM duckdb_tables() ORDER BY table_name";

        let mut stmt = self
            .conn
            .prepare(query)
            .map_err(|e| Error::engine("Failed to prepare table listing", e))?;

        let tables = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e| Error::engine("Failed to list tables", e))?
            .collect::<std::result::Result<Vec<String>, _>>()
            .map_err(|e| Error::engine("Failed to read table name", e))?;

        Ok(tables)
    }
}

impl Engine for DuckDbEngine {
    fn execute(&self, sql: &str) -> Result<()> {
        tracing::debug!("Executing: {}", sql);

        self.conn
            .execute_batch(sql)
            .map_err(|e| Error::engine(format!("Failed to execute `{sql}`"), e))
    }

    fn describe(&self, relation: &str) -> Result<TableDesc> {
        let query = format!("SELECT column_name, column_type FROM (DESCRIBE {relation})");

        tracing::debug!("Describing: {}", query);

        let mut stmt = self
            .conn
            .prepare(&query)
            .map_err(|e| Error::engine(format!("Failed to describe {relation}"), e))?;

        let columns = stmt
            .query_map([], |row| {
                let name: String = row.get(0)?;
                let column_type: String = row.get(1)?;
                Ok(ColumnDesc::new(name, column_type))
            })
            .map_err(|e| Error::engine(format!("Failed to describe {relation}"), e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::engine(format!("Failed to read description of {relation}"), e))?;

        Ok(TableDesc::new(columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let engine = DuckDbEngine::open_in_memory().unwrap();
        assert_eq!(engine.location(), ":memory:");
        assert!(engine.table_names().unwrap().is_empty());
    }

    #[test]
    fn test_describe_table_and_query() {
        let engine = DuckDbEngine::open_in_memory().unwrap();
        engine
            .execute("CREATE TABLE t (id BIGINT, name VARCHAR, s STRUCT(a INTEGER))")
            .unwrap();

        let desc = engine.describe("t").unwrap();
        assert_eq!(
            desc.columns,
            vec![
                ColumnDesc::new("id", "BIGINT"),
                ColumnDesc::new("name", "VARCHAR"),
                ColumnDesc::new("s", "STRUCT(a INTEGER)"),
            ]
        );

        let desc = engine.describe("SELECT name, id + 1 AS next FROM t").unwrap();
        assert_eq!(desc.names(), vec!["name".to_string(), "next".to_string()]);
    }

    #[test]
    fn test_execute_error_has_context() {
        let engine = DuckDbEngine::open_in_memory().unwrap();
        let err = engine.execute("DROP TABLE missing_table").unwrap_err();

        assert!(matches!(err, Error::Engine { .. }));
        assert!(err
            .to_string()
            .starts_with("Failed to execute `DROP TABLE missing_table`"));
    }

    #[test]
    fn test_describe_error_has_context() {
        let engine = DuckDbEngine::open_in_memory().unwrap();
        let err = engine.describe("missing_table").unwrap_err();

        assert!(matches!(err, Error::Engine { .. }));
        assert!(err.to_string().contains("missing_table"));
    }
}
