//! Error types for the parquet converter
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the converter
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Flag Errors
    // ============================================================================
    #[error("Incorrect columns format: {value}")]
    InvalidColumns { value: String },

    // ============================================================================
    // Schema Errors
    // ============================================================================
    #[error("Column '{column}' is not a STRUCT (type: {column_type})")]
    NotStructType { column: String, column_type: String },

    #[error(
        "Unnested table columns and flattened columns not matching. \
         unnested cols ({}): {unnested:?}, flattened cols ({}): {flattened:?}",
        .unnested.len(),
        .flattened.len()
    )]
    ColumnMismatch {
        unnested: Vec<String>,
        flattened: Vec<String>,
    },

    #[error("Flattened column name '{column}' is produced more than once")]
    DuplicateColumn { column: String },

    // ============================================================================
    // Engine Errors
    // ============================================================================
    #[error("{context}: {source}")]
    Engine {
        context: String,
        source: duckdb::Error,
    },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid columns error
    pub fn invalid_columns(value: impl Into<String>) -> Self {
        Self::InvalidColumns {
            value: value.into(),
        }
    }

    /// Create a not-a-struct error
    pub fn not_struct(column: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self::NotStructType {
            column: column.into(),
            column_type: column_type.into(),
        }
    }

    /// Wrap an engine error with the operation that failed
    pub fn engine(context: impl Into<String>, source: duckdb::Error) -> Self {
        Self::Engine {
            context: context.into(),
            source,
        }
    }

    /// Prefix `message` to this error. Engine errors keep their variant and
    /// source, everything else becomes [`Error::Other`].
    fn wrap(self, message: String) -> Self {
        match self {
            Error::Engine { context, source } => Error::Engine {
                context: format!("{message}: {context}"),
                source,
            },
            other => Error::Other(format!("{message}: {other}")),
        }
    }
}

/// Result type alias for the converter
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().wrap(message.into()))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| e.into().wrap(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_columns("badtoken");
        assert_eq!(err.to_string(), "Incorrect columns format: badtoken");

        let err = Error::not_struct("id", "BIGINT");
        assert_eq!(
            err.to_string(),
            "Column 'id' is not a STRUCT (type: BIGINT)"
        );
    }

    #[test]
    fn test_column_mismatch_display() {
        let err = Error::ColumnMismatch {
            unnested: vec!["b1".to_string()],
            flattened: vec!["a_b1".to_string(), "a_b2".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("unnested cols (1)"));
        assert!(msg.contains("flattened cols (2)"));
        assert!(msg.contains("\"a_b2\""));
    }

    #[test]
    fn test_engine_error_context() {
        let err = Error::engine("failed creating table t", duckdb::Error::QueryReturnedNoRows);
        assert!(err.to_string().starts_with("failed creating table t: "));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::invalid_columns("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Incorrect columns format: inner"));
    }

    #[test]
    fn test_context_keeps_engine_variant() {
        let result: Result<()> = Err(Error::engine(
            "Failed to execute `SELECT 1`",
            duckdb::Error::QueryReturnedNoRows,
        ));

        let err = result
            .context("inner step")
            .with_context(|| "outer step".to_string())
            .unwrap_err();

        match &err {
            Error::Engine { context, .. } => {
                assert_eq!(context, "outer step: inner step: Failed to execute `SELECT 1`");
            }
            other => panic!("expected engine error, got {other:?}"),
        }
        assert!(std::error::Error::source(&err).is_some());
    }
}
