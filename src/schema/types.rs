//! Schema types

use crate::sql::quote_identifier;
use serde::Serialize;

/// Engine-native column type, e.g. `BIGINT` or `STRUCT(a VARCHAR)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ColumnType(String);

impl ColumnType {
    /// Wrap a type string as reported by the engine
    pub fn new(ty: impl Into<String>) -> Self {
        Self(ty.into())
    }

    /// Type as SQL text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `STRUCT(...)` types only.
    ///
    /// A list of structs (`STRUCT(a INTEGER)[]`) or a map is not a struct:
    /// the parenthesis opened after `STRUCT` has to close on the last
    /// character.
    pub fn is_struct(&self) -> bool {
        let ty = self.0.trim();
        let Some(prefix) = ty.get(..7) else {
            return false;
        };
        if !prefix.eq_ignore_ascii_case("STRUCT(") {
            return false;
        }

        let mut depth = 0usize;
        let mut quoted = false;
        for (i, c) in ty.char_indices().skip(6) {
            match c {
                '"' => quoted = !quoted,
                '(' if !quoted => depth += 1,
                ')' if !quoted => {
                    depth -= 1;
                    if depth == 0 {
                        return i == ty.len() - 1;
                    }
                }
                _ => {}
            }
        }

        false
    }
}

impl From<&str> for ColumnType {
    fn from(ty: &str) -> Self {
        Self::new(ty)
    }
}

impl From<String> for ColumnType {
    fn from(ty: String) -> Self {
        Self(ty)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A column as described by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDesc {
    /// Column name
    pub name: String,
    /// Column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnDesc {
    /// Create a column description
    pub fn new(name: impl Into<String>, column_type: impl Into<ColumnType>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }

    /// Whether this column needs flattening
    pub fn is_struct(&self) -> bool {
        self.column_type.is_struct()
    }
}

/// Ordered columns of one relation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableDesc {
    /// Columns in engine-reported order
    pub columns: Vec<ColumnDesc>,
}

impl TableDesc {
    /// Create a table description
    pub fn new(columns: Vec<ColumnDesc>) -> Self {
        Self { columns }
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the relation has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterate over columns
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDesc> {
        self.columns.iter()
    }

    /// Column names in order
    pub fn names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Select list unnesting every struct column with DuckDB's recursive
    /// `UNNEST`; other columns are selected as they are.
    pub fn unnested_columns(&self) -> String {
        self.columns
            .iter()
            .map(|c| {
                let name = quote_identifier(&c.name);
                if c.is_struct() {
                    format!("UNNEST({name}, recursive := true)")
                } else {
                    name
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<'a> IntoIterator for &'a TableDesc {
    type Item = &'a ColumnDesc;
    type IntoIter = std::slice::Iter<'a, ColumnDesc>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
