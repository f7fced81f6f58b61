//! Struct flattening
//!
//! DuckDB only reports a struct column as one type string. To learn its
//! fields we materialize a scratch table whose single column has that type
//! and let the engine describe `C1.*`, recursing into nested structs.

use super::types::{ColumnDesc, TableDesc};
use crate::engine::{Engine, ScratchTable};
use crate::error::{Error, Result, ResultExt};
use crate::sql::quote_identifier;
use std::collections::HashSet;

/// Flatten a struct column into one column per leaf field.
///
/// Leaf names are the `_`-joined path from `column` down to the field, in
/// engine-reported order. Non-struct columns are rejected before any SQL
/// is issued.
pub fn flatten_struct_column<E: Engine + ?Sized>(
    engine: &E,
    column: &ColumnDesc,
) -> Result<Vec<ColumnDesc>> {
    if !column.is_struct() {
        return Err(Error::not_struct(
            &column.name,
            column.column_type.as_str(),
        ));
    }

    let fields = describe_struct_fields(engine, column)?;

    let mut columns = Vec::with_capacity(fields.len());
    for field in fields.columns {
        if field.is_struct() {
            let nested = flatten_struct_column(engine, &field)?;
            columns.extend(nested.into_iter().map(|c| {
                ColumnDesc::new(format!("{}_{}", column.name, c.name), c.column_type)
            }));
            continue;
        }

        columns.push(ColumnDesc::new(
            format!("{}_{}", column.name, field.name),
            field.column_type,
        ));
    }

    Ok(columns)
}

/// Immediate fields of a struct column, as the engine reports them
fn describe_struct_fields<E: Engine + ?Sized>(
    engine: &E,
    column: &ColumnDesc,
) -> Result<TableDesc> {
    let table = ScratchTable::create(engine, &column.name, &format!("(C1 {})", column.column_type))
        .with_context(|| format!("failed creating scratch table for column: {}", column.name))?;

    let fields = engine
        .describe(&format!("SELECT C1.* FROM {}", table.relation()))
        .with_context(|| format!("failed describing struct column: {}", column.name))?;

    table
        .release()
        .with_context(|| format!("failed dropping scratch table for column: {}", column.name))?;

    Ok(fields)
}

/// Flatten every struct column of a described table; other columns pass
/// through unchanged.
///
/// Fails with [`Error::DuplicateColumn`] when two columns end up with the
/// same name, e.g. a top-level `a_b` next to `a STRUCT(b ...)`.
pub fn flatten_columns<E: Engine + ?Sized>(
    engine: &E,
    table: &TableDesc,
) -> Result<Vec<ColumnDesc>> {
    let mut columns = Vec::with_capacity(table.len());
    for column in table {
        if column.is_struct() {
            let flattened = flatten_struct_column(engine, column)
                .with_context(|| format!("failed flattening column: {}", column.name))?;
            columns.extend(flattened);
            continue;
        }
        columns.push(column.clone());
    }

    let mut seen = HashSet::with_capacity(columns.len());
    if let Some(dup) = columns.iter().find(|c| !seen.insert(c.name.as_str())) {
        return Err(Error::DuplicateColumn {
            column: dup.name.clone(),
        });
    }

    Ok(columns)
}

/// Build a `SELECT` that returns `table` with every struct flattened.
///
/// The flattened names come from [`flatten_struct_column`], the values from
/// the engine's own recursive `UNNEST`. Both are derived independently, so
/// they are zipped by position and a length mismatch is an error. Unnested
/// columns are bound by position too: leaf names can repeat under
/// different parents.
pub fn flattened_select<E: Engine + ?Sized>(engine: &E, table: &str) -> Result<String> {
    let relation = quote_identifier(table);

    let table_desc = engine
        .describe(&relation)
        .context("failed getting table desc")?;

    let flattened = flatten_columns(engine, &table_desc)?;

    let unnested_select = format!(
        "SELECT {} FROM {relation}",
        table_desc.unnested_columns()
    );
    let unnested = engine
        .describe(&unnested_select)
        .context("failed getting unnested table desc")?;

    if unnested.len() != flattened.len() {
        return Err(Error::ColumnMismatch {
            unnested: unnested.names(),
            flattened: flattened.iter().map(|c| c.name.clone()).collect(),
        });
    }

    let aliases = (0..unnested.len())
        .map(|i| format!("u{i}"))
        .collect::<Vec<_>>();

    let projection = aliases
        .iter()
        .zip(&flattened)
        .map(|(alias, column)| format!("{alias} AS {}", quote_identifier(&column.name)))
        .collect::<Vec<_>>()
        .join(", ");

    tracing::debug!(
        "Flattened {} columns of {} into {}",
        table_desc.len(),
        table,
        flattened.len()
    );

    Ok(format!(
        "SELECT {projection} FROM ({unnested_select}) AS unnested({})",
        aliases.join(", ")
    ))
}
