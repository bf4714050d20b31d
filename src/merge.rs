//! Combining several tables into one

use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::model::Table;

/// Concatenate tables that share a column count.
///
/// The result keeps the first table's source, delimiter and columns; rows
/// follow input order, then row order within each table. Only column counts
/// are compared. The inputs are consumed whether or not the merge succeeds.
pub fn merge_tables(tables: Vec<Table>) -> Result<Table> {
    let mut tables = tables.into_iter();
    let mut merged = tables.next().ok_or(Error::NoInputTables)?;
    let rest: Vec<Table> = tables.collect();

    let expected = merged.column_count();
    if let Some(bad) = rest.iter().find(|t| t.column_count() != expected) {
        return Err(Error::SchemaMismatch {
            first_source: merged.source.clone(),
            expected,
            source_id: bad.source.clone(),
            found: bad.column_count(),
        });
    }

    for table in &rest {
        if table.columns.iter().map(|c| &c.name).ne(merged.columns.iter().map(|c| &c.name)) {
            warn!(
                first = %merged.source,
                other = %table.source,
                "merging tables whose column names differ"
            );
        }
    }

    merged
        .rows
        .reserve(rest.iter().map(Table::row_count).sum());
    for table in rest {
        merged.rows.extend(table.rows);
    }

    info!(
        rows = merged.row_count(),
        columns = merged.column_count(),
        "merged tables"
    );
    Ok(merged)
}
