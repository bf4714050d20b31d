//! Column type inference and cell coercion
//!
//! Inference looks only at a bounded prefix of rows (the sample window).
//! A column is upgraded when every sampled cell is numeric:
//!
//! - all sampled cells parse as `i64` → [`ColumnType::Integer`]
//! - otherwise all sampled cells parse as `f64` → [`ColumnType::Float`]
//! - otherwise the column keeps its current type
//!
//! Coercion then rewrites text cells of numeric columns in place. Cells that
//! fail to parse (only possible outside the sample window) stay text.

use tracing::debug;

use crate::config::DEFAULT_SAMPLE_ROWS;
use crate::model::{CellValue, ColumnType, Table};

/// Per-column tally over the sample window
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct NumericTally {
    sampled: usize,
    floats: usize,
    integers: usize,
}

impl NumericTally {
    fn observe(&mut self, cell: &CellValue) {
        self.sampled += 1;
        match cell {
            CellValue::String(s) => {
                if parse_integer(s).is_some() {
                    self.integers += 1;
                    self.floats += 1;
                } else if parse_float(s).is_some() {
                    self.floats += 1;
                }
            }
            CellValue::Int(_) => {
                self.integers += 1;
                self.floats += 1;
            }
            CellValue::Float(_) => self.floats += 1,
        }
    }

    fn decide(self) -> Option<ColumnType> {
        if self.sampled == 0 {
            None
        } else if self.integers == self.sampled {
            Some(ColumnType::Integer)
        } else if self.floats == self.sampled {
            Some(ColumnType::Float)
        } else {
            None
        }
    }
}

/// Base-10 signed 64-bit integer, no fractional part
fn parse_integer(s: &str) -> Option<i64> {
    s.parse::<i64>().ok()
}

/// Decimal or exponential 64-bit float; no hex floats or `_` separators
fn parse_float(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}

/// Infer column types from the first `sample_size` rows, in place.
///
/// Columns that do not qualify keep their current type.
pub fn infer_column_types_with_sample(table: &mut Table, sample_size: usize) {
    let sample = &table.rows[..sample_size.min(table.rows.len())];

    for (col_idx, column) in table.columns.iter_mut().enumerate() {
        let mut tally = NumericTally::default();
        for row in sample {
            if let Some(cell) = row.get(col_idx) {
                tally.observe(cell);
            }
        }

        if let Some(inferred) = tally.decide() {
            debug!(column = %column.name, ?tally, %inferred, "inferred column type");
            column.column_type = inferred;
        }
    }
}

/// Infer column types using the default sample window of 20 rows
pub fn infer_column_types(table: &mut Table) {
    infer_column_types_with_sample(table, DEFAULT_SAMPLE_ROWS);
}

/// Infer types, then coerce text cells of numeric columns.
///
/// Coercion is best effort: a cell that does not parse keeps its text.
pub fn convert_column_types_with_sample(table: &mut Table, sample_size: usize) {
    infer_column_types_with_sample(table, sample_size);

    let targets: Vec<(usize, ColumnType)> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.column_type.is_numeric())
        .map(|(i, c)| (i, c.column_type))
        .collect();
    if targets.is_empty() {
        return;
    }

    let mut left_as_text = 0usize;
    for row in &mut table.rows {
        for &(col_idx, column_type) in &targets {
            let Some(cell) = row.cells.get_mut(col_idx) else {
                continue;
            };
            let Some(text) = cell.as_text() else {
                continue;
            };
            let coerced = match column_type {
                ColumnType::Integer => parse_integer(text).map(CellValue::Int),
                ColumnType::Float => parse_float(text).map(CellValue::Float),
                ColumnType::String => None,
            };
            match coerced {
                Some(value) => *cell = value,
                None => left_as_text += 1,
            }
        }
    }

    if left_as_text > 0 {
        debug!(
            source = %table.source,
            cells = left_as_text,
            "cells outside the sample window kept as text"
        );
    }
}

/// Infer and coerce using the default sample window of 20 rows
pub fn convert_column_types(table: &mut Table) {
    convert_column_types_with_sample(table, DEFAULT_SAMPLE_ROWS);
}
