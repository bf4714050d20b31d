//! Table, Row, and Cell data structures

use std::borrow::Cow;

use super::schema::Column;

/// A cell value with its runtime type
#[derive(Debug, Clone)]
pub enum CellValue {
    String(String),
    Int(i64),
    Float(f64),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            _ => false,
        }
    }
}

impl CellValue {
    /// Borrow the text of an uncoerced cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to a display string
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::String(s) => Cow::Borrowed(s.as_str()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

/// A row in the table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Original line/record number in source file (1-indexed)
    pub source_line: usize,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// A parsed delimited table.
///
/// Every row holds exactly `columns.len()` cells, in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Where the table was read from (usually a file path)
    pub source: String,
    /// Field delimiter the source was parsed with
    pub delimiter: u8,
    /// Column definitions
    pub columns: Vec<Column>,
    /// All rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table with column definitions
    pub fn new(source: impl Into<String>, delimiter: u8, columns: Vec<Column>) -> Self {
        Self {
            source: source.into(),
            delimiter,
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row to the table
    pub fn add_row(&mut self, cells: Vec<CellValue>, source_line: usize) {
        debug_assert_eq!(cells.len(), self.columns.len());
        self.rows.push(Row::new(cells, source_line));
    }

    /// Column names in header order
    pub fn header_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}
