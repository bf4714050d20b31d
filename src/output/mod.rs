//! Output layer: workbook sinks and run reports

mod report;
mod xlsx;

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Row, Table};

pub use report::{render_report, ConversionReport, JsonReport, ReportRenderer, TextReport};
pub use xlsx::XlsxSink;

/// Extension of written workbooks
pub const WORKBOOK_EXTENSION: &str = "xlsx";

/// Trait for persisting a header row and typed rows as one sheet
pub trait WorkbookSink {
    /// Write `headers` then `rows` into a sheet named `sheet_name`
    fn write_sheet(&mut self, sheet_name: &str, headers: &[&str], rows: &[Row]) -> Result<()>;

    /// Write a whole table
    fn write_table(&mut self, sheet_name: &str, table: &Table) -> Result<()> {
        self.write_sheet(sheet_name, &table.header_names(), &table.rows)
    }
}

/// Fail unless the directory that will hold `path` exists
pub fn ensure_output_dir(path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if dir.is_dir() {
        Ok(())
    } else {
        Err(Error::OutputDirectoryMissing {
            path: dir.to_path_buf(),
        })
    }
}
