//! Excel workbook sink

use std::path::PathBuf;

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use tracing::info;

use crate::error::{Error, Result};
use crate::model::{CellValue, Row};

use super::{ensure_output_dir, WorkbookSink};

/// Writes a single-sheet `.xlsx` workbook to a fixed path
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn build(sheet_name: &str, headers: &[&str], rows: &[Row]) -> std::result::Result<Workbook, XlsxError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for (col, name) in headers.iter().enumerate() {
            worksheet.write_string(0, col_num(col), *name)?;
        }
        for (idx, row) in rows.iter().enumerate() {
            let row_num = row_num(idx + 1);
            for (col, cell) in row.cells.iter().enumerate() {
                write_cell(worksheet, row_num, col_num(col), cell)?;
            }
        }

        Ok(workbook)
    }
}

impl WorkbookSink for XlsxSink {
    fn write_sheet(&mut self, sheet_name: &str, headers: &[&str], rows: &[Row]) -> Result<()> {
        ensure_output_dir(&self.path)?;

        let to_error = |source| Error::Workbook {
            path: self.path.clone(),
            source,
        };
        let mut workbook = Self::build(sheet_name, headers, rows).map_err(to_error)?;
        workbook.save(&self.path).map_err(to_error)?;

        info!(path = %self.path.display(), rows = rows.len(), "wrote workbook");
        Ok(())
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
) -> std::result::Result<(), XlsxError> {
    match cell {
        CellValue::String(s) => worksheet.write_string(row, col, s.as_str())?,
        CellValue::Int(i) => worksheet.write_number(row, col, *i as f64)?,
        // Spreadsheets have no NaN or infinity
        CellValue::Float(f) if !f.is_finite() => worksheet.write_string(row, col, f.to_string())?,
        CellValue::Float(f) => worksheet.write_number(row, col, *f)?,
    };
    Ok(())
}

// Out-of-range indices saturate so the writer reports its own limit error.
fn row_num(idx: usize) -> u32 {
    u32::try_from(idx).unwrap_or(u32::MAX)
}

fn col_num(idx: usize) -> u16 {
    u16::try_from(idx).unwrap_or(u16::MAX)
}
