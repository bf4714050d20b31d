//! Delimited text reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::config::Delimiter;
use crate::error::{Error, RecordError, Result};
use crate::model::{CellValue, Column, Table};

use super::quoting::check_quoting;

/// Reads delimited text into a [`Table`] of text cells.
///
/// The first record names the columns; every later record must have the
/// same number of fields.
#[derive(Debug, Clone, Copy)]
pub struct CsvReader {
    delimiter: Delimiter,
}

impl CsvReader {
    pub fn new(delimiter: Delimiter) -> Self {
        Self { delimiter }
    }

    /// Open and fully read the file at `path`.
    pub fn read_path(&self, path: &Path) -> Result<Table> {
        let file = File::open(path).map_err(|source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let table = self.read_from(BufReader::new(file), &path.display().to_string())?;
        debug!(
            path = %path.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            "read source"
        );
        Ok(table)
    }

    /// Read a table from any byte source; `source_id` labels the table and its errors.
    ///
    /// The source is buffered whole so quoting can be checked before parsing.
    pub fn read_from<R: Read>(&self, mut reader: R, source_id: &str) -> Result<Table> {
        let mut input = Vec::new();
        reader
            .read_to_end(&mut input)
            .map_err(|source| Error::SourceUnavailable {
                path: source_id.into(),
                source,
            })?;
        check_quoting(&input, self.delimiter.as_byte()).map_err(|e| malformed(e, source_id))?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .delimiter(self.delimiter.as_byte())
            .from_reader(input.as_slice());

        let mut records = csv_reader.records();

        // Read headers
        let headers = match records.next() {
            Some(result) => result.map_err(|e| malformed(e.into(), source_id))?,
            None => {
                return Err(Error::EmptySource {
                    source_id: source_id.to_string(),
                })
            }
        };
        let columns: Vec<Column> = headers.iter().map(Column::new).collect();
        let mut table = Table::new(source_id, self.delimiter.as_byte(), columns);

        // Read rows
        for (index, result) in records.enumerate() {
            let record = result.map_err(|e| malformed(e.into(), source_id))?;
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(index + 2); // +2 for 1-indexing and header
            let cells: Vec<CellValue> = record.iter().map(CellValue::from).collect();
            table.add_row(cells, line);
        }

        Ok(table)
    }
}

fn malformed(source: RecordError, source_id: &str) -> Error {
    Error::MalformedRecord {
        source_id: source_id.to_string(),
        source,
    }
}
