//! End-to-end conversion: read, optionally convert, write

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::infer::convert_column_types_with_sample;
use crate::ingest::{ingest, read_single};
use crate::model::Table;
use crate::output::{ConversionReport, WorkbookSink, XlsxSink, WORKBOOK_EXTENSION};
use crate::parser::list_csv_files;

/// Where the CSV input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// One CSV file converted on its own
    File(PathBuf),
    /// Several CSV files merged into one sheet
    Files(Vec<PathBuf>),
    /// Every CSV file directly inside a folder, merged
    Folder(PathBuf),
}

impl InputMode {
    /// Work out the workbook path.
    ///
    /// An explicit `output` wins; `name` places `<name>.xlsx` next to the
    /// input; otherwise a single file gets its `.csv` swapped for `.xlsx`.
    /// Returns `None` when merging without either.
    pub fn output_path(&self, output: Option<&Path>, name: Option<&str>) -> Option<PathBuf> {
        if let Some(output) = output {
            return Some(output.to_path_buf());
        }
        let file_name = name.map(|n| format!("{n}.{WORKBOOK_EXTENSION}"));
        match (self, file_name) {
            (InputMode::File(path), Some(file_name)) => Some(sibling(path, &file_name)),
            (InputMode::File(path), None) => Some(path.with_extension(WORKBOOK_EXTENSION)),
            (InputMode::Files(paths), Some(file_name)) => {
                Some(paths.first().map_or_else(|| PathBuf::from(&file_name), |p| sibling(p, &file_name)))
            }
            (InputMode::Folder(dir), Some(file_name)) => Some(dir.join(file_name)),
            (InputMode::Files(_) | InputMode::Folder(_), None) => None,
        }
    }

    /// Read the input into one table
    pub fn load(&self, config: &Config) -> Result<(Table, usize)> {
        match self {
            InputMode::File(path) => Ok((read_single(path, config.delimiter)?, 1)),
            InputMode::Files(paths) => Ok((ingest(paths, config.delimiter)?, paths.len())),
            InputMode::Folder(dir) => {
                let paths = list_csv_files(dir)?;
                if paths.is_empty() {
                    return Err(Error::NoValidSources);
                }
                info!(folder = %dir.display(), files = paths.len(), "discovered CSV files");
                Ok((ingest(&paths, config.delimiter)?, paths.len()))
            }
        }
    }
}

fn sibling(path: &Path, file_name: &str) -> PathBuf {
    path.parent().unwrap_or_else(|| Path::new("")).join(file_name)
}

/// Read the input, apply type conversion if enabled, and hand the table to `sink`.
pub fn convert_to_sink(
    input: &InputMode,
    config: &Config,
    sink: &mut dyn WorkbookSink,
) -> Result<(Table, usize)> {
    let (mut table, sources) = input.load(config)?;
    if config.convert_types {
        convert_column_types_with_sample(&mut table, config.sample_size);
    }
    sink.write_table(&config.sheet_name, &table)?;
    Ok((table, sources))
}

/// Convert `input` into an `.xlsx` workbook at `output`
pub fn convert(input: &InputMode, output: &Path, config: &Config) -> Result<ConversionReport> {
    let mut sink = XlsxSink::new(output);
    let (table, sources) = convert_to_sink(input, config, &mut sink)?;
    Ok(ConversionReport::new(output.to_path_buf(), sources, &table))
}
