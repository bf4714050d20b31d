//! Parser layer: reading delimited sources and discovering them on disk

mod csv;
mod quoting;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub use self::csv::CsvReader;

/// Extension a path must carry to be accepted as input
pub const CSV_EXTENSION: &str = "csv";

/// Check if a file extension names a delimited text source
pub fn supports_extension(ext: &str) -> bool {
    ext.eq_ignore_ascii_case(CSV_EXTENSION)
}

/// Check if a path carries the recognized extension
pub fn is_csv_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(supports_extension)
        .unwrap_or(false)
}

/// Fail with `InvalidInputFormat` unless `path` ends in `.csv`
pub fn ensure_csv_path(path: &Path) -> Result<()> {
    if is_csv_path(path) {
        Ok(())
    } else {
        Err(Error::InvalidInputFormat {
            path: path.to_path_buf(),
        })
    }
}

/// Lists all CSV files directly inside a directory.
///
/// Subdirectories are not descended into. Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |source| Error::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && is_csv_path(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
