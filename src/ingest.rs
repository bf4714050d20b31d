//! Concurrent ingestion of CSV sources
//!
//! Every path is checked up front, then read in parallel on the rayon pool.
//! Either all reads succeed and the tables are merged in input order, or the
//! call fails with every read error collected.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::Delimiter;
use crate::error::{Error, Result};
use crate::merge::merge_tables;
use crate::model::Table;
use crate::parser::{ensure_csv_path, CsvReader};

/// Read every path in parallel and merge the results.
///
/// Fails with `InvalidInputFormat` before any read if a path lacks the `.csv`
/// extension, with `AggregatedReadError` if any read fails, and with
/// `NoValidSources` when `paths` is empty.
pub fn ingest<P: AsRef<Path> + Sync>(paths: &[P], delimiter: Delimiter) -> Result<Table> {
    let tables = read_all(paths, delimiter)?;
    if tables.is_empty() {
        return Err(Error::NoValidSources);
    }
    merge_tables(tables)
}

/// Read every path in parallel without merging.
///
/// Tables come back in the order of `paths`.
pub fn read_all<P: AsRef<Path> + Sync>(paths: &[P], delimiter: Delimiter) -> Result<Vec<Table>> {
    for path in paths {
        ensure_csv_path(path.as_ref())?;
    }

    info!(sources = paths.len(), %delimiter, "reading sources");
    let reader = CsvReader::new(delimiter);

    // Indexed collect keeps input order regardless of completion order
    let results: Vec<Result<Table>> = paths
        .par_iter()
        .map(|path| reader.read_path(path.as_ref()))
        .collect();

    let mut tables = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(table) => tables.push(table),
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        debug!(failed = errors.len(), "source reads failed");
        return Err(Error::AggregatedReadError { errors });
    }
    Ok(tables)
}

/// Read one path after checking its extension
pub fn read_single(path: &Path, delimiter: Delimiter) -> Result<Table> {
    ensure_csv_path(path)?;
    CsvReader::new(delimiter).read_path(path)
}

/// Trim stray whitespace around comma-separated path arguments
pub fn normalize_paths<S: AsRef<str>>(raw: &[S]) -> Vec<PathBuf> {
    raw.iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::model::CellValue;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn texts(table: &Table) -> Vec<Vec<String>> {
        table
            .rows
            .iter()
            .map(|r| r.cells.iter().map(|c| c.display().into_owned()).collect())
            .collect()
    }

    #[test]
    fn test_ingest_merges_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..8)
            .map(|i| write(&dir, &format!("part{i}.csv"), &format!("h1,h2\n{i},{}\n", i * 10)))
            .collect();

        let merged = ingest(&paths, Delimiter::COMMA).unwrap();

        assert_eq!(merged.header_names(), vec!["h1", "h2"]);
        let expected: Vec<Vec<String>> = (0..8)
            .map(|i| vec![i.to_string(), (i * 10).to_string()])
            .collect();
        assert_eq!(texts(&merged), expected);
        assert_eq!(merged.source, paths[0].display().to_string());
    }

    #[test]
    fn test_ingest_two_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir, "a.csv", "h1,h2\n1,2\n");
        let b = write(&dir, "b.csv", "h1,h2\n3,4\n");

        let merged = ingest(&[a, b], Delimiter::COMMA).unwrap();
        assert_eq!(texts(&merged), vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn test_invalid_extension_fails_before_reading() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(&dir, "good.csv", "a\n1\n");
        // Missing file: reading it would fail differently
        let missing = dir.path().join("missing.csv");
        let bad = write(&dir, "bad.txt", "a\n1\n");

        let err = ingest(&[good, missing, bad.clone()], Delimiter::COMMA).unwrap_err();
        match err {
            Error::InvalidInputFormat { path } => assert_eq!(path, bad),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_one_unreadable_source_is_reported_alone() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir, "a.csv", "h\n1\n");
        let missing = dir.path().join("missing.csv");
        let c = write(&dir, "c.csv", "h\n3\n");

        let err = ingest(&[a, missing.clone(), c], Delimiter::COMMA).unwrap_err();
        match err {
            Error::AggregatedReadError { errors } => {
                assert_eq!(errors.len(), 1);
                assert!(
                    matches!(&errors[0], Error::SourceUnavailable { path, .. } if *path == missing)
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_every_failure_is_collected_in_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let empty = write(&dir, "empty.csv", "");
        let ok = write(&dir, "ok.csv", "h\n1\n");
        let ragged = write(&dir, "ragged.csv", "a,b\n1\n");

        let err = ingest(&[empty, ok, ragged], Delimiter::COMMA).unwrap_err();
        match err {
            Error::AggregatedReadError { errors } => {
                assert_eq!(errors.len(), 2);
                assert!(matches!(errors[0], Error::EmptySource { .. }));
                assert!(matches!(errors[1], Error::MalformedRecord { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_no_paths() {
        let paths: Vec<PathBuf> = Vec::new();
        assert!(matches!(
            ingest(&paths, Delimiter::COMMA),
            Err(Error::NoValidSources)
        ));
    }

    #[test]
    fn test_schema_mismatch_after_reads() {
        let dir = tempfile::tempdir().unwrap();
        let a = write(&dir, "a.csv", "x,y\n1,2\n");
        let b = write(&dir, "b.csv", "x\n3\n");

        assert!(matches!(
            ingest(&[a, b], Delimiter::COMMA),
            Err(Error::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_read_single() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "one.csv", "a|b\nx|y\n");
        let table = read_single(&path, Delimiter::parse("|").unwrap()).unwrap();
        assert_eq!(table.rows[0].cells, vec![CellValue::from("x"), CellValue::from("y")]);

        let txt = write(&dir, "one.txt", "a\n");
        assert!(matches!(
            read_single(&txt, Delimiter::COMMA),
            Err(Error::InvalidInputFormat { .. })
        ));
    }

    #[test]
    fn test_normalize_paths() {
        let paths = normalize_paths(&[" a.csv", "b.csv ", "", "  "]);
        assert_eq!(paths, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
    }
}
