//! Error types for reading, merging and writing tables.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning CSV sources into a workbook.
#[derive(Debug, Error)]
pub enum Error {
    // === Reader Errors ===
    /// The source could not be opened or read.
    #[error("failed to open {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source contains no records at all.
    #[error("no records found in {source_id}")]
    EmptySource { source_id: String },

    /// A record could not be tokenized under the configured delimiter.
    #[error("malformed record in {source_id}: {source}")]
    MalformedRecord {
        source_id: String,
        #[source]
        source: RecordError,
    },

    // === Ingestion Errors ===
    /// An input path does not carry the `.csv` extension.
    #[error("invalid input file format: {path} (please provide a CSV file)")]
    InvalidInputFormat { path: PathBuf },

    /// One or more concurrent reads failed.
    #[error("encountered errors while reading files: [{}]", join_errors(.errors))]
    AggregatedReadError { errors: Vec<Error> },

    /// Every read succeeded but there was nothing to merge.
    #[error("no valid CSV files to merge")]
    NoValidSources,

    // === Merge Errors ===
    /// `merge_tables` was called with no tables.
    #[error("no tables to merge")]
    NoInputTables,

    /// A table's column count differs from the first table's.
    #[error(
        "inconsistent number of columns in either {source_id} ({found}) or {first_source} ({expected})"
    )]
    SchemaMismatch {
        first_source: String,
        expected: usize,
        source_id: String,
        found: usize,
    },

    // === Configuration Errors ===
    /// The delimiter string was empty.
    #[error("delimiter cannot be empty")]
    EmptyDelimiter,

    /// The delimiter is not usable as a single-byte field separator.
    #[error("unsupported delimiter {delimiter:?}: {reason}")]
    UnsupportedDelimiter { delimiter: String, reason: &'static str },

    /// Failed to list a folder of inputs.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Output Errors ===
    /// The directory that should hold the workbook does not exist.
    #[error("invalid output path: {path}")]
    OutputDirectoryMissing { path: PathBuf },

    /// The workbook could not be built or saved.
    #[error("failed to write workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

/// Why a record could not be tokenized.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Rejected by the CSV parser (field count, UTF-8).
    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("bare \" in non-quoted field on line {line}")]
    BareQuote { line: usize },

    #[error("extraneous or missing \" in quoted field on line {line}")]
    StrayQuote { line: usize },

    #[error("quoted field starting on line {line} is never closed")]
    UnterminatedQuote { line: usize },
}

fn join_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
