//! csv2excel - Convert CSV files to Excel workbooks
//!
//! Reads one or more delimited text files into a uniform table model,
//! optionally infers numeric column types from a bounded sample, merges
//! several sources concurrently, and writes a single-sheet workbook.

pub mod config;
pub mod error;
pub mod infer;
pub mod ingest;
pub mod logging;
pub mod merge;
pub mod model;
pub mod output;
pub mod parser;
pub mod pipeline;

pub use config::{Config, Delimiter};
pub use error::{Error, Result};
pub use infer::{convert_column_types, infer_column_types};
pub use ingest::ingest;
pub use merge::merge_tables;
pub use model::Table;
pub use parser::CsvReader;
pub use pipeline::InputMode;
