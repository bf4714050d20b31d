//! Configuration handling for csv2excel

use crate::error::{Error, Result};

/// Number of leading rows inspected when inferring column types
pub const DEFAULT_SAMPLE_ROWS: usize = 20;

/// Sheet written when no name is given
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// A validated single-byte field delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiter(u8);

impl Delimiter {
    pub const COMMA: Delimiter = Delimiter(b',');

    /// Validate a user-supplied delimiter.
    ///
    /// Only the first character is used, and it must be a single ASCII byte
    /// other than the quote character or a line break.
    pub fn parse(s: &str) -> Result<Self> {
        let ch = s.chars().next().ok_or(Error::EmptyDelimiter)?;
        let unsupported = |reason| Error::UnsupportedDelimiter {
            delimiter: ch.to_string(),
            reason,
        };

        if !ch.is_ascii() {
            return Err(unsupported("must be a single ASCII character"));
        }
        match ch {
            '"' => Err(unsupported("conflicts with the quote character")),
            '\r' | '\n' => Err(unsupported("conflicts with the record terminator")),
            _ => Ok(Delimiter(ch as u8)),
        }
    }

    /// The raw byte handed to the CSV reader
    pub fn as_byte(self) -> u8 {
        self.0
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::COMMA
    }
}

impl std::str::FromStr for Delimiter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Delimiter::parse(s)
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0 as char)
    }
}

/// Format of the report printed after a successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

/// Configuration for a conversion run
#[derive(Debug, Clone)]
pub struct Config {
    /// Field delimiter of every input
    pub delimiter: Delimiter,
    /// Infer column types and coerce cells before writing
    pub convert_types: bool,
    /// Rows sampled per column during type inference
    pub sample_size: usize,
    /// Name of the worksheet to write
    pub sheet_name: String,
    /// Report format
    pub report_format: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: Delimiter::default(),
            convert_types: false,
            sample_size: DEFAULT_SAMPLE_ROWS,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            report_format: ReportFormat::default(),
        }
    }
}

impl Config {
    /// Create a new Config, rejecting an unusable delimiter before any I/O
    pub fn new(delimiter: &str) -> Result<Self> {
        Ok(Self {
            delimiter: Delimiter::parse(delimiter)?,
            ..Default::default()
        })
    }

    /// Enable type inference and coercion
    pub fn with_convert_types(mut self, convert: bool) -> Self {
        self.convert_types = convert;
        self
    }

    /// Set the inference sample window
    pub fn with_sample_size(mut self, rows: usize) -> Self {
        self.sample_size = rows;
        self
    }

    /// Set the worksheet name; an empty name keeps the default
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.sheet_name = name;
        }
        self
    }

    /// Set report format
    pub fn with_report_format(mut self, format: ReportFormat) -> Self {
        self.report_format = format;
        self
    }
}
