//! csv2excel - Convert CSV files to Excel workbooks

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser, ValueEnum};
use termcolor::{ColorChoice, StandardStream};
use tracing::debug;

use csv2excel::config::{Config, ReportFormat};
use csv2excel::ingest::normalize_paths;
use csv2excel::logging::init_logging;
use csv2excel::output::render_report;
use csv2excel::pipeline::{convert, InputMode};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliReportFormat {
    Text,
    Json,
}

impl From<CliReportFormat> for ReportFormat {
    fn from(f: CliReportFormat) -> Self {
        match f {
            CliReportFormat::Text => ReportFormat::Text,
            CliReportFormat::Json => ReportFormat::Json,
        }
    }
}

/// Convert CSV files to Excel format, optionally merging several files into one sheet
#[derive(Parser, Debug)]
#[command(name = "csv2excel")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["input", "files", "folder"])
))]
struct Cli {
    /// Path to the input CSV file
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// CSV files to merge (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    files: Vec<String>,

    /// Folder whose CSV files are merged (not recursive)
    #[arg(short = 'F', long)]
    folder: Option<PathBuf>,

    /// Path to the output Excel file
    #[arg(short, long, conflicts_with = "name")]
    output: Option<PathBuf>,

    /// Name of the output Excel file, placed next to the input
    #[arg(short, long)]
    name: Option<String>,

    /// Field delimiter of the CSV input
    #[arg(short, long, default_value = ",")]
    delimiter: String,

    /// Convert column types to inferred types
    #[arg(short, long)]
    convert: bool,

    /// Name of the worksheet to write
    #[arg(long, default_value = "Sheet1")]
    sheet: String,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: CliReportFormat,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn input_mode(&self) -> InputMode {
        if let Some(ref folder) = self.folder {
            InputMode::Folder(folder.clone())
        } else if let Some(ref input) = self.input {
            InputMode::File(input.clone())
        } else {
            InputMode::Files(normalize_paths(&self.files))
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose).context("Failed to initialize logging")?;

    let config = Config::new(&cli.delimiter)?
        .with_convert_types(cli.convert)
        .with_sheet_name(cli.sheet.clone())
        .with_report_format(cli.format.into());

    let input = cli.input_mode();
    let output = input
        .output_path(cli.output.as_deref(), cli.name.as_deref())
        .context("--output or --name is required when merging several files")?;
    debug!(?input, output = %output.display(), "resolved paths");

    let report = convert(&input, &output, &config)
        .with_context(|| format!("Failed to convert to {}", output.display()))?;

    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    render_report(&report, config.report_format, &mut stdout)?;
    Ok(())
}
