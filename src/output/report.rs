//! Run reports printed after a successful conversion

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use tabled::settings::Style;
use tabled::Tabled;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::config::ReportFormat;
use crate::model::{Column, Table};

/// Summary of one conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    /// Workbook that was written
    pub output: PathBuf,
    /// Number of CSV sources read
    pub sources: usize,
    /// Data rows written, header excluded
    pub records: usize,
    /// Columns with their final types
    pub columns: Vec<Column>,
}

impl ConversionReport {
    pub fn new(output: PathBuf, sources: usize, table: &Table) -> Self {
        Self {
            output,
            sources,
            records: table.row_count(),
            columns: table.columns.clone(),
        }
    }
}

/// Trait for report formatters
pub trait ReportRenderer {
    fn render(&self, report: &ConversionReport, writer: &mut dyn WriteColor) -> io::Result<()>;
}

/// Human-readable report with a column table
pub struct TextReport;

#[derive(Tabled)]
struct ColumnLine<'a> {
    #[tabled(rename = "column")]
    name: &'a str,
    #[tabled(rename = "type")]
    column_type: String,
}

impl ReportRenderer for TextReport {
    fn render(&self, report: &ConversionReport, writer: &mut dyn WriteColor) -> io::Result<()> {
        writer.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
        write!(writer, "Successfully converted")?;
        writer.reset()?;
        writeln!(
            writer,
            " {} records with {} columns to {}",
            report.records,
            report.columns.len(),
            report.output.display()
        )?;

        if report.columns.is_empty() {
            return Ok(());
        }
        let lines = report.columns.iter().map(|c| ColumnLine {
            name: &c.name,
            column_type: c.column_type.to_string(),
        });
        let mut table = tabled::Table::new(lines);
        table.with(Style::rounded());
        writeln!(writer, "{table}")
    }
}

/// Machine-readable report
pub struct JsonReport;

impl ReportRenderer for JsonReport {
    fn render(&self, report: &ConversionReport, writer: &mut dyn WriteColor) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *writer, report)?;
        writeln!(writer)
    }
}

/// Render a report in the requested format
pub fn render_report(
    report: &ConversionReport,
    format: ReportFormat,
    writer: &mut dyn WriteColor,
) -> io::Result<()> {
    let renderer: Box<dyn ReportRenderer> = match format {
        ReportFormat::Text => Box::new(TextReport),
        ReportFormat::Json => Box::new(JsonReport),
    };
    renderer.render(report, writer)
}
