//! Export of generated summaries as downloadable text or PDF documents.

use chrono::{DateTime, Local, TimeZone};
use clap::ValueEnum;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const RULE: &str = "----------------------------------------";

/// A4 portrait, in millimetres
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const FONT_SIZE: f32 = 11.0;
const LINE_HEIGHT: f32 = 5.5;
/// Characters per line that fit between the margins at `FONT_SIZE`
const WRAP_WIDTH: usize = 90;
/// Lines between top and bottom margin at `LINE_HEIGHT` spacing
pub const LINES_PER_PAGE: usize = 46;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to build PDF: {0}")]
    Pdf(String),
}

/// File format of an exported report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Txt,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Guess the format from a file extension; `None` for anything unknown.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(ExportFormat::Txt),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }

    /// An explicit format wins, then the output extension, then plain text.
    pub fn resolve(requested: Option<Self>, output: &Path) -> Self {
        requested
            .or_else(|| ExportFormat::from_path(output))
            .unwrap_or_default()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Metadata printed above the summary in every report
pub struct ReportHeader<'a> {
    pub source_filename: &'a str,
    pub strategy_label: &'a str,
    pub model: &'a str,
}

impl ReportHeader<'_> {
    fn render<Tz: TimeZone>(&self, generated_at: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        format!(
            "PDF SUMMARY REPORT\n\
             {RULE}\n\
             Source:    {}\n\
             Type:      {}\n\
             Model:     {}\n\
             Generated: {}\n\
             {RULE}\n\n",
            truncate_filename(self.source_filename, 60),
            self.strategy_label,
            self.model,
            generated_at.format("%B %d, %Y at %I:%M %p"),
        )
    }
}

/// Render a summary as a plain-text report.
pub fn render<Tz: TimeZone>(
    summary_text: &str,
    header: &ReportHeader<'_>,
    generated_at: &DateTime<Tz>,
) -> Vec<u8>
where
    Tz::Offset: fmt::Display,
{
    let mut out = header.render(generated_at);
    out.push_str(summary_text.trim_end());
    out.push('\n');
    out.into_bytes()
}

/// Render a summary as an A4 PDF report, wrapping long lines and adding
/// pages as needed.
pub fn render_pdf<Tz: TimeZone>(
    summary_text: &str,
    header: &ReportHeader<'_>,
    generated_at: &DateTime<Tz>,
) -> Result<Vec<u8>, ExportError>
where
    Tz::Offset: fmt::Display,
{
    let lines = layout(&header.render(generated_at), summary_text);
    let (doc, first_page, first_layer) = PdfDocument::new(
        "PDF Summary Report",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    for (index, page_lines) in lines.chunks(LINES_PER_PAGE).enumerate() {
        let (page, layer) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1")
        };
        let layer = doc.get_page(page).get_layer(layer);
        let mut y = PAGE_HEIGHT - MARGIN;
        for line in page_lines {
            layer.use_text(line.as_str(), FONT_SIZE, Mm(MARGIN), Mm(y), &font);
            y -= LINE_HEIGHT;
        }
    }

    tracing::debug!(
        lines = lines.len(),
        pages = lines.len().div_ceil(LINES_PER_PAGE),
        "rendered pdf report"
    );
    doc.save_to_bytes()
        .map_err(|e| ExportError::Pdf(e.to_string()))
}

/// Render in the requested format
pub fn render_as<Tz: TimeZone>(
    format: ExportFormat,
    summary_text: &str,
    header: &ReportHeader<'_>,
    generated_at: &DateTime<Tz>,
) -> Result<Vec<u8>, ExportError>
where
    Tz::Offset: fmt::Display,
{
    match format {
        ExportFormat::Txt => Ok(render(summary_text, header, generated_at)),
        ExportFormat::Pdf => render_pdf(summary_text, header, generated_at),
    }
}

/// Header and summary as printable lines no wider than `WRAP_WIDTH`
fn layout(header: &str, summary_text: &str) -> Vec<String> {
    header
        .lines()
        .chain(summary_text.trim_end().lines())
        .flat_map(|line| textwrap::wrap(line, WRAP_WIDTH))
        .map(|line| line.into_owned())
        .collect()
}

/// Default export file name, e.g. `summary_20240131_142501.txt`
pub fn file_name(now: &DateTime<Local>, ext: &str) -> String {
    format!("summary_{}.{}", now.format("%Y%m%d_%H%M%S"), ext)
}

/// Resolve `--output`: directories get a timestamped file name
pub fn output_path(output: &Path, now: &DateTime<Local>, format: ExportFormat) -> PathBuf {
    if output.is_dir() {
        output.join(file_name(now, format.extension()))
    } else {
        output.to_path_buf()
    }
}

/// Shorten a file name to at most `max_len` characters, keeping its extension.
pub fn truncate_filename(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem, ext),
        None => (name, ""),
    };

    // room for "..." plus the extension
    let available = max_len as isize - ext.chars().count() as isize - 4;
    if available > 0 {
        let head: String = stem.chars().take(available as usize).collect();
        format!("{head}...{ext}")
    } else {
        name.chars().take(max_len).collect()
    }
}
