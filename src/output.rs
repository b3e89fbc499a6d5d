//! Output formatting for project reports.
//!
//! Provides functions to render a [`ProjectReport`] as a Markdown
//! documentation file or as a plain-text context file. Rendering works only
//! from the report; it never touches the filesystem except to write the
//! final document.

use crate::types::{FileContent, FileEntry, ProjectReport, slash_path};
use crate::{ProjdocError, Statistics};
use chrono::NaiveDateTime;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Supported report layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStyle {
    /// Markdown with a header, tree, fenced file contents and statistics.
    Documentation,
    /// Plain text sections for feeding a project into another tool.
    Context,
}

impl ReportStyle {
    /// Returns the conventional file extension for this style.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportStyle::Documentation => "md",
            ReportStyle::Context => "txt",
        }
    }
}

/// Converts a byte count to a human-readable size with two decimals,
/// stepping by 1024 from B up to PB.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in SIZE_UNITS {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} PB", size)
}

/// Builds `<dir>/<base_name>_<YYYYMMDD_HHMMSS>.<extension>`.
pub fn timestamped_filename(
    dir: impl AsRef<Path>,
    base_name: &str,
    extension: &str,
    at: NaiveDateTime,
) -> PathBuf {
    dir.as_ref().join(format!(
        "{}_{}.{}",
        base_name,
        at.format(FILENAME_TIMESTAMP_FORMAT),
        extension
    ))
}

/// Writes the report to `out` in the given style.
pub fn write_report<W: Write>(
    report: &ProjectReport,
    style: ReportStyle,
    generated_at: NaiveDateTime,
    out: &mut W,
) -> io::Result<()> {
    match style {
        ReportStyle::Documentation => write_documentation(report, generated_at, out),
        ReportStyle::Context => write_context(report, generated_at, out),
    }
}

/// Formats the report into a string.
pub fn format_report(
    report: &ProjectReport,
    style: ReportStyle,
    generated_at: NaiveDateTime,
) -> String {
    let mut buf = Vec::with_capacity(4096);
    write_report(report, style, generated_at, &mut buf).expect("writing to a Vec failed");
    String::from_utf8_lossy(&buf).into_owned()
}

/// Writes the report to a file, creating or truncating it.
pub fn write_report_to_file(
    report: &ProjectReport,
    style: ReportStyle,
    generated_at: NaiveDateTime,
    path: impl AsRef<Path>,
) -> Result<(), ProjdocError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| ProjdocError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_report(report, style, generated_at, &mut writer).map_err(|e| ProjdocError::io(path, e))?;
    writer.flush().map_err(|e| ProjdocError::io(path, e))?;
    Ok(())
}

// ----------------------- Documentation (Markdown) -----------------------

fn write_documentation<W: Write>(
    report: &ProjectReport,
    generated_at: NaiveDateTime,
    out: &mut W,
) -> io::Result<()> {
    write!(out, "# Project Documentation\n\n")?;
    write!(
        out,
        "Generated on: {}\n\n",
        generated_at.format(TIMESTAMP_FORMAT)
    )?;
    write!(out, "## Directory Structure\n{}\n", report.root_name)?;
    out.write_all(report.tree.as_bytes())?;

    write!(out, "\n## File Contents\n\n")?;
    for file in &report.files {
        write_documentation_entry(file, out)?;
    }

    write_documentation_stats(&report.stats, out)
}

fn write_documentation_entry<W: Write>(file: &FileEntry, out: &mut W) -> io::Result<()> {
    write!(
        out,
        "\n### {} ({})\n\n",
        slash_path(&file.path),
        format_size(file.size)
    )?;
    let lang = file
        .path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    match &file.content {
        FileContent::Text(text) => writeln!(out, "```{}\n{}\n```", lang, text),
        FileContent::Empty => writeln!(out, "```\n*Empty file*\n```"),
        FileContent::TooLarge => writeln!(out, "*File too large to display.*"),
        FileContent::Binary => {
            writeln!(out, "*Binary or unsupported file format based on extension*")
        }
        FileContent::Undetectable => writeln!(
            out,
            "```{}\n*Error reading file: Could not detect encoding*\n```",
            lang
        ),
        FileContent::Error(message) => {
            writeln!(out, "```{}\n*Error reading file: {}*\n```", lang, message)
        }
        FileContent::StructureOnly => writeln!(out, "*Listed in structure only*"),
    }
}

fn write_documentation_stats<W: Write>(stats: &Statistics, out: &mut W) -> io::Result<()> {
    write!(out, "\n## Project Statistics\n\n")?;
    writeln!(out, "- Total Files: {}", stats.total_files)?;
    writeln!(out, "- Text Files: {}", stats.text_files)?;
    writeln!(out, "- Binary Files: {}", stats.binary_files)?;
    if stats.structure_only_files > 0 {
        writeln!(out, "- Structure-only Files: {}", stats.structure_only_files)?;
    }
    writeln!(out, "- Total Size: {}", format_size(stats.total_size))
}

// ----------------------- Context (plain text) -----------------------

fn write_context<W: Write>(
    report: &ProjectReport,
    generated_at: NaiveDateTime,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "--- Project Context: {} ---", report.root_name)?;
    writeln!(out, "Generated on: {}", generated_at.format(TIMESTAMP_FORMAT))?;

    writeln!(out, "\n--- Directory Structure ---")?;
    out.write_all(report.tree.as_bytes())?;

    writeln!(out, "\n--- File Contents ---")?;
    for file in &report.files {
        let body: Cow<'_, str> = match &file.content {
            FileContent::StructureOnly => continue,
            FileContent::Text(text) if !text.trim().is_empty() => Cow::Borrowed(text.as_str()),
            FileContent::Text(_) | FileContent::Empty => Cow::Borrowed("*File is empty*"),
            FileContent::TooLarge => Cow::Borrowed("*File too large to display.*"),
            FileContent::Binary => Cow::Borrowed("*Binary file, content omitted*"),
            FileContent::Undetectable => {
                Cow::Borrowed("Error reading file: could not detect encoding")
            }
            FileContent::Error(message) => Cow::Owned(format!("Error reading file: {}", message)),
        };
        write!(out, "\n### {} ###\n```\n", slash_path(&file.path))?;
        out.write_all(body.as_bytes())?;
        write!(out, "\n```\n")?;
    }

    writeln!(out, "\n--- Statistics ---")?;
    let stats = &report.stats;
    writeln!(
        out,
        "Total Files Scanned (excluding noise): {}",
        stats.total_files
    )?;
    writeln!(out, "Files with Full Content Included: {}", stats.text_files)?;
    writeln!(
        out,
        "Files Listed in Structure Only: {}",
        stats.structure_only_files + stats.binary_files
    )
}
