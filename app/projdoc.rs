//! Command-line interface for projdoc.
//!
//! Walks a project directory and writes a Markdown document with its tree,
//! the contents of its text files and some statistics.

use clap::Parser;
use projdoc::{
    ConfigFile, ProjdocError, ReportBuilder, ReportStyle, generate_report, timestamped_filename,
    write_report_to_file,
};
use std::fs;
use std::path::PathBuf;
use std::process::exit;
use tracing::Level;

const OUTPUT_BASE_NAME: &str = "PROJECT_STRUCTURE";

/// Generate a single document describing a project directory
#[derive(Parser)]
#[command(name = "projdoc", version, about, long_about = None)]
struct Cli {
    /// Base directory of the project
    #[arg(default_value = ".")]
    base_path: PathBuf,

    /// Output directory
    #[arg(short = 'o', long, default_value = ".")]
    output_dir: PathBuf,

    /// Directory names to ignore
    #[arg(short = 'i', long = "ignore", num_args = 0..)]
    ignore: Option<Vec<String>>,

    /// File extensions to treat as text files
    #[arg(short = 'e', long = "extensions", num_args = 0..)]
    extensions: Option<Vec<String>>,

    /// Max file size (bytes) for content
    #[arg(short = 'm', long = "max-size")]
    max_size: Option<u64>,

    /// Glob patterns to exclude (can be repeated)
    #[arg(short = 'x', long = "exclude")]
    exclude: Vec<String>,

    /// JSON config file with default settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// List symlinked directories without descending into them
    #[arg(long)]
    no_follow_links: bool,

    /// Write PROJECT_STRUCTURE.md instead of a timestamped file name
    #[arg(long)]
    no_timestamp: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

impl Cli {
    fn into_builder(self) -> Result<ReportBuilder, ProjdocError> {
        let mut builder = ReportBuilder::new(self.base_path);
        if let Some(path) = self.config {
            builder = ConfigFile::load(path)?.apply(builder);
        }
        if let Some(dirs) = self.ignore.filter(|d| !d.is_empty()) {
            builder = builder.ignored_dirs(dirs);
        }
        if let Some(extensions) = self.extensions.filter(|e| !e.is_empty()) {
            builder = builder.text_extensions(extensions);
        }
        if !self.exclude.is_empty() {
            builder = builder.exclude_patterns(self.exclude);
        }
        if let Some(limit) = self.max_size {
            builder = builder.file_size_limit(Some(limit));
        }
        if self.no_follow_links {
            builder = builder.follow_links(false);
        }
        Ok(builder)
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<PathBuf, ProjdocError> {
    let output_dir = cli.output_dir.clone();
    let no_timestamp = cli.no_timestamp;
    fs::create_dir_all(&output_dir).map_err(|e| ProjdocError::io(&output_dir, e))?;

    let now = chrono::Local::now().naive_local();
    let style = ReportStyle::Documentation;
    let output = if no_timestamp {
        output_dir.join(format!("{}.{}", OUTPUT_BASE_NAME, style.extension()))
    } else {
        timestamped_filename(&output_dir, OUTPUT_BASE_NAME, style.extension(), now)
    };

    let options = cli.into_builder()?.output(&output).build();
    let report = generate_report(&options)?;
    write_report_to_file(&report, style, now, &output)?;
    tracing::debug!(
        "Wrote {} files ({} text, {} binary)",
        report.stats.total_files,
        report.stats.text_files,
        report.stats.binary_files
    );

    Ok(fs::canonicalize(&output).unwrap_or(output))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(output) => {
            println!("\nDocumentation generated successfully!");
            println!("Output file: {}", output.display());
        }
        Err(e) => {
            tracing::error!("{}", e);
            exit(1);
        }
    }
}
