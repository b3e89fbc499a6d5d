//! Writes `frontend_context.txt` for the frontend project in the current
//! directory, using a fixed set of include and exclude rules.

use clap::Parser;
use projdoc::{
    FRONTEND_OUTPUT_FILENAME, ProjdocError, ReportBuilder, ReportStyle, generate_report,
    write_report_to_file,
};
use std::env;
use std::path::PathBuf;
use std::process::exit;
use tracing::Level;

/// Dump a frontend project's sources into one text file
#[derive(Parser)]
#[command(name = "frontend-context", version, about, long_about = None)]
struct Cli {}

fn run() -> Result<PathBuf, ProjdocError> {
    let root = env::current_dir().map_err(|e| ProjdocError::io(".", e))?;
    let output = root.join(FRONTEND_OUTPUT_FILENAME);
    let options = ReportBuilder::frontend(&root).output(&output).build();

    let report = generate_report(&options)?;
    let now = chrono::Local::now().naive_local();
    write_report_to_file(&report, ReportStyle::Context, now, &output)?;
    Ok(output)
}

fn main() {
    Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    println!("Generating frontend context...");
    match run() {
        Ok(output) => println!(
            "Frontend context successfully generated in '{}'",
            output.display()
        ),
        Err(e) => {
            tracing::error!("{}", e);
            exit(1);
        }
    }
}
