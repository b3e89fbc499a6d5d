//! # projdoc
//!
//! `projdoc` walks a project directory and writes one document describing it:
//! a directory tree, the contents of the files worth reading, and a few
//! statistics.
//!
//! Which entries are walked and which files get their content embedded is
//! decided by an [`InclusionPolicy`]: either an extension allow-list with
//! ignored directory names ([`ExtensionPolicy`]) or prefix and include rules
//! ([`PathRulePolicy`]). Text is decoded as UTF-8, falling back to encoding
//! detection for legacy files.
//!
//! # Example
//!
//! ```no_run
//! use projdoc::{ReportBuilder, ReportStyle, generate_report, write_report_to_file};
//!
//! let options = ReportBuilder::new(".")
//!     .ignored_dirs(["target", ".git"])
//!     .text_extensions([".rs", ".toml", ".md"])
//!     .file_size_limit(Some(1024 * 1024))
//!     .output("PROJECT_STRUCTURE.md")
//!     .build();
//!
//! let report = generate_report(&options).expect("Failed to scan directory");
//! let now = chrono::Local::now().naive_local();
//! write_report_to_file(&report, ReportStyle::Documentation, now, "PROJECT_STRUCTURE.md")
//!     .expect("Failed to write report");
//! ```

mod config;
mod decode;
mod engine;
mod error;
mod options;
pub mod output;
mod policy;
mod tree;
mod types;

pub use config::ConfigFile;
pub use decode::{decode_bytes, detect_encoding};
pub use engine::generate_report;
pub use error::ProjdocError;
pub use options::{DEFAULT_MAX_FILE_SIZE, Decoding, EntryOrder, ReportBuilder, ReportOptions};
pub use output::{
    ReportStyle, format_report, format_size, timestamped_filename, write_report,
    write_report_to_file,
};
pub use policy::{
    Classifier, ExtensionPolicy, FRONTEND_OUTPUT_FILENAME, FileClass, InclusionPolicy,
    PathRulePolicy,
};
pub use tree::render_tree;
pub use types::{FileContent, FileEntry, ProjectReport, Statistics, TreeEntry, slash_path};
