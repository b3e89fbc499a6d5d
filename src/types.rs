use crate::policy::FileClass;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One line of the directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the scanned root.
    pub path: PathBuf,
    pub is_dir: bool,
}

/// What the report shows for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FileContent {
    /// Decoded text with null bytes removed.
    Text(String),
    /// The file has zero bytes.
    Empty,
    /// The file is above the content ceiling and was not read.
    TooLarge,
    /// The extension is not in the text allow-list.
    Binary,
    /// The file is listed in the tree only.
    StructureOnly,
    /// Not valid UTF-8 and no encoding could be guessed.
    Undetectable,
    /// Reading failed; holds the error message.
    Error(String),
}

/// A single file entry with its path, size, and decided content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the scanned root.
    pub path: PathBuf,
    /// On-disk size in bytes.
    pub size: u64,
    pub class: FileClass,
    pub content: FileContent,
}

/// Counters accumulated across one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_files: usize,
    pub text_files: usize,
    pub binary_files: usize,
    pub structure_only_files: usize,
    pub total_size: u64,
}

impl Statistics {
    pub(crate) fn record(&mut self, class: FileClass, size: u64) {
        self.total_files += 1;
        self.total_size += size;
        match class {
            FileClass::Text => self.text_files += 1,
            FileClass::Binary => self.binary_files += 1,
            FileClass::StructureOnly => self.structure_only_files += 1,
        }
    }
}

/// The complete result of one scan, ready to be rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectReport {
    /// Name of the scanned root directory.
    pub root_name: String,
    /// Rendered tree diagram, one line per entry.
    pub tree: String,
    /// Files in tree order.
    pub files: Vec<FileEntry>,
    pub stats: Statistics,
}

/// Renders a relative path with `/` separators regardless of platform.
pub fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
