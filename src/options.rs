use crate::policy::{ExtensionPolicy, InclusionPolicy, PathRulePolicy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::path::PathBuf;

/// Default content ceiling: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Sibling order inside each directory of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryOrder {
    /// Directories first, then files; names compared byte-wise.
    DirsFirst,
    /// Files first, then directories; names compared case-insensitively.
    FilesFirst,
}

impl EntryOrder {
    pub fn compare(self, a: &OsStr, a_is_dir: bool, b: &OsStr, b_is_dir: bool) -> Ordering {
        match self {
            EntryOrder::DirsFirst => b_is_dir.cmp(&a_is_dir).then_with(|| a.cmp(b)),
            EntryOrder::FilesFirst => a_is_dir.cmp(&b_is_dir).then_with(|| {
                let a_lower = a.to_string_lossy().to_lowercase();
                let b_lower = b.to_string_lossy().to_lowercase();
                a_lower.cmp(&b_lower).then_with(|| a.cmp(b))
            }),
        }
    }
}

/// How the bytes of a text file are turned into a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decoding {
    /// Strict UTF-8, falling back to encoding detection.
    Detect,
    /// UTF-8 with replacement characters for invalid sequences.
    Lossy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportOptions {
    pub root: PathBuf,
    /// Where the report will be written. It is left out of its own scan.
    pub output: Option<PathBuf>,
    pub policy: InclusionPolicy,
    pub order: EntryOrder,
    pub file_size_limit: Option<u64>,
    pub decoding: Decoding,
    /// Descend into symlinked directories. Cycles are detected and skipped.
    pub follow_links: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: None,
            policy: InclusionPolicy::default(),
            order: EntryOrder::DirsFirst,
            file_size_limit: Some(DEFAULT_MAX_FILE_SIZE),
            decoding: Decoding::Detect,
            follow_links: true,
        }
    }
}

impl ReportOptions {
    /// The fixed configuration used for frontend projects.
    pub fn frontend(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: None,
            policy: InclusionPolicy::PathRules(PathRulePolicy::frontend()),
            order: EntryOrder::FilesFirst,
            file_size_limit: None,
            decoding: Decoding::Lossy,
            follow_links: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct ReportBuilder {
    options: ReportOptions,
}

impl ReportBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: ReportOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn frontend(root: impl Into<PathBuf>) -> Self {
        Self {
            options: ReportOptions::frontend(root),
        }
    }
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output = Some(path.into());
        self
    }
    pub fn policy(mut self, policy: InclusionPolicy) -> Self {
        self.options.policy = policy;
        self
    }
    /// Replaces the ignored directory names. Switches to the extension
    /// policy if another policy was set.
    pub fn ignored_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extension_policy().ignored_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }
    /// Replaces the text extensions. Switches to the extension policy if
    /// another policy was set.
    pub fn text_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extension_policy().text_extensions =
            extensions.into_iter().map(Into::into).collect();
        self
    }
    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.extension_policy().exclude_patterns = patterns;
        self
    }
    pub fn order(mut self, order: EntryOrder) -> Self {
        self.options.order = order;
        self
    }
    pub fn file_size_limit(mut self, limit: Option<u64>) -> Self {
        self.options.file_size_limit = limit;
        self
    }
    pub fn decoding(mut self, decoding: Decoding) -> Self {
        self.options.decoding = decoding;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn build(self) -> ReportOptions {
        self.options
    }

    fn extension_policy(&mut self) -> &mut ExtensionPolicy {
        if !matches!(self.options.policy, InclusionPolicy::Extensions(_)) {
            self.options.policy = InclusionPolicy::Extensions(ExtensionPolicy::default());
        }
        match &mut self.options.policy {
            InclusionPolicy::Extensions(policy) => policy,
            InclusionPolicy::PathRules(_) => unreachable!("policy was replaced above"),
        }
    }
}
