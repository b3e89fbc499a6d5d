//! Inclusion policies deciding which entries are walked and which file
//! contents end up in the report.
//!
//! Both policies look at the path relative to the scanned root only. No file
//! is opened to classify it.

use crate::error::ProjdocError;
use crate::types::slash_path;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

const DEFAULT_IGNORED_DIRS: &[&str] = &["venv", "__pycache__", ".git", "node_modules"];

const DEFAULT_TEXT_EXTENSIONS: &[&str] = &[
    ".py", ".txt", ".md", ".json", ".yaml", ".yml", ".js", ".jsx", ".ts", ".tsx", ".css", ".scss",
    ".html", ".htm", ".xml", ".csv", ".ini", ".cfg", ".prompt",
];

/// Name of the report written by the frontend preset.
pub const FRONTEND_OUTPUT_FILENAME: &str = "frontend_context.txt";

const FRONTEND_SOURCE_DIRS: &[&str] = &["src/"];

const FRONTEND_INCLUDE_FILES: &[&str] = &["package.json", "public/index.html"];

const FRONTEND_EXCLUDE: &[&str] = &[
    "node_modules",
    "build",
    "dist",
    ".git",
    ".vscode",
    "package-lock.json",
    "yarn.lock",
    ".env",
    "reportWebVitals.js",
    "setupTests.js",
    FRONTEND_OUTPUT_FILENAME,
    "generate_frontend_context.py",
    ".log",
    ".ico",
    ".png",
    ".jpg",
    ".jpeg",
    ".gif",
    ".svg",
    ".woff",
    ".woff2",
    ".ttf",
    ".eot",
];

/// How a visited file is treated in the content section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileClass {
    /// Content is read and embedded.
    Text,
    /// Listed with a binary placeholder, never read.
    Binary,
    /// Listed in the tree only.
    StructureOnly,
}

/// Extension allow-list policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionPolicy {
    /// Directory names that are never descended into, matched by exact name.
    pub ignored_dirs: BTreeSet<String>,
    /// Extensions whose files are embedded. Matched case-insensitively; the
    /// leading dot is optional.
    pub text_extensions: BTreeSet<String>,
    /// Glob patterns on the relative path that drop an entry entirely.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

impl Default for ExtensionPolicy {
    fn default() -> Self {
        Self {
            ignored_dirs: DEFAULT_IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            text_extensions: DEFAULT_TEXT_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            exclude_patterns: Vec::new(),
        }
    }
}

/// Prefix/include/exclude policy used for frontend projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathRulePolicy {
    /// Segment names (`node_modules`, `yarn.lock`) and extensions with their
    /// leading dot (`.png`) that drop an entry entirely.
    pub exclude: BTreeSet<String>,
    /// Relative directory prefixes whose files are embedded, e.g. `src/`.
    pub source_dirs: Vec<String>,
    /// Glob patterns for individual files embedded outside the source dirs.
    pub include_files: Vec<String>,
}

impl PathRulePolicy {
    pub fn frontend() -> Self {
        Self {
            exclude: FRONTEND_EXCLUDE.iter().map(|s| s.to_string()).collect(),
            source_dirs: FRONTEND_SOURCE_DIRS.iter().map(|s| s.to_string()).collect(),
            include_files: FRONTEND_INCLUDE_FILES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InclusionPolicy {
    Extensions(ExtensionPolicy),
    PathRules(PathRulePolicy),
}

impl Default for InclusionPolicy {
    fn default() -> Self {
        InclusionPolicy::Extensions(ExtensionPolicy::default())
    }
}

/// An [`InclusionPolicy`] with its patterns compiled, ready to answer
/// per-path questions during a walk.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Rules,
}

#[derive(Debug, Clone)]
enum Rules {
    Extensions {
        ignored_dirs: HashSet<String>,
        text_extensions: HashSet<String>,
        excludes: GlobSet,
    },
    PathRules {
        exclude: HashSet<String>,
        source_dirs: Vec<String>,
        includes: GlobSet,
    },
}

impl Classifier {
    pub fn new(policy: &InclusionPolicy) -> Result<Self, ProjdocError> {
        let rules = match policy {
            InclusionPolicy::Extensions(p) => Rules::Extensions {
                ignored_dirs: p.ignored_dirs.iter().cloned().collect(),
                text_extensions: p
                    .text_extensions
                    .iter()
                    .map(|e| normalize_extension(e))
                    .collect(),
                excludes: build_globset(&p.exclude_patterns)?,
            },
            InclusionPolicy::PathRules(p) => Rules::PathRules {
                exclude: p.exclude.iter().cloned().collect(),
                source_dirs: p
                    .source_dirs
                    .iter()
                    .map(|d| {
                        let d = d.trim_start_matches("./").trim_end_matches('/');
                        format!("{}/", d)
                    })
                    .collect(),
                includes: build_globset(&p.include_files)?,
            },
        };
        Ok(Self { rules })
    }

    /// Whether an entry is left out of the walk. For directories this also
    /// prunes everything beneath them.
    pub fn is_excluded(&self, relative: &Path, is_dir: bool) -> bool {
        match &self.rules {
            Rules::Extensions {
                ignored_dirs,
                excludes,
                ..
            } => {
                if is_dir
                    && relative
                        .file_name()
                        .is_some_and(|n| ignored_dirs.contains(&*n.to_string_lossy()))
                {
                    return true;
                }
                !excludes.is_empty() && excludes.is_match(slash_path(relative).as_str())
            }
            Rules::PathRules { exclude, .. } => {
                if relative
                    .components()
                    .any(|c| exclude.contains(&*c.as_os_str().to_string_lossy()))
                {
                    return true;
                }
                relative
                    .extension()
                    .is_some_and(|ext| exclude.contains(&format!(".{}", ext.to_string_lossy())))
            }
        }
    }

    pub fn classify(&self, relative: &Path) -> FileClass {
        match &self.rules {
            Rules::Extensions {
                text_extensions, ..
            } => {
                let is_text = relative
                    .extension()
                    .is_some_and(|ext| text_extensions.contains(&ext.to_string_lossy().to_lowercase()));
                if is_text {
                    FileClass::Text
                } else {
                    FileClass::Binary
                }
            }
            Rules::PathRules {
                source_dirs,
                includes,
                ..
            } => {
                let slashed = slash_path(relative);
                if source_dirs.iter().any(|d| slashed.starts_with(d.as_str()))
                    || includes.is_match(slashed.as_str())
                {
                    FileClass::Text
                } else {
                    FileClass::StructureOnly
                }
            }
        }
    }
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, ProjdocError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ProjdocError::Glob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ProjdocError::Glob {
        pattern: patterns.join(", "),
        source,
    })
}
