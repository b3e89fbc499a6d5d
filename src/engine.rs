use crate::decode::read_text_file;
use crate::error::ProjdocError;
use crate::options::ReportOptions;
use crate::policy::{Classifier, FileClass};
use crate::tree::{compare_entries, render_tree};
use crate::types::{FileContent, FileEntry, ProjectReport, Statistics, TreeEntry};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

struct Walked {
    entry: TreeEntry,
    size: u64,
}

struct Walker {
    inner: ignore::Walk,
}

impl Walker {
    fn new(root: &Path, options: &ReportOptions, classifier: Classifier) -> Self {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(options.follow_links);
        let filter_root = root.to_path_buf();
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let Ok(relative) = entry.path().strip_prefix(&filter_root) else {
                return true;
            };
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            let excluded = classifier.is_excluded(relative, is_dir);
            if excluded {
                tracing::debug!("Excluded {}", relative.display());
            }
            !excluded
        });
        Self {
            inner: builder.build(),
        }
    }

    /// Drains the walk. Unreadable directories and files are logged and
    /// skipped so one bad subtree never aborts the run.
    fn collect_entries(self, root: &Path, skip: Option<&Path>) -> Vec<Walked> {
        let mut walked = Vec::new();
        for result in self.inner {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable path: {}", e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let path = entry.path();
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };
            if skip == Some(relative) {
                tracing::debug!("Skipping report output {}", relative.display());
                continue;
            }
            if entry.file_type().is_some_and(|t| t.is_dir()) {
                walked.push(Walked {
                    entry: TreeEntry {
                        path: relative.to_path_buf(),
                        is_dir: true,
                    },
                    size: 0,
                });
                continue;
            }
            match fs::metadata(path) {
                Ok(metadata) if metadata.is_file() => walked.push(Walked {
                    entry: TreeEntry {
                        path: relative.to_path_buf(),
                        is_dir: false,
                    },
                    size: metadata.len(),
                }),
                Ok(metadata) if metadata.is_dir() => {
                    tracing::warn!(
                        "Not following symlinked directory {}",
                        relative.display()
                    );
                    walked.push(Walked {
                        entry: TreeEntry {
                            path: relative.to_path_buf(),
                            is_dir: true,
                        },
                        size: 0,
                    });
                }
                Ok(_) => tracing::debug!("Skipping {}: not a regular file", path.display()),
                Err(e) => tracing::warn!("Cannot access file {}: {}", path.display(), e),
            }
        }
        walked
    }
}

/// Scans `options.root` and decides the content of every visited file.
///
/// Only setup problems are returned as errors: a missing or non-directory
/// root, or an invalid glob pattern. Everything that goes wrong during the
/// walk itself is logged and absorbed.
pub fn generate_report(options: &ReportOptions) -> Result<ProjectReport, ProjdocError> {
    let root =
        fs::canonicalize(&options.root).map_err(|e| ProjdocError::io(&options.root, e))?;
    if !root.is_dir() {
        return Err(ProjdocError::InvalidPath(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    tracing::debug!("Starting scan of {}", root.display());
    let classifier = Classifier::new(&options.policy)?;
    let skip = options
        .output
        .as_deref()
        .and_then(|output| output_relative_to(&root, output));

    let mut walked =
        Walker::new(&root, options, classifier.clone()).collect_entries(&root, skip.as_deref());
    walked.sort_by(|a, b| compare_entries(&a.entry, &b.entry, options.order));

    let tree_entries: Vec<TreeEntry> = walked.iter().map(|w| w.entry.clone()).collect();
    let tree = render_tree(&tree_entries);

    let mut stats = Statistics::default();
    let mut files = Vec::new();
    for Walked { entry, size } in walked {
        if entry.is_dir {
            continue;
        }
        let class = classifier.classify(&entry.path);
        stats.record(class, size);
        let content = match class {
            FileClass::Binary => FileContent::Binary,
            FileClass::StructureOnly => FileContent::StructureOnly,
            FileClass::Text => read_content(&root.join(&entry.path), size, options),
        };
        files.push(FileEntry {
            path: entry.path,
            size,
            class,
            content,
        });
    }

    let root_name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    Ok(ProjectReport {
        root_name,
        tree,
        files,
        stats,
    })
}

fn read_content(path: &Path, size: u64, options: &ReportOptions) -> FileContent {
    if size == 0 {
        return FileContent::Empty;
    }
    if let Some(limit) = options.file_size_limit {
        if size > limit {
            tracing::info!("Skipped large file: {} ({} > {})", path.display(), size, limit);
            return FileContent::TooLarge;
        }
    }
    read_text_file(path, options.decoding)
}

/// Where the output file sits relative to `root`, if it sits inside it.
/// The file itself need not exist yet.
fn output_relative_to(root: &Path, output: &Path) -> Option<PathBuf> {
    let file_name = output.file_name()?;
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let parent = fs::canonicalize(parent).ok()?;
    parent
        .join(file_name)
        .strip_prefix(root)
        .ok()
        .map(Path::to_path_buf)
}
