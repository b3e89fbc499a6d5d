//! Ordering walked entries and drawing them as a tree diagram.

use crate::options::EntryOrder;
use crate::types::TreeEntry;
use std::cmp::Ordering;
use std::path::Component;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Orders entries into depth-first pre-order, with siblings ordered by
/// `order`. Parents always come before their children.
pub(crate) fn compare_entries(a: &TreeEntry, b: &TreeEntry, order: EntryOrder) -> Ordering {
    let a_parts: Vec<Component> = a.path.components().collect();
    let b_parts: Vec<Component> = b.path.components().collect();
    for (i, (x, y)) in a_parts.iter().zip(&b_parts).enumerate() {
        if x == y {
            continue;
        }
        // Any component before the last one is a directory.
        let x_dir = i + 1 < a_parts.len() || a.is_dir;
        let y_dir = i + 1 < b_parts.len() || b.is_dir;
        return order.compare(x.as_os_str(), x_dir, y.as_os_str(), y_dir);
    }
    a_parts.len().cmp(&b_parts.len())
}

/// Draws sorted entries the way `tree` does, one line per entry, each line
/// terminated by a newline. Directories get a trailing `/`.
///
/// `entries` must be in pre-order: every directory directly followed by its
/// descendants.
pub fn render_tree(entries: &[TreeEntry]) -> String {
    let depths: Vec<usize> = entries.iter().map(|e| e.path.components().count()).collect();

    // Walking backwards, an entry is the last sibling if nothing at its depth
    // has been seen since its parent's region started.
    let mut is_last = vec![false; entries.len()];
    let mut seen: Vec<bool> = Vec::new();
    for (i, &depth) in depths.iter().enumerate().rev() {
        seen.resize(depth + 1, false);
        is_last[i] = !seen[depth];
        seen[depth] = true;
    }

    let mut out = String::new();
    let mut ancestors: Vec<bool> = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        let depth = depths[i];
        if depth == 0 {
            continue;
        }
        ancestors.truncate(depth - 1);
        for &last in &ancestors {
            out.push_str(if last { SPACE } else { PIPE });
        }
        out.push_str(if is_last[i] { LAST_BRANCH } else { BRANCH });
        let name = entry
            .path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        out.push_str(&name);
        if entry.is_dir {
            out.push('/');
            ancestors.push(is_last[i]);
        }
        out.push('\n');
    }
    out
}
