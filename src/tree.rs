//! Nested directory listing with `├── ` / `└── ` connectors.

use crate::filter::PathFilter;
use crate::options::DigestOptions;
use crate::report::Reporter;
use crate::walk::{WalkEntry, walk};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Walks `options.root` and renders every admitted entry.
///
/// Directories carry a trailing `/`. There is no line for the root itself and
/// no trailing newline; an empty tree renders as an empty string.
pub fn render_tree(options: &DigestOptions, filter: &PathFilter, reporter: &dyn Reporter) -> String {
    let entries = walk(options, filter, reporter);
    format_tree(&entries)
}

pub(crate) fn format_tree(entries: &[WalkEntry]) -> String {
    let last = last_child_flags(entries);
    let mut lines = Vec::with_capacity(entries.len());
    // Last-child flag of each open ancestor directory, outermost first.
    let mut ancestors: Vec<bool> = Vec::new();

    for (entry, is_last) in entries.iter().zip(last) {
        ancestors.truncate(entry.depth.saturating_sub(1));
        let mut line = String::new();
        for &ancestor_last in &ancestors {
            line.push_str(if ancestor_last { SPACE } else { PIPE });
        }
        line.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        line.push_str(&entry.name);
        if entry.is_dir {
            line.push('/');
            ancestors.push(is_last);
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// An entry is the last child when no later sibling follows before the walk
/// leaves its parent.
fn last_child_flags(entries: &[WalkEntry]) -> Vec<bool> {
    let mut flags = vec![false; entries.len()];
    let mut sibling_follows: Vec<bool> = Vec::new();
    for (index, entry) in entries.iter().enumerate().rev() {
        let depth = entry.depth;
        if sibling_follows.len() <= depth {
            sibling_follows.resize(depth + 1, false);
        }
        flags[index] = !sibling_follows[depth];
        sibling_follows[depth] = true;
        sibling_follows.truncate(depth + 1);
    }
    flags
}
