//! The single ordered traversal shared by tree rendering and content collection.

use crate::filter::{PathFilter, relative_path};
use crate::options::DigestOptions;
use crate::report::Reporter;
use ignore::WalkBuilder;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// An admitted directory or regular file, in walk order.
#[derive(Debug, Clone)]
pub(crate) struct WalkEntry {
    pub path: PathBuf,
    pub relative: String,
    pub name: String,
    /// 1 for direct children of the root.
    pub depth: usize,
    pub is_dir: bool,
}

/// Walks `options.root` depth-first. At every level directories come before
/// files and siblings are ordered by their raw file name.
///
/// Entries rejected by `filter` are dropped, and rejected directories are not
/// descended. A directory that cannot be listed is still returned but has no
/// children; the failure goes to `reporter` as a warning.
pub(crate) fn walk(
    options: &DigestOptions,
    filter: &PathFilter,
    reporter: &dyn Reporter,
) -> Vec<WalkEntry> {
    let root = options.root.clone();
    let follow_links = options.follow_links;
    let order = SiblingOrder::new(follow_links);

    let mut builder = WalkBuilder::new(&root);
    builder
        .standard_filters(false)
        .git_ignore(options.respect_gitignore)
        .git_exclude(options.respect_gitignore)
        .git_global(options.respect_gitignore)
        .require_git(false)
        .follow_links(follow_links)
        .max_depth(options.max_depth)
        .sort_by_file_path(move |a, b| order.compare(a, b));

    let entry_filter = filter.clone();
    let entry_root = root.clone();
    builder.filter_entry(move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        let Some(relative) = relative_path(entry.path(), &entry_root) else {
            return false;
        };
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        entry_filter.admits(entry.path(), &relative, is_dir)
    });

    let mut entries = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                reporter.warn(&format!("Skipping unreadable path: {}", err));
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let Some(file_type) = entry.file_type() else {
            continue;
        };
        let is_dir = file_type.is_dir();
        if !is_dir && !file_type.is_file() {
            tracing::debug!("Skipping special file: {}", entry.path().display());
            continue;
        }
        let Some(relative) = relative_path(entry.path(), &root) else {
            continue;
        };
        entries.push(WalkEntry {
            path: entry.path().to_path_buf(),
            name: entry.file_name().to_string_lossy().into_owned(),
            relative,
            depth: entry.depth(),
            is_dir,
        });
    }
    entries
}

/// Directories first, then raw file name. Each path is stat'ed once per walk;
/// the sort comparator otherwise hits the filesystem twice per comparison.
struct SiblingOrder {
    follow_links: bool,
    kinds: Mutex<HashMap<PathBuf, bool>>,
}

impl SiblingOrder {
    fn new(follow_links: bool) -> Self {
        Self {
            follow_links,
            kinds: Mutex::new(HashMap::new()),
        }
    }

    fn compare(&self, a: &Path, b: &Path) -> Ordering {
        let a_dir = self.is_directory(a);
        let b_dir = self.is_directory(b);
        b_dir
            .cmp(&a_dir)
            .then_with(|| a.file_name().cmp(&b.file_name()))
    }

    fn is_directory(&self, path: &Path) -> bool {
        let Ok(mut kinds) = self.kinds.lock() else {
            return stat_is_dir(path, self.follow_links);
        };
        if let Some(&is_dir) = kinds.get(path) {
            return is_dir;
        }
        let is_dir = stat_is_dir(path, self.follow_links);
        kinds.insert(path.to_path_buf(), is_dir);
        is_dir
    }
}

fn stat_is_dir(path: &Path, follow_links: bool) -> bool {
    let metadata = if follow_links {
        fs::metadata(path)
    } else {
        fs::symlink_metadata(path)
    };
    metadata.map(|m| m.is_dir()).unwrap_or(false)
}
