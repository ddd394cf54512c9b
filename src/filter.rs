//! Ignore/include rule evaluation.
//!
//! Every decision is made on the path relative to the walk root with `/` as
//! the only separator, so the same rules behave identically on every host.
//! A directory is tested with its own relative path only; since ignored
//! directories are never descended, ancestor matches are covered by pruning.

use crate::error::DigestError;
use crate::options::DigestOptions;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Component, Path, PathBuf};

/// Well-known VCS, dependency, build, binary and media paths.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    // version control
    "**/.git",
    "**/.git/**",
    "**/.svn",
    "**/.svn/**",
    "**/.hg",
    "**/.hg/**",
    // dependencies and build output
    "**/node_modules",
    "**/node_modules/**",
    "**/bower_components/**",
    "**/vendor/bundle/**",
    "**/target",
    "**/target/**",
    "**/dist",
    "**/dist/**",
    "**/build",
    "**/build/**",
    "**/out/**",
    "**/coverage/**",
    "**/.next/**",
    "**/.nuxt/**",
    "**/.cache/**",
    "**/__pycache__",
    "**/__pycache__/**",
    "**/.venv/**",
    "**/venv/**",
    "**/.tox/**",
    "**/.gradle/**",
    "**/.idea/**",
    "**/.vscode/**",
    // lock files
    "**/package-lock.json",
    "**/yarn.lock",
    "**/pnpm-lock.yaml",
    "**/Cargo.lock",
    "**/composer.lock",
    "**/poetry.lock",
    "**/Gemfile.lock",
    // compiled artifacts
    "**/*.o",
    "**/*.obj",
    "**/*.a",
    "**/*.lib",
    "**/*.so",
    "**/*.dylib",
    "**/*.dll",
    "**/*.exe",
    "**/*.class",
    "**/*.jar",
    "**/*.pyc",
    "**/*.pyo",
    "**/*.wasm",
    "**/*.min.js",
    "**/*.min.css",
    "**/*.map",
    // archives
    "**/*.zip",
    "**/*.tar",
    "**/*.gz",
    "**/*.tgz",
    "**/*.bz2",
    "**/*.xz",
    "**/*.7z",
    "**/*.rar",
    // media and documents
    "**/*.png",
    "**/*.jpg",
    "**/*.jpeg",
    "**/*.gif",
    "**/*.bmp",
    "**/*.ico",
    "**/*.webp",
    "**/*.svg",
    "**/*.mp3",
    "**/*.mp4",
    "**/*.wav",
    "**/*.ogg",
    "**/*.webm",
    "**/*.mov",
    "**/*.avi",
    "**/*.pdf",
    "**/*.woff",
    "**/*.woff2",
    "**/*.ttf",
    "**/*.otf",
    "**/*.eot",
    // os metadata
    "**/.DS_Store",
    "**/Thumbs.db",
];

/// Merged ignore set plus include set for one run.
#[derive(Debug, Clone)]
pub struct PathFilter {
    ignore: GlobSet,
    include: GlobSet,
    has_includes: bool,
    output_path: Option<PathBuf>,
}

impl PathFilter {
    /// Builds a filter from explicit rule lists.
    ///
    /// When `output_path` is given, its absolute form is always excluded and a
    /// pattern matching its file name anywhere in the tree is added to the
    /// ignore set.
    ///
    /// # Errors
    ///
    /// Returns [`DigestError::InvalidPattern`] for a pattern `globset` rejects.
    pub fn new(
        ignore_patterns: &[String],
        include_patterns: &[String],
        output_path: Option<&Path>,
    ) -> Result<Self, DigestError> {
        let mut ignore: Vec<String> = ignore_patterns.to_vec();
        if let Some(name) = output_path.and_then(|p| p.file_name()) {
            ignore.push(format!("**/{}", globset::escape(&name.to_string_lossy())));
        }
        Ok(Self {
            ignore: build_glob_set(&ignore)?,
            include: build_glob_set(include_patterns)?,
            has_includes: !include_patterns.is_empty(),
            output_path: output_path.map(absolutize),
        })
    }

    /// Builds the filter a run uses: baseline (unless disabled) plus user
    /// ignores, user includes, and the output file.
    pub fn from_options(options: &DigestOptions) -> Result<Self, DigestError> {
        let mut ignore: Vec<String> = if options.default_ignores {
            DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect()
        } else {
            Vec::new()
        };
        ignore.extend(options.ignore_patterns.iter().cloned());
        Self::new(&ignore, &options.include_patterns, Some(&options.output_path))
    }

    pub fn is_ignored(&self, relative_path: &str) -> bool {
        self.ignore.is_match(relative_path)
    }

    /// True when no include rules exist or one of them matches.
    pub fn is_included(&self, relative_path: &str) -> bool {
        !self.has_includes || self.include.is_match(relative_path)
    }

    pub fn is_output(&self, path: &Path) -> bool {
        self.output_path
            .as_deref()
            .is_some_and(|output| absolutize(path).as_path() == output)
    }

    /// Full admission decision for one entry. Ignore wins over include, and
    /// include rules never prune directories.
    pub fn admits(&self, path: &Path, relative_path: &str, is_dir: bool) -> bool {
        if self.is_output(path) || self.is_ignored(relative_path) {
            return false;
        }
        is_dir || self.is_included(relative_path)
    }
}

/// Converts `path` under `root` to its `/`-separated relative form.
///
/// Returns `None` for the root itself or a path outside it.
pub fn relative_path(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, DigestError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let mut processed = pattern.trim().to_string();
        if processed.ends_with('/') && processed.len() > 1 {
            processed.push_str("**");
        }
        let glob = Glob::new(&processed).map_err(|e| DigestError::pattern(pattern.as_str(), e))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| DigestError::pattern(patterns.join(", "), e))
}
