use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How file bytes are probed before UTF-8 decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryDetection {
    /// Treat any NUL byte in the first block as binary.
    Simple,
    /// Classify the first block with `content_inspector`. Text that starts
    /// with a known magic signature such as `%PDF` is reported as binary.
    Accurate,
    /// Rely on UTF-8 decoding alone. The default.
    None,
}

/// Configuration for one run. Immutable once the run starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestOptions {
    pub root: PathBuf,
    pub output_path: PathBuf,
    pub ignore_patterns: Vec<String>,
    pub include_patterns: Vec<String>,
    pub include_tree: bool,
    pub dry_run: bool,
    pub force: bool,
    pub quiet: bool,
    /// Merge [`DEFAULT_IGNORE_PATTERNS`](crate::DEFAULT_IGNORE_PATTERNS) into the ignore set.
    pub default_ignores: bool,
    pub respect_gitignore: bool,
    pub follow_links: bool,
    pub max_depth: Option<usize>,
    pub binary_detection: BinaryDetection,
}

impl Default for DigestOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output_path: PathBuf::from("digest.txt"),
            ignore_patterns: Vec::new(),
            include_patterns: Vec::new(),
            include_tree: true,
            dry_run: false,
            force: false,
            quiet: false,
            default_ignores: true,
            respect_gitignore: false,
            follow_links: false,
            max_depth: None,
            binary_detection: BinaryDetection::None,
        }
    }
}

#[derive(Debug, Default)]
pub struct DigestBuilder {
    options: DigestOptions,
}

impl DigestBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: DigestOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output_path = path.into();
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn include_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.include_patterns = patterns;
        self
    }
    pub fn include_tree(mut self, yes: bool) -> Self {
        self.options.include_tree = yes;
        self
    }
    pub fn dry_run(mut self, yes: bool) -> Self {
        self.options.dry_run = yes;
        self
    }
    pub fn force(mut self, yes: bool) -> Self {
        self.options.force = yes;
        self
    }
    pub fn quiet(mut self, yes: bool) -> Self {
        self.options.quiet = yes;
        self
    }
    pub fn default_ignores(mut self, yes: bool) -> Self {
        self.options.default_ignores = yes;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.options.max_depth = Some(depth);
        self
    }
    pub fn no_limit_depth(mut self) -> Self {
        self.options.max_depth = None;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn build(self) -> DigestOptions {
        self.options
    }
}
