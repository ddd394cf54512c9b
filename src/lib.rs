//! # Dirdigest
//!
//! `dirdigest` turns a directory tree into one flat, deterministic text
//! document: an optional ASCII tree of the structure followed by the contents
//! of every text file that survives the ignore/include rules. It is meant for
//! feeding whole codebases to tools that want a single self-describing input,
//! such as language models.
//!
//! The run is single-threaded and synchronous. Per-entry failures (an
//! unreadable directory, a binary file) are absorbed into the result; only an
//! existing output file, an invalid pattern, or a failed write abort a run.
//!
//! # Example
//!
//! ```no_run
//! use dirdigest::{DigestBuilder, WriteOutcome, run};
//!
//! let options = DigestBuilder::new(".")
//!     .output_path("digest.txt")
//!     .ignore_patterns(vec!["**/fixtures/**".into()])
//!     .include_patterns(vec!["**/*.rs".into(), "*.toml".into()])
//!     .build();
//!
//! match run(&options).expect("digest failed") {
//!     WriteOutcome::Written { path, processed_count, .. } => {
//!         println!("{} files written to {}", processed_count, path.display());
//!     }
//!     WriteOutcome::DryRun(summary) => println!("{:?}", summary.paths),
//! }
//! ```

mod collect;
mod engine;
mod error;
mod filter;
mod options;
mod output;
mod report;
mod tree;
mod types;
mod walk;

pub use collect::{Collection, UNREADABLE_REASON, collect_files, dry_run_placeholder};
pub use engine::{process_directory, process_directory_with, run};
pub use error::DigestError;
pub use filter::{DEFAULT_IGNORE_PATTERNS, PathFilter, relative_path};
pub use options::{BinaryDetection, DigestBuilder, DigestOptions};
pub use output::{
    DryRunSummary, RULE, WriteOutcome, assemble, ensure_output_available, render_document,
    write_document,
};
pub use report::{Reporter, TracingReporter};
pub use tree::render_tree;
pub use types::{DigestResult, FileRecord, RecordBody};
