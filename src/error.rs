use std::path::PathBuf;
use thiserror::Error;

/// Whole-run failures. Anything that goes wrong for a single entry during the
/// walk is absorbed into the result instead.
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Output file {path} already exists (use force to overwrite)")]
    OutputExists { path: PathBuf },
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
    #[error("Failed to write output to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DigestError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DigestError::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn pattern(pattern: impl Into<String>, reason: impl ToString) -> Self {
        DigestError::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }
}
