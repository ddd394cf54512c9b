//! Result assembly: the digest document, the dry-run summary, and the guarded
//! atomic write.

use crate::error::DigestError;
use crate::options::DigestOptions;
use crate::types::{DigestResult, RecordBody};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Separator line framing the tree and every file header.
pub const RULE: &str = "================================================";

const TREE_HEADING: &str = "Directory Structure:";
const FILES_HEADING: &str = "File Contents:";
const EMPTY_TREE: &str = "(empty)";
const NO_FILES: &str = "No files were included.";

/// What a dry run would have produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DryRunSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    pub paths: Vec<String>,
    pub processed_count: usize,
    pub destination: PathBuf,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written {
        path: PathBuf,
        processed_count: usize,
        bytes: usize,
    },
    DryRun(DryRunSummary),
}

/// Fails with [`DigestError::OutputExists`] when a real, non-forced run would
/// overwrite an existing file.
pub fn ensure_output_available(options: &DigestOptions) -> Result<(), DigestError> {
    if options.dry_run || options.force {
        return Ok(());
    }
    if options.output_path.exists() {
        return Err(DigestError::OutputExists {
            path: options.output_path.clone(),
        });
    }
    Ok(())
}

/// Renders the digest document.
///
/// The tree section is present only when the result carries a tree. File
/// bodies lose their trailing line breaks so that blocks stay one blank line
/// apart, and the whole document is trimmed at the end.
pub fn render_document(result: &DigestResult) -> String {
    let mut sections = Vec::with_capacity(2);

    if let Some(tree) = &result.tree {
        let body = if tree.trim().is_empty() {
            EMPTY_TREE
        } else {
            tree.trim_end()
        };
        sections.push(format!("{TREE_HEADING}\n{RULE}\n{body}\n{RULE}"));
    }

    let files = if result.files.is_empty() {
        NO_FILES.to_string()
    } else {
        result
            .files
            .iter()
            .map(|record| {
                let body = match &record.body {
                    RecordBody::Content(text) => text.trim_end_matches(['\n', '\r']).to_string(),
                    RecordBody::Error(reason) => format!("[Content not included: {}]", reason),
                };
                format!("{RULE}\nFILE: {}\n{RULE}\n{body}", record.path)
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };
    sections.push(format!("{FILES_HEADING}\n\n{files}"));

    sections.join("\n\n").trim_end().to_string()
}

/// Writes `document` to `path` in one step.
///
/// The bytes go to a temporary file next to `path`, which is then renamed over
/// it. If anything fails the temporary file is removed and `path` is left as it
/// was. Without `overwrite` an existing `path` yields
/// [`DigestError::OutputExists`].
pub fn write_document(path: &Path, document: &str, overwrite: bool) -> Result<(), DigestError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| DigestError::write(path, e))?;

    let mut temp = NamedTempFile::new_in(&parent).map_err(|e| DigestError::write(path, e))?;
    temp.write_all(document.as_bytes())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| DigestError::write(path, e))?;

    let persisted = if overwrite {
        temp.persist(path)
    } else {
        temp.persist_noclobber(path)
    };
    match persisted {
        Ok(_) => Ok(()),
        Err(err) if !overwrite && err.error.kind() == io::ErrorKind::AlreadyExists => {
            Err(DigestError::OutputExists {
                path: path.to_path_buf(),
            })
        }
        Err(err) => Err(DigestError::write(path, err.error)),
    }
}

/// Finishes a run: a summary for dry runs, otherwise the rendered document
/// written to `options.output_path`.
pub fn assemble(options: &DigestOptions, result: DigestResult) -> Result<WriteOutcome, DigestError> {
    if options.dry_run {
        return Ok(WriteOutcome::DryRun(DryRunSummary {
            paths: result.files.into_iter().map(|record| record.path).collect(),
            tree: result.tree,
            processed_count: result.processed_count,
            destination: options.output_path.clone(),
        }));
    }

    let document = render_document(&result);
    write_document(&options.output_path, &document, options.force)?;
    tracing::debug!(
        "Wrote {} bytes to {}",
        document.len(),
        options.output_path.display()
    );
    Ok(WriteOutcome::Written {
        path: options.output_path.clone(),
        processed_count: result.processed_count,
        bytes: document.len(),
    })
}
