//! Content collection: one [`FileRecord`] per admitted file, in walk order.

use crate::filter::PathFilter;
use crate::options::{BinaryDetection, DigestOptions};
use crate::report::Reporter;
use crate::types::{FileRecord, RecordBody};
use crate::walk::walk;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Reason attached to every file whose text could not be ingested.
pub const UNREADABLE_REASON: &str =
    "Could not be read as UTF-8 text. Might be binary or encoding issue.";

const PROBE_LEN: u64 = 4096;

/// Records in walk order plus how many of them carry content.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub records: Vec<FileRecord>,
    pub processed_count: usize,
}

pub fn dry_run_placeholder(relative_path: &str) -> String {
    format!("[Dry Run] Content of {} would be here.", relative_path)
}

/// Walks `options.root` and builds a record for every admitted file.
///
/// In dry-run mode no file is opened; each record holds a placeholder and
/// counts as processed. Otherwise a file that fails to open, read, pass the
/// binary probe, or decode as UTF-8 becomes an error record, which is kept
/// but not counted.
pub fn collect_files(
    options: &DigestOptions,
    filter: &PathFilter,
    reporter: &dyn Reporter,
) -> Collection {
    let mut collection = Collection::default();
    for entry in walk(options, filter, reporter) {
        if entry.is_dir {
            continue;
        }
        let body = if options.dry_run {
            RecordBody::Content(dry_run_placeholder(&entry.relative))
        } else {
            match read_text(&entry.path, options.binary_detection) {
                Ok(text) => RecordBody::Content(text),
                Err(err) => {
                    tracing::debug!("Not ingesting {}: {}", entry.path.display(), err);
                    RecordBody::Error(UNREADABLE_REASON.to_string())
                }
            }
        };
        if matches!(body, RecordBody::Content(_)) {
            collection.processed_count += 1;
        }
        collection.records.push(FileRecord {
            path: entry.relative,
            body,
        });
    }
    collection
}

/// Reads `path` as UTF-8 text. The handle is dropped on every return path.
fn read_text(path: &Path, binary_detection: BinaryDetection) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::with_capacity(PROBE_LEN as usize);
    reader.by_ref().take(PROBE_LEN).read_to_end(&mut bytes)?;
    let is_binary = match binary_detection {
        BinaryDetection::Simple => bytes.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(&bytes).is_binary(),
        BinaryDetection::None => false,
    };
    if is_binary {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "binary content detected",
        ));
    }
    reader.read_to_end(&mut bytes)?;
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
