use serde::{Deserialize, Serialize};

/// What a visited file contributed to the digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordBody {
    /// Decoded text (or the dry-run placeholder).
    Content(String),
    /// The file was visited but its text could not be ingested.
    Error(String),
}

/// A single admitted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the root, always `/`-separated.
    pub path: String,
    #[serde(flatten)]
    pub body: RecordBody,
}

impl FileRecord {
    pub fn content(&self) -> Option<&str> {
        match &self.body {
            RecordBody::Content(text) => Some(text),
            RecordBody::Error(_) => None,
        }
    }

    pub fn error_reason(&self) -> Option<&str> {
        match &self.body {
            RecordBody::Content(_) => None,
            RecordBody::Error(reason) => Some(reason),
        }
    }

    pub fn is_ingested(&self) -> bool {
        matches!(self.body, RecordBody::Content(_))
    }
}

/// The complete result of a traversal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigestResult {
    /// Rendered directory tree, absent when tree rendering was suppressed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    /// Records in walk order.
    pub files: Vec<FileRecord>,
    /// Number of records carrying content. Error records are not counted.
    pub processed_count: usize,
}
