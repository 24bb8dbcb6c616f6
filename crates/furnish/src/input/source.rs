//! Batch file metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about an observation batch file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSource {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (json, csv, tsv, ...).
    pub format: String,
    /// Number of records read.
    pub record_count: usize,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

impl BatchSource {
    /// Create metadata for a file that has been read.
    pub fn new(path: PathBuf, hash: String, size_bytes: u64, format: String, record_count: usize) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            record_count,
            read_at: Utc::now(),
        }
    }
}

/// Check if a cell represents a missing value.
pub fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed == "-"
}
