//! Error types for the furnish library.
//!
//! Only configuration problems are errors. Data-quality problems found while
//! reconciling a batch are reported as [`crate::reconcile::Issue`] values and
//! never abort a run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for furnish operations.
#[derive(Debug, Error)]
pub enum FurnishError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Missing or malformed taxonomy. Fatal: nothing can be classified without it.
    #[error("Taxonomy error in {source_name}: {message}")]
    Taxonomy {
        source_name: String,
        message: String,
    },

    /// Invalid engine or sync configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed snapshot of previously stored records.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Empty input file or no records to reconcile.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Unrecognised input format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Regex compilation error.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl FurnishError {
    /// Build a taxonomy error for the named source.
    pub(crate) fn taxonomy(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        FurnishError::Taxonomy {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for furnish operations.
pub type Result<T> = std::result::Result<T, FurnishError>;
