//! Non-fatal data-quality issues found while reconciling a batch.

use serde::{Deserialize, Serialize};

/// Kind of issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// No text and no URL to classify; defaults were used.
    UnclassifiableInput,
    /// No natural key; the record was dropped.
    MissingKey,
    /// Room hint names a room the taxonomy does not know. Still applied.
    UnknownRoomHint,
}

impl IssueKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::UnclassifiableInput => "Unclassifiable Input",
            IssueKind::MissingKey => "Missing Key",
            IssueKind::UnknownRoomHint => "Unknown Room Hint",
        }
    }
}

/// One issue, tied to the position of the record in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    /// Zero-based position of the record in the batch.
    pub record: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub detail: String,
}

impl Issue {
    pub(crate) fn new(kind: IssueKind, record: usize, sku: Option<&str>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            record,
            sku: sku.map(str::to_string),
            detail: detail.into(),
        }
    }
}
