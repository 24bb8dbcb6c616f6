//! Reconciliation of observed products against stored ones.
//!
//! A vendor run feeds every [`Observation`] into an [`EntityTable`], which
//! deduplicates by SKU and classifies each new product once. The finished
//! table is diffed against a [`Snapshot`] of the store to produce a
//! [`DiffPlan`]. Nothing here performs I/O against the store itself.

mod issue;
mod observation;
mod plan;
mod snapshot;
mod summary;
mod table;

pub use issue::{Issue, IssueKind};
pub use observation::Observation;
pub use plan::{diff, ChangeKind, DiffPlan, Upsert};
pub use snapshot::Snapshot;
pub use summary::{SyncSummary, SyncTotals};
pub use table::{merge, EntityTable, ObserveOutcome, ReconcileOptions};

use serde::{Deserialize, Serialize};

use crate::classify::Classifier;

/// Everything one reconciliation run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResult {
    pub plan: DiffPlan,
    pub summary: SyncSummary,
    pub issues: Vec<Issue>,
}

/// Run a whole batch of observations through a fresh table and diff it.
pub fn reconcile<I>(
    classifier: &Classifier,
    vendor: Option<&str>,
    observations: I,
    snapshot: &Snapshot,
    options: ReconcileOptions,
) -> ReconcileResult
where
    I: IntoIterator<Item = Observation>,
{
    let mut table = EntityTable::new(classifier).with_options(options);
    if let Some(vendor) = vendor {
        table = table.with_vendor(vendor);
    }
    table.observe_all(observations);

    let plan = table.finalize(snapshot);
    let summary = SyncSummary::new(&table, &plan);
    let (_, issues) = table.into_parts();

    ReconcileResult {
        plan,
        summary,
        issues,
    }
}
