//! Diffing observed entities against the store snapshot.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::snapshot::Snapshot;
use crate::catalog::{ComparisonField, Entity};

/// Whether an upsert creates a new row or rewrites a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Create,
    Update,
}

/// One entity to write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Upsert {
    pub change: ChangeKind,
    /// Fields that differ from the stored row. Empty for creates.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changed_fields: Vec<ComparisonField>,
    pub entity: Entity,
}

/// The write plan for one vendor run.
///
/// Every observed SKU lands in exactly one of `to_upsert` and `to_skip`.
/// `to_delete` holds stored SKUs that were not observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub to_upsert: Vec<Upsert>,
    pub to_skip: Vec<String>,
    pub to_delete: Vec<String>,
}

impl DiffPlan {
    /// SKUs to write, in observation order.
    pub fn upsert_keys(&self) -> impl Iterator<Item = &str> {
        self.to_upsert.iter().map(|u| u.entity.sku.as_str())
    }

    /// Upserts in chunks of at most `batch_size`. A size of zero is treated as one.
    pub fn upsert_batches(&self, batch_size: usize) -> std::slice::Chunks<'_, Upsert> {
        self.to_upsert.chunks(batch_size.max(1))
    }

    /// Number of upserts that create rows.
    pub fn created(&self) -> usize {
        self.count(ChangeKind::Create)
    }

    /// Number of upserts that rewrite rows.
    pub fn updated(&self) -> usize {
        self.count(ChangeKind::Update)
    }

    fn count(&self, change: ChangeKind) -> usize {
        self.to_upsert.iter().filter(|u| u.change == change).count()
    }

    /// Whether the plan has nothing to write or delete.
    pub fn is_noop(&self) -> bool {
        self.to_upsert.is_empty() && self.to_delete.is_empty()
    }

    /// Whether two plans make the same decisions, ignoring when they were made.
    pub fn same_decisions(&self, other: &DiffPlan) -> bool {
        self.vendor == other.vendor
            && self.to_upsert == other.to_upsert
            && self.to_skip == other.to_skip
            && self.to_delete == other.to_delete
    }
}

/// Partition observed entities into upserts and skips, and find deletions.
///
/// With `skip_unchanged` off, every observed entity is upserted.
pub fn diff<'a, I>(
    vendor: Option<String>,
    current: I,
    snapshot: &Snapshot,
    skip_unchanged: bool,
) -> DiffPlan
where
    I: IntoIterator<Item = &'a Entity>,
{
    let mut to_upsert = Vec::new();
    let mut to_skip = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for entity in current {
        seen.insert(entity.sku.as_str());

        match snapshot.get(&entity.sku) {
            None => to_upsert.push(Upsert {
                change: ChangeKind::Create,
                changed_fields: Vec::new(),
                entity: entity.clone(),
            }),
            Some(stored) => {
                let changed_fields = entity.differing_fields(stored);
                if skip_unchanged && changed_fields.is_empty() {
                    to_skip.push(entity.sku.clone());
                } else {
                    to_upsert.push(Upsert {
                        change: ChangeKind::Update,
                        changed_fields,
                        entity: entity.clone(),
                    });
                }
            }
        }
    }

    let to_delete: Vec<String> = snapshot
        .keys()
        .filter(|sku| !seen.contains(sku))
        .map(str::to_string)
        .collect();

    info!(
        vendor = vendor.as_deref().unwrap_or("-"),
        upsert = to_upsert.len(),
        skip = to_skip.len(),
        delete = to_delete.len(),
        "Diff complete"
    );

    DiffPlan {
        vendor,
        generated_at: Utc::now(),
        to_upsert,
        to_skip,
        to_delete,
    }
}
