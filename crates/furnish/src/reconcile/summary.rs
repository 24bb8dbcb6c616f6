//! Run statistics.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::plan::DiffPlan;
use super::table::EntityTable;
use crate::catalog::Entity;

/// Bucket for entities with no product type.
pub const UNKNOWN_PRODUCT_TYPE: &str = "Unknown";

/// Counts for one vendor run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    /// Sightings received, including dropped ones.
    pub observed: usize,
    /// Distinct SKUs.
    pub entities: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub deleted: usize,
    /// Sightings without a SKU.
    pub dropped: usize,
    /// Entities classified from blank input.
    pub unclassifiable: usize,
    /// Entities per product type, most common first.
    pub product_types: IndexMap<String, usize>,
    /// Entities per room, most common first.
    pub room_types: IndexMap<String, usize>,
    /// Entities placed in more than one room.
    pub multi_room: usize,
}

impl SyncSummary {
    /// Summarize a finished table and its plan.
    pub fn new(table: &EntityTable<'_>, plan: &DiffPlan) -> Self {
        let (product_types, room_types, multi_room) = breakdown(table.entities());
        Self {
            vendor: plan.vendor.clone(),
            observed: table.observed(),
            entities: table.len(),
            created: plan.created(),
            updated: plan.updated(),
            skipped: plan.to_skip.len(),
            deleted: plan.to_delete.len(),
            dropped: table.dropped(),
            unclassifiable: table.unclassifiable(),
            product_types,
            room_types,
            multi_room,
        }
    }

    /// Entities written.
    pub fn upserted(&self) -> usize {
        self.created + self.updated
    }
}

/// Count entities per product type and per room. Ties keep first-seen order.
fn breakdown<'a, I>(entities: I) -> (IndexMap<String, usize>, IndexMap<String, usize>, usize)
where
    I: IntoIterator<Item = &'a Entity>,
{
    let mut product_types: IndexMap<String, usize> = IndexMap::new();
    let mut room_types: IndexMap<String, usize> = IndexMap::new();
    let mut multi_room = 0;

    for entity in entities {
        let product = entity.product_type.as_deref().unwrap_or(UNKNOWN_PRODUCT_TYPE);
        *product_types.entry(product.to_string()).or_default() += 1;
        for room in entity.room_types.iter() {
            *room_types.entry(room.to_string()).or_default() += 1;
        }
        if entity.room_types.len() > 1 {
            multi_room += 1;
        }
    }

    product_types.sort_by(|_, a, _, b| b.cmp(a));
    room_types.sort_by(|_, a, _, b| b.cmp(a));
    (product_types, room_types, multi_room)
}

/// Counts across several vendor runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncTotals {
    pub vendors_synced: usize,
    pub total_products: usize,
    pub upserted: usize,
    pub skipped: usize,
    pub deleted: usize,
    pub dropped: usize,
}

impl SyncTotals {
    /// Add one vendor run.
    pub fn add(&mut self, summary: &SyncSummary) {
        self.vendors_synced += 1;
        self.total_products += summary.entities;
        self.upserted += summary.upserted();
        self.skipped += summary.skipped;
        self.deleted += summary.deleted;
        self.dropped += summary.dropped;
    }
}

impl<'a> FromIterator<&'a SyncSummary> for SyncTotals {
    fn from_iter<I: IntoIterator<Item = &'a SyncSummary>>(iter: I) -> Self {
        let mut totals = SyncTotals::default();
        for summary in iter {
            totals.add(summary);
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Attributes;
    use crate::classify::Classifier;
    use crate::reconcile::{Observation, Snapshot};

    #[test]
    fn test_type_and_room_breakdown() {
        let classifier = Classifier::builtin().unwrap();
        let mut table = EntityTable::new(&classifier);
        let named = |sku: &str, name: &str| {
            Observation::new(sku).with_attributes(Attributes::default().with_name(name))
        };
        table.observe(named("A", "Odette Canopy Bed").with_room_hint("Bedroom"));
        table.observe(named("A", "Odette Canopy Bed").with_room_hint("Guest Room"));
        table.observe(named("B", "Harbor Sleigh Bed").with_room_hint("Bedroom"));
        table.observe(named("C", "Archer Swivel Chair").with_room_hint("Living Room"));
        table.observe(Observation::new("D").with_room_hint("Office"));

        let plan = table.finalize(&Snapshot::empty());
        let summary = SyncSummary::new(&table, &plan);

        assert_eq!(
            summary.product_types.iter().map(|(k, v)| (k.as_str(), *v)).collect::<Vec<_>>(),
            vec![("Bed", 2), ("Chair", 1), (UNKNOWN_PRODUCT_TYPE, 1)]
        );
        assert_eq!(
            summary.room_types.iter().map(|(k, v)| (k.as_str(), *v)).collect::<Vec<_>>(),
            vec![("Bedroom", 2), ("Guest Room", 1), ("Living Room", 1), ("Office", 1)]
        );
        assert_eq!(summary.multi_room, 1);
    }

    #[test]
    fn test_totals() {
        let a = SyncSummary {
            entities: 10,
            created: 3,
            updated: 2,
            skipped: 5,
            deleted: 1,
            ..Default::default()
        };
        let b = SyncSummary {
            entities: 4,
            created: 4,
            dropped: 2,
            ..Default::default()
        };

        let totals: SyncTotals = [&a, &b].into_iter().collect();
        assert_eq!(totals.vendors_synced, 2);
        assert_eq!(totals.total_products, 14);
        assert_eq!(totals.upserted, 9);
        assert_eq!(totals.skipped, 5);
        assert_eq!(totals.deleted, 1);
        assert_eq!(totals.dropped, 2);
    }
}
