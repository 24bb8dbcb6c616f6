//! The in-run entity table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::issue::{Issue, IssueKind};
use super::observation::Observation;
use super::plan::{diff, DiffPlan};
use super::snapshot::Snapshot;
use crate::catalog::{ComparisonField, Entity};
use crate::classify::{rules, Classifier};

/// Knobs for a reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileOptions {
    /// Leave unchanged entities out of the upsert list.
    pub skip_unchanged: bool,
    /// On repeat sightings, fill attributes the first sighting lacked.
    pub fill_missing_attributes: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            skip_unchanged: true,
            fill_missing_attributes: false,
        }
    }
}

/// What happened to one observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserveOutcome {
    /// First sighting of the key; a new entity was classified.
    Created,
    /// Key already present; the existing entity absorbed the sighting.
    Merged {
        added_room: bool,
        filled: Vec<ComparisonField>,
    },
    /// No usable key.
    Dropped,
}

/// Fold a repeat sighting's room hint into an existing entity.
///
/// Attributes and classification stay as first observed. The room set only
/// grows.
pub fn merge(mut existing: Entity, room_type_hint: Option<&str>) -> Entity {
    if let Some(room) = room_type_hint {
        existing.room_types.insert(room);
    }
    existing
}

/// Entities observed during one vendor run, keyed by SKU in first-seen order.
#[derive(Debug)]
pub struct EntityTable<'c> {
    classifier: &'c Classifier,
    vendor: Option<String>,
    options: ReconcileOptions,
    entities: IndexMap<String, Entity>,
    issues: Vec<Issue>,
    observed: usize,
    dropped: usize,
    unclassifiable: usize,
}

impl<'c> EntityTable<'c> {
    /// Create an empty table.
    pub fn new(classifier: &'c Classifier) -> Self {
        Self {
            classifier,
            vendor: None,
            options: ReconcileOptions::default(),
            entities: IndexMap::new(),
            issues: Vec::new(),
            observed: 0,
            dropped: 0,
            unclassifiable: 0,
        }
    }

    /// Stamp new entities with a vendor.
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = Some(vendor.into());
        self
    }

    /// Set the run options.
    pub fn with_options(mut self, options: ReconcileOptions) -> Self {
        self.options = options;
        self
    }

    /// Record one sighting.
    pub fn observe(&mut self, observation: Observation) -> ObserveOutcome {
        let index = self.observed;
        self.observed += 1;

        let Some(sku) = observation.key() else {
            warn!(
                record = index,
                name = observation.attributes.name.as_deref().unwrap_or(""),
                "Dropping record without a SKU"
            );
            self.dropped += 1;
            self.issues.push(Issue::new(
                IssueKind::MissingKey,
                index,
                None,
                "record has no SKU",
            ));
            return ObserveOutcome::Dropped;
        };
        let sku = sku.to_string();
        let hint = observation.room_hint().map(str::to_string);
        let hint = hint.as_deref();

        if let Some(room) = hint {
            if !self.is_known_room(room) {
                self.issues.push(Issue::new(
                    IssueKind::UnknownRoomHint,
                    index,
                    Some(&sku),
                    format!("room '{}' is not in the taxonomy", room),
                ));
            }
        }

        if let Some(existing) = self.entities.get_mut(&sku) {
            let rooms_before = existing.room_types.len();
            let taken = std::mem::replace(existing, Entity::new(String::new()));
            *existing = merge(taken, hint);
            let added_room = existing.room_types.len() > rooms_before;
            let filled = if self.options.fill_missing_attributes {
                existing.attributes.fill_missing(&observation.attributes)
            } else {
                Vec::new()
            };
            debug!(sku = %sku, added_room, filled = filled.len(), "Merged repeat sighting");
            return ObserveOutcome::Merged { added_room, filled };
        }

        let input = observation.classification_input();
        if input.is_blank() {
            self.unclassifiable += 1;
            self.issues.push(Issue::new(
                IssueKind::UnclassifiableInput,
                index,
                Some(&sku),
                "no text or URL to classify",
            ));
        }

        let classification = self.classifier.categorize_record(&input);
        let mut entity = Entity::new(sku.clone()).with_attributes(observation.attributes);
        entity.vendor = self.vendor.clone();
        entity.room_types = match hint {
            Some(room) => [room].into_iter().collect(),
            None => classification.room_types.iter().collect(),
        };
        entity.product_type = classification.product_type;
        entity.fixture_type = classification.fixture_type;

        debug!(
            sku = %sku,
            product_type = entity.product_type.as_deref().unwrap_or("-"),
            fixture_type = entity.fixture_type.as_deref().unwrap_or("-"),
            rooms = entity.room_types.len(),
            "Created entity"
        );
        self.entities.insert(sku, entity);
        ObserveOutcome::Created
    }

    /// Record every sighting in order.
    pub fn observe_all<I>(&mut self, observations: I)
    where
        I: IntoIterator<Item = Observation>,
    {
        for observation in observations {
            self.observe(observation);
        }
    }

    fn is_known_room(&self, room: &str) -> bool {
        room == rules::MULTI_PURPOSE
            || self
                .classifier
                .taxonomy()
                .room_types
                .iter()
                .any(|entry| entry.name == room)
    }

    /// Entity for a SKU.
    pub fn get(&self, sku: &str) -> Option<&Entity> {
        self.entities.get(sku)
    }

    /// Entities in first-seen order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Number of distinct SKUs.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Sightings recorded, including dropped ones.
    pub fn observed(&self) -> usize {
        self.observed
    }

    /// Sightings dropped for lack of a key.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Entities created from blank input.
    pub fn unclassifiable(&self) -> usize {
        self.unclassifiable
    }

    /// Issues found so far.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    /// Compare against the store snapshot and produce the plan.
    pub fn finalize(&self, snapshot: &Snapshot) -> DiffPlan {
        diff(
            self.vendor.clone().or_else(|| snapshot.vendor().map(str::to_string)),
            self.entities.values(),
            snapshot,
            self.options.skip_unchanged,
        )
    }

    /// Consume the table, keeping the entities and issues.
    pub fn into_parts(self) -> (IndexMap<String, Entity>, Vec<Issue>) {
        (self.entities, self.issues)
    }
}
