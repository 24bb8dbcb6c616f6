//! The store's view of a vendor before a run.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::Entity;
use crate::error::{FurnishError, Result};

/// Previously stored entities for one vendor, keyed by SKU.
///
/// Only compared against, never modified by a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    vendor: Option<String>,
    entities: IndexMap<String, Entity>,
}

impl Snapshot {
    /// A snapshot of an empty store.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from stored entities. Later duplicates of a SKU are ignored.
    pub fn from_entities<I>(entities: I) -> Self
    where
        I: IntoIterator<Item = Entity>,
    {
        let mut snapshot = Self::empty();
        for entity in entities {
            snapshot.insert(entity);
        }
        snapshot
    }

    /// Add a stored entity, keyed by its trimmed SKU.
    ///
    /// Returns false if the SKU is blank or was already present.
    pub fn insert(&mut self, mut entity: Entity) -> bool {
        let sku = entity.sku.trim().to_string();
        if sku.is_empty() {
            warn!(
                name = entity.attributes.name.as_deref().unwrap_or(""),
                "Skipping snapshot row without a SKU"
            );
            return false;
        }
        entity.sku = sku;
        if self.entities.contains_key(&entity.sku) {
            warn!(sku = %entity.sku, "Duplicate SKU in snapshot, keeping first row");
            return false;
        }
        self.entities.insert(entity.sku.clone(), entity);
        true
    }

    /// Load a snapshot export.
    ///
    /// Accepts a JSON array of rows or an object keyed by SKU. When `vendor`
    /// is given, rows stamped with a different vendor are skipped.
    pub fn load(path: impl AsRef<Path>, vendor: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| FurnishError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let snapshot = Self::from_json_str(&content, vendor)?;
        info!(
            path = %path.display(),
            entities = snapshot.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Parse a snapshot export from a string.
    pub fn from_json_str(content: &str, vendor: Option<&str>) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        let rows: Vec<Value> = match value {
            Value::Array(rows) => rows,
            Value::Object(map) => map
                .into_iter()
                .map(|(sku, mut row)| {
                    if let Value::Object(fields) = &mut row {
                        fields.entry("sku").or_insert(Value::String(sku));
                    }
                    row
                })
                .collect(),
            other => {
                return Err(FurnishError::Snapshot(format!(
                    "expected an array or object of rows, found {}",
                    json_kind(&other)
                )));
            }
        };

        let mut snapshot = Self {
            vendor: vendor.map(str::to_string),
            entities: IndexMap::with_capacity(rows.len()),
        };

        for (index, row) in rows.into_iter().enumerate() {
            let entity: Entity = serde_json::from_value(row).map_err(|e| {
                FurnishError::Snapshot(format!("row {}: {}", index, e))
            })?;

            if let (Some(wanted), Some(found)) = (vendor, entity.vendor.as_deref()) {
                if wanted != found {
                    warn!(sku = %entity.sku, vendor = found, "Skipping snapshot row for another vendor");
                    continue;
                }
            }
            snapshot.insert(entity);
        }

        Ok(snapshot)
    }

    pub fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    /// Stored entity for a SKU.
    pub fn get(&self, sku: &str) -> Option<&Entity> {
        self.entities.get(sku)
    }

    pub fn contains(&self, sku: &str) -> bool {
        self.entities.contains_key(sku)
    }

    /// Stored SKUs in snapshot order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(|k| k.as_str())
    }

    /// Stored entities in snapshot order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
