//! Taxonomy data model and validation.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FurnishError, Result};

/// A named category and the keywords that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    /// Category name as it appears in the catalog (e.g. "Living Room", "Table").
    pub name: String,
    /// Lowercase keywords that signal this category.
    pub keywords: Vec<String>,
}

impl TaxonomyEntry {
    /// Create an entry, normalising keywords to trimmed lowercase.
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        for keyword in &mut self.keywords {
            *keyword = keyword.trim().to_lowercase();
        }
    }
}

/// Statistics about a loaded taxonomy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyStats {
    /// Number of room type entries.
    pub room_types: usize,
    /// Number of product type entries.
    pub product_types: usize,
    /// Number of product types with a fixture table.
    pub fixture_groups: usize,
    /// Number of fixture type entries across all product types.
    pub fixture_types: usize,
    /// Total keywords across all tables.
    pub keywords: usize,
    /// Where the taxonomy came from.
    pub source: String,
}

/// The complete set of classification tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Room types, in declaration order. URL matching is first-match-wins
    /// over this order.
    pub room_types: Vec<TaxonomyEntry>,
    /// Product types.
    pub product_types: Vec<TaxonomyEntry>,
    /// Fixture sub-types keyed by product type name.
    #[serde(default)]
    pub fixture_types: IndexMap<String, Vec<TaxonomyEntry>>,
    /// Description of where the tables were loaded from.
    #[serde(skip)]
    pub(crate) source: String,
}

impl Taxonomy {
    /// Assemble a taxonomy from its tables.
    pub fn new(
        room_types: Vec<TaxonomyEntry>,
        product_types: Vec<TaxonomyEntry>,
        fixture_types: IndexMap<String, Vec<TaxonomyEntry>>,
    ) -> Self {
        let mut taxonomy = Self {
            room_types,
            product_types,
            fixture_types,
            source: "in-memory".to_string(),
        };
        taxonomy.normalize();
        taxonomy
    }

    /// Set the source description reported in [`TaxonomyStats`].
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Where this taxonomy was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Fixture entries for a product type, if any.
    pub fn fixtures_for(&self, product_type: &str) -> &[TaxonomyEntry] {
        self.fixture_types
            .get(product_type)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn normalize(&mut self) {
        for entry in self
            .room_types
            .iter_mut()
            .chain(self.product_types.iter_mut())
            .chain(self.fixture_types.values_mut().flatten())
        {
            entry.normalize();
        }
    }

    /// Check the tables are usable for classification.
    ///
    /// Rejects empty room or product tables, blank names, entries without
    /// keywords, blank keywords and duplicate names within one table.
    pub fn validate(&self) -> Result<TaxonomyStats> {
        if self.room_types.is_empty() {
            return Err(FurnishError::taxonomy(&self.source, "room type table is empty"));
        }
        if self.product_types.is_empty() {
            return Err(FurnishError::taxonomy(&self.source, "product type table is empty"));
        }

        validate_table(&self.source, "room_types", &self.room_types)?;
        validate_table(&self.source, "product_types", &self.product_types)?;

        let known_products: HashSet<&str> =
            self.product_types.iter().map(|e| e.name.as_str()).collect();
        for (product_type, entries) in &self.fixture_types {
            validate_table(&self.source, &format!("fixture_types.{product_type}"), entries)?;
            if !known_products.contains(product_type.as_str()) {
                tracing::warn!(
                    product_type = %product_type,
                    "fixture table names a product type absent from the product taxonomy"
                );
            }
        }

        Ok(self.stats())
    }

    /// Counts for reporting.
    pub fn stats(&self) -> TaxonomyStats {
        let fixture_types: usize = self.fixture_types.values().map(|v| v.len()).sum();
        let keywords = self
            .room_types
            .iter()
            .chain(self.product_types.iter())
            .chain(self.fixture_types.values().flatten())
            .map(|e| e.keywords.len())
            .sum();

        TaxonomyStats {
            room_types: self.room_types.len(),
            product_types: self.product_types.len(),
            fixture_groups: self.fixture_types.len(),
            fixture_types,
            keywords,
            source: self.source.clone(),
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_table(source: &str, table: &str, entries: &[TaxonomyEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(FurnishError::taxonomy(
                source,
                format!("{table}[{index}] has a blank name"),
            ));
        }
        if !seen.insert(entry.name.as_str()) {
            return Err(FurnishError::taxonomy(
                source,
                format!("{table} declares '{}' more than once", entry.name),
            ));
        }
        if entry.keywords.is_empty() {
            return Err(FurnishError::taxonomy(
                source,
                format!("{table} entry '{}' has no keywords", entry.name),
            ));
        }
        if entry.keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(FurnishError::taxonomy(
                source,
                format!("{table} entry '{}' has a blank keyword", entry.name),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, keywords: &[&str]) -> TaxonomyEntry {
        TaxonomyEntry::new(name, keywords.iter().copied())
    }

    #[test]
    fn test_entry_normalizes_keywords() {
        let e = entry("Bed", &["  Canopy Bed ", "BED"]);
        assert_eq!(e.keywords, vec!["canopy bed", "bed"]);
    }

    #[test]
    fn test_builtin_validates() {
        let stats = Taxonomy::builtin().validate().unwrap();
        assert!(stats.room_types > 0);
        assert!(stats.product_types > 0);
        assert!(stats.fixture_types > 0);
        assert_eq!(stats.source, "built-in");
    }

    #[test]
    fn test_validate_rejects_empty_tables() {
        let taxonomy = Taxonomy::new(vec![], vec![entry("Bed", &["bed"])], IndexMap::new());
        assert!(matches!(
            taxonomy.validate(),
            Err(FurnishError::Taxonomy { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let taxonomy = Taxonomy::new(
            vec![entry("Bedroom", &["bedroom"])],
            vec![entry("Bed", &["bed"]), entry("Bed", &["headboard"])],
            IndexMap::new(),
        );
        let err = taxonomy.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_validate_rejects_blank_keyword() {
        let taxonomy = Taxonomy::new(
            vec![entry("Bedroom", &["bedroom", "  "])],
            vec![entry("Bed", &["bed"])],
            IndexMap::new(),
        );
        let err = taxonomy.validate().unwrap_err();
        assert!(err.to_string().contains("blank keyword"));
    }

    #[test]
    fn test_validate_rejects_entry_without_keywords() {
        let taxonomy = Taxonomy::new(
            vec![entry("Bedroom", &["bedroom"])],
            vec![entry("Bed", &[])],
            IndexMap::new(),
        );
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn test_fixtures_for_unknown_product() {
        let taxonomy = Taxonomy::builtin();
        assert!(taxonomy.fixtures_for("Spaceship").is_empty());
        assert!(!taxonomy.fixtures_for("Table").is_empty());
    }
}
