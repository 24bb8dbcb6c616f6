//! Rule-based room, product and fixture classification.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::RawRecord;
use crate::error::Result;
use crate::taxonomy::Taxonomy;

use super::matcher::KeywordMatcher;
use super::rules::{
    self, CONSOLIDATION_RULES, FIXTURE_OVERRIDES, MULTI_PURPOSE, STANDARD_FIXTURE,
    STANDARD_FIXTURE_PRODUCTS,
};

/// Outcome of classifying one raw record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Rooms the product belongs in, first-seen order. Never empty.
    pub room_types: Vec<String>,
    /// Broad product category.
    pub product_type: Option<String>,
    /// Sub-category within the product type.
    pub fixture_type: Option<String>,
}

impl Classification {
    /// The result for input that carries no usable signal.
    pub fn unclassified() -> Self {
        Self {
            room_types: vec![MULTI_PURPOSE.to_string()],
            product_type: None,
            fixture_type: None,
        }
    }

    /// Whether nothing beyond the default room was inferred.
    pub fn is_unclassified(&self) -> bool {
        self.product_type.is_none()
            && self.fixture_type.is_none()
            && self.room_types.len() == 1
            && self.room_types[0] == MULTI_PURPOSE
    }
}

/// Classifies vendor text and URLs against a taxonomy.
///
/// Immutable after construction, so one classifier can be shared across
/// threads. All keyword patterns are compiled once in [`Classifier::new`].
#[derive(Debug, Clone)]
pub struct Classifier {
    taxonomy: Taxonomy,
    consolidation: KeywordMatcher,
    products: KeywordMatcher,
    fixtures: IndexMap<String, KeywordMatcher>,
    fixture_overrides: Vec<(String, KeywordMatcher)>,
}

impl Classifier {
    /// Build a classifier over the given taxonomy.
    ///
    /// Fails with a taxonomy error if the tables do not validate.
    pub fn new(taxonomy: Taxonomy) -> Result<Self> {
        taxonomy.validate()?;
        let consolidation = KeywordMatcher::ordered(CONSOLIDATION_RULES.iter().copied())?;

        // Consolidation runs before this matcher, so the folded sub-types
        // never reach the generic table.
        let products = KeywordMatcher::longest_first(&taxonomy.product_types)?;

        let fixtures = taxonomy
            .fixture_types
            .iter()
            .map(|(product, entries)| Ok((product.clone(), KeywordMatcher::longest_first(entries)?)))
            .collect::<Result<IndexMap<_, _>>>()?;

        let mut fixture_overrides: Vec<(String, KeywordMatcher)> = Vec::new();
        for (product, keyword, fixture) in FIXTURE_OVERRIDES {
            let matcher = KeywordMatcher::ordered([(*keyword, *fixture)])?;
            fixture_overrides.push((product.to_string(), matcher));
        }

        Ok(Self {
            taxonomy,
            consolidation,
            products,
            fixtures,
            fixture_overrides,
        })
    }

    /// Build a classifier over the built-in taxonomy.
    pub fn builtin() -> Result<Self> {
        Self::new(Taxonomy::builtin())
    }

    /// The taxonomy this classifier was built from.
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Room named by a category URL, if any.
    ///
    /// Scans rooms in declaration order and returns the first whose keyword
    /// occurs anywhere in the lowercased URL.
    pub fn infer_room_type_from_url(&self, url: &str) -> Option<&str> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        let url_lower = url.to_lowercase();

        self.taxonomy
            .room_types
            .iter()
            .find(|room| room.keywords.iter().any(|k| url_lower.contains(k.as_str())))
            .map(|room| room.name.as_str())
    }

    /// Product type from a vendor category label, using the ordered
    /// label table.
    pub fn infer_product_type_from_category_label(&self, label: &str) -> Option<&'static str> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        rules::match_category_label(&label.to_lowercase())
    }

    /// Product type from free text such as a product name.
    ///
    /// Consolidation rules run first; the taxonomy is then tried longest
    /// keyword first.
    pub fn infer_product_type_from_text(&self, text: &str) -> Option<&str> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let text_lower = text.to_lowercase();

        self.consolidation
            .find(&text_lower)
            .or_else(|| self.products.find(&text_lower))
    }

    /// Fixture sub-type for text already classified as `product_type`.
    ///
    /// Overrides win first, then the product type's fixture table, then the
    /// "Standard" default for Chair, Sofa and Table.
    pub fn infer_fixture_type(&self, text: &str, product_type: Option<&str>) -> Option<&str> {
        let product_type = product_type?;
        let text_lower = text.trim().to_lowercase();

        if !text_lower.is_empty() {
            let overridden = self
                .fixture_overrides
                .iter()
                .filter(|(product, _)| product == product_type)
                .find_map(|(_, matcher)| matcher.find(&text_lower));
            if overridden.is_some() {
                return overridden;
            }

            if let Some(fixture) = self
                .fixtures
                .get(product_type)
                .and_then(|matcher| matcher.find(&text_lower))
            {
                return Some(fixture);
            }
        }

        STANDARD_FIXTURE_PRODUCTS
            .iter()
            .any(|p| *p == product_type)
            .then_some(STANDARD_FIXTURE)
    }

    /// Typical rooms for a product type.
    pub fn infer_room_types_from_product_type(product_type: &str) -> Vec<String> {
        rules::rooms_for_product_type(product_type)
            .iter()
            .map(|room| room.to_string())
            .collect()
    }

    /// Classify a product from its text, category URL and category label.
    ///
    /// Precedence: room from URL; product type from label, else text;
    /// fixture from text and product type; rooms from product type when the
    /// URL named none; finally the Multi-Purpose default.
    pub fn categorize(&self, text: &str, url: Option<&str>, label: Option<&str>) -> Classification {
        let mut room_types: Vec<String> = Vec::new();

        if let Some(room) = url.and_then(|u| self.infer_room_type_from_url(u)) {
            room_types.push(room.to_string());
        }

        let product_type: Option<&str> = label
            .and_then(|l| self.infer_product_type_from_category_label(l))
            .or_else(|| self.infer_product_type_from_text(text));

        let fixture_type = self.infer_fixture_type(text, product_type);

        if room_types.is_empty() {
            if let Some(product_type) = product_type {
                room_types = Self::infer_room_types_from_product_type(product_type);
            }
        }

        if room_types.is_empty() {
            room_types.push(MULTI_PURPOSE.to_string());
        }

        Classification {
            room_types,
            product_type: product_type.map(str::to_string),
            fixture_type: fixture_type.map(str::to_string),
        }
    }

    /// Classify a raw observed record.
    pub fn categorize_record(&self, record: &RawRecord) -> Classification {
        self.categorize(
            record.source_text.as_deref().unwrap_or(""),
            record.source_url.as_deref(),
            record.source_category_label.as_deref(),
        )
    }
}
