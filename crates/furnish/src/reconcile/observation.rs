//! One sighting of a product during a vendor run.

use serde::{Deserialize, Serialize};

use crate::catalog::values;
use crate::catalog::{Attributes, RawRecord};

/// A product as seen on one listing page.
///
/// Field names follow the vendor backup files, so a JSON array of those
/// records deserializes directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Natural key. Records without one are dropped.
    #[serde(default, deserialize_with = "values::lenient_text")]
    pub sku: Option<String>,

    #[serde(flatten)]
    pub attributes: Attributes,

    /// Classification text; falls back to the display name.
    #[serde(
        default,
        deserialize_with = "values::lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_text: Option<String>,

    /// Listing page URL.
    #[serde(
        default,
        alias = "category_url",
        deserialize_with = "values::lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_url: Option<String>,

    /// Vendor category label.
    #[serde(
        default,
        alias = "category_name",
        deserialize_with = "values::lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_category_label: Option<String>,

    /// Room the caller already knows the product belongs in, e.g. because it
    /// was listed on a room-specific page.
    #[serde(
        default,
        alias = "room",
        deserialize_with = "values::lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub room_type_hint: Option<String>,
}

impl Observation {
    /// Create an observation for a SKU.
    pub fn new(sku: impl Into<String>) -> Self {
        Self {
            sku: Some(sku.into()),
            ..Default::default()
        }
    }

    /// Set the attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set the classification input.
    pub fn with_source(mut self, record: RawRecord) -> Self {
        self.source_text = record.source_text;
        self.source_url = record.source_url;
        self.source_category_label = record.source_category_label;
        self
    }

    /// Set the room hint.
    pub fn with_room_hint(mut self, room: impl Into<String>) -> Self {
        self.room_type_hint = Some(room.into());
        self
    }

    /// Trimmed natural key, if present and non-blank.
    pub fn key(&self) -> Option<&str> {
        self.sku.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Trimmed room hint, if present and non-blank.
    pub fn room_hint(&self) -> Option<&str> {
        self.room_type_hint
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The raw record handed to the classifier.
    pub fn classification_input(&self) -> RawRecord {
        RawRecord {
            source_text: self
                .source_text
                .clone()
                .filter(|s| !s.trim().is_empty())
                .or_else(|| self.attributes.name.clone()),
            source_url: self.source_url.clone(),
            source_category_label: self.source_category_label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_vendor_record() {
        let json = r#"{
            "name": "Wilkes Side Table",
            "sku": " 301-123 ",
            "img_url": "https://cdn.example.com/301-123.jpg",
            "product_url": "https://example.com/p/301-123",
            "price": null,
            "in_stock": null,
            "category_url": "https://example.com/living-room",
            "category_name": "Side Tables",
            "room": "Living Room"
        }"#;
        let obs: Observation = serde_json::from_str(json).unwrap();

        assert_eq!(obs.key(), Some("301-123"));
        assert_eq!(obs.room_hint(), Some("Living Room"));
        assert_eq!(obs.attributes.name.as_deref(), Some("Wilkes Side Table"));
        assert_eq!(obs.source_category_label.as_deref(), Some("Side Tables"));
    }

    #[test]
    fn test_off_type_source_fields_are_coerced() {
        let obs: Observation = serde_json::from_str(
            r#"{"sku": "A2", "source_text": 42, "source_url": 5, "category_name": ["Beds"]}"#,
        )
        .unwrap();
        assert_eq!(obs.source_text.as_deref(), Some("42"));
        assert_eq!(obs.source_url.as_deref(), Some("5"));
        assert_eq!(obs.source_category_label, None);
    }

    #[test]
    fn test_blank_key() {
        let obs: Observation = serde_json::from_str(r#"{"sku": "  ", "name": "X"}"#).unwrap();
        assert_eq!(obs.key(), None);
        assert_eq!(Observation::default().key(), None);
    }

    #[test]
    fn test_classification_text_falls_back_to_name() {
        let obs = Observation::new("A")
            .with_attributes(Attributes::default().with_name("Canopy Bed"));
        assert_eq!(obs.classification_input().source_text.as_deref(), Some("Canopy Bed"));

        let obs = obs.with_source(RawRecord::new("Sleeper Sofa"));
        assert_eq!(obs.classification_input().source_text.as_deref(), Some("Sleeper Sofa"));
    }
}
