//! Raw records as produced by field extraction.

use serde::{Deserialize, Serialize};

/// Classification input for one observed product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Free text describing the product, usually its display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,

    /// URL of the listing page the product was found on.
    #[serde(default, alias = "category_url", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Vendor category label (menu entry or category id).
    #[serde(default, alias = "category_name", skip_serializing_if = "Option::is_none")]
    pub source_category_label: Option<String>,
}

impl RawRecord {
    /// Create a record from its text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            source_text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Set the source URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Set the category label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.source_category_label = Some(label.into());
        self
    }

    /// Whether neither text nor URL carries anything to classify.
    pub fn is_blank(&self) -> bool {
        is_blank(&self.source_text) && is_blank(&self.source_url)
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|s| s.trim().is_empty()).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        let record: RawRecord = serde_json::from_str(
            r#"{"source_text": "Bed", "category_url": "https://x/bedroom", "category_name": "beds"}"#,
        )
        .unwrap();
        assert_eq!(record.source_url.as_deref(), Some("https://x/bedroom"));
        assert_eq!(record.source_category_label.as_deref(), Some("beds"));
    }

    #[test]
    fn test_is_blank() {
        assert!(RawRecord::default().is_blank());
        assert!(RawRecord::new("   ").is_blank());
        assert!(!RawRecord::new("Bed").is_blank());
        assert!(!RawRecord::default().with_url("https://x/bedroom").is_blank());
    }
}
