//! Integration tests for product classification.

use furnish::classify::rules::MULTI_PURPOSE;
use furnish::{Classifier, Taxonomy, TaxonomyEntry};

fn classifier() -> Classifier {
    Classifier::builtin().expect("built-in taxonomy must compile")
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn test_nightstand_beats_side_table() {
    let result = classifier().categorize("Nightstand / Side Table", None, None);
    assert_eq!(result.product_type.as_deref(), Some("Table"));
    assert_eq!(result.fixture_type.as_deref(), Some("Nightstand"));
}

#[test]
fn test_sofa_subtypes_consolidate() {
    let c = classifier();
    for text in ["Sleeper Sofa", "Sectional Sofa", "Harbor Loveseat"] {
        let result = c.categorize(text, None, None);
        assert_eq!(result.product_type.as_deref(), Some("Sofa"), "{text}");
    }
}

#[test]
fn test_bedside_is_not_a_bed() {
    let result = classifier().categorize("Bedside Table", None, None);
    assert_eq!(result.product_type.as_deref(), Some("Table"));
    assert_ne!(result.product_type.as_deref(), Some("Bed"));
}

#[test]
fn test_word_boundaries() {
    let c = classifier();
    // "bedford" contains "bed", "tablet" contains "table"
    let result = c.categorize("Bedford Tablet Holder", None, None);
    assert_eq!(result.product_type, None);
    assert_eq!(result.room_types, vec![MULTI_PURPOSE]);

    // Trailing plural is allowed
    let result = c.categorize("Set of Two Ottomans", None, None);
    assert_eq!(result.product_type.as_deref(), Some("Ottoman"));
}

#[test]
fn test_label_overrides_text() {
    let c = classifier();
    let result = c.categorize("Wilkes Round Table", None, Some("Nightstands"));
    assert_eq!(result.product_type.as_deref(), Some("Nightstand"));
    assert_eq!(result.room_types, vec!["Bedroom"]);

    // Fixture still comes from the text
    let result = c.categorize("Wilkes Round Table", None, Some("Dining Tables"));
    assert_eq!(result.product_type.as_deref(), Some("Table"));
    assert_eq!(result.fixture_type.as_deref(), Some("Standard"));
}

#[test]
fn test_url_room_is_first_match() {
    let c = classifier();
    let result = c.categorize(
        "Archer Swivel Chair",
        Some("https://vendor.example.com/living-room/chairs"),
        None,
    );
    assert_eq!(result.room_types, vec!["Living Room"]);
    assert_eq!(result.product_type.as_deref(), Some("Chair"));
    assert_eq!(result.fixture_type.as_deref(), Some("Swivel Chair"));
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_room_fallback_from_product_type() {
    let result = classifier().categorize("Chandelier", None, None);
    assert_eq!(result.product_type.as_deref(), Some("Chandelier"));
    assert_eq!(
        result.room_types,
        Classifier::infer_room_types_from_product_type("Chandelier")
    );
    assert!(!result.room_types.is_empty());
}

#[test]
fn test_standard_fixture_default() {
    let result = classifier().categorize("Hudson Chair", None, None);
    assert_eq!(result.product_type.as_deref(), Some("Chair"));
    assert_eq!(result.fixture_type.as_deref(), Some("Standard"));

    let result = classifier().categorize("Odette Mirror", None, None);
    assert_eq!(result.product_type.as_deref(), Some("Mirror"));
    assert_eq!(result.fixture_type, None);
}

#[test]
fn test_empty_input() {
    let c = classifier();
    for (text, url, label) in [("", None, None), ("   ", Some(""), Some(""))] {
        let result = c.categorize(text, url, label);
        assert!(result.is_unclassified());
        assert_eq!(result.room_types, vec![MULTI_PURPOSE]);
    }
}

#[test]
fn test_deterministic() {
    let c = classifier();
    let inputs = [
        ("Nightstand / Side Table", None, None),
        ("Chaise", Some("https://x.com/outdoor/"), Some("Chairs & Chaises")),
        ("Canopy Bed", None, Some("beds")),
    ];
    for (text, url, label) in inputs {
        assert_eq!(c.categorize(text, url, label), c.categorize(text, url, label));
    }
}

// =============================================================================
// Custom taxonomies
// =============================================================================

#[test]
fn test_taxonomies_coexist() {
    let custom = Taxonomy::new(
        vec![TaxonomyEntry::new("Nursery", ["nursery"])],
        vec![TaxonomyEntry::new("Crib", ["crib", "cot"])],
        Default::default(),
    );
    let custom = Classifier::new(custom).unwrap();
    let builtin = classifier();

    let result = custom.categorize("Maple Crib", Some("https://x.com/nursery/"), None);
    assert_eq!(result.room_types, vec!["Nursery"]);
    assert_eq!(result.product_type.as_deref(), Some("Crib"));

    let result = builtin.categorize("Maple Crib", Some("https://x.com/nursery/"), None);
    assert_eq!(result.product_type, None);
}

#[test]
fn test_classifier_is_shareable_across_threads() {
    let c = std::sync::Arc::new(classifier());
    let handles: Vec<_> = ["Canopy Bed", "Sleeper Sofa", "Bar Stool"]
        .into_iter()
        .map(|text| {
            let c = std::sync::Arc::clone(&c);
            std::thread::spawn(move || c.categorize(text, None, None))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().product_type.is_some());
    }
}

#[test]
fn test_blank_keywords_are_rejected_at_construction() {
    let custom = Taxonomy::new(
        vec![
            TaxonomyEntry::new("Bedroom", ["bedroom", " "]),
            TaxonomyEntry::new("Office", ["office"]),
        ],
        vec![TaxonomyEntry::new("Bed", ["bed", ""])],
        Default::default(),
    );

    let err = Classifier::new(custom).unwrap_err();
    assert!(matches!(err, furnish::FurnishError::Taxonomy { .. }));
}
