//! Hand-ordered precedence tables.
//!
//! Every table here is evaluated first-match-wins. Order is part of the
//! contract: a narrower phrase must be listed before any broader phrase it
//! contains. The tests at the bottom pin the orderings that matter.

/// Room type applied when nothing else placed a product.
pub const MULTI_PURPOSE: &str = "Multi-Purpose";

/// Default fixture type for product types that have a "plain" variant.
pub const STANDARD_FIXTURE: &str = "Standard";

/// Category label keyword to product type, matched as a substring of the
/// lowercased label. Covers both `snake_case` category ids and the
/// "A & B" labels vendors show in their menus.
pub const CATEGORY_LABEL_RULES: &[(&str, &str)] = &[
    // Most specific matches first
    ("nightstand", "Nightstand"),
    ("bedside", "Nightstand"),
    ("dining table", "Table"),
    ("dining_table", "Table"),
    ("cocktail table", "Table"),
    ("cocktail_table", "Table"),
    ("side table", "Side Table"),
    ("side_table", "Side Table"),
    ("center table", "Table"),
    ("center_table", "Table"),
    ("game table", "Table"),
    ("game_table", "Table"),
    ("sofa & loveseat", "Sofa"),
    ("sofas_loveseat", "Sofa"),
    ("loveseat", "Loveseat"),
    ("sectional", "Sofa"),
    ("settee", "Settee"),
    ("banquette", "Settee"),
    ("chair & chaise", "Chair"),
    ("chairs_chaise", "Chair"),
    ("chaise", "Ottoman"),
    ("ottoman", "Ottoman"),
    ("bench", "Bench"),
    ("desk & console", "Desk"),
    ("desk", "Desk"),
    ("console & credenza", "Console"),
    ("console", "Console"),
    ("credenza", "Console"),
    ("dresser", "Dresser"),
    // Stools before "bar" so "Bar & Counter Stools" is not a bar cart
    ("counter stool", "Stool"),
    ("bar stool", "Stool"),
    ("bar & counter stool", "Stool"),
    ("bar cart", "Bar Cart"),
    ("bar_cart", "Bar Cart"),
    ("bar & bar cart", "Bar Cart"),
    ("bookcase & display", "Bookcase"),
    ("bookcase", "Bookcase"),
    ("display cabinet", "Cabinet"),
    ("display", "Cabinet"),
    ("mirror", "Mirror"),
    ("accent", "Accent"),
    ("tray", "Accent"),
    ("lighting", "Table Lamp"),
    ("stool", "Stool"),
    ("chest", "Dresser"),
    // Less specific matches last
    ("bed", "Bed"),
    ("chair", "Chair"),
    ("sofa", "Sofa"),
    ("table", "Table"),
];

/// Near-synonym sub-types folded into one canonical product type before the
/// general taxonomy runs. Matched on word boundaries.
pub const CONSOLIDATION_RULES: &[(&str, &str)] = &[
    // A sofa table is a console, not a sofa
    ("sofa table", "Table"),
    ("sectional", "Sofa"),
    ("sleeper", "Sofa"),
    ("loveseat", "Sofa"),
    ("love seat", "Sofa"),
    ("sofa", "Sofa"),
    ("nightstand", "Table"),
    ("night stand", "Table"),
    ("bedside", "Table"),
    ("console", "Table"),
    ("credenza", "Table"),
    ("sideboard", "Table"),
    ("side table", "Table"),
    ("end table", "Table"),
];

/// Fixture types that win over the fixture taxonomy for a product type,
/// as `(product type, keyword, fixture type)`.
pub const FIXTURE_OVERRIDES: &[(&str, &str, &str)] = &[
    ("Table", "nightstand", "Nightstand"),
    ("Table", "night stand", "Nightstand"),
    ("Table", "bedside", "Nightstand"),
    ("Chair", "swivel", "Swivel Chair"),
];

/// Product types whose unmatched fixture falls back to [`STANDARD_FIXTURE`].
pub const STANDARD_FIXTURE_PRODUCTS: &[&str] = &["Chair", "Sofa", "Table"];

/// Rooms a product type typically belongs in. Used only when the source URL
/// named no room.
pub const PRODUCT_ROOMS: &[(&str, &[&str])] = &[
    ("Bed", &["Bedroom"]),
    ("Nightstand", &["Bedroom"]),
    ("Dresser", &["Bedroom"]),
    ("Sofa", &["Living Room"]),
    ("Loveseat", &["Living Room"]),
    ("Settee", &["Living Room", "Dining Room"]),
    ("Chair", &["Living Room", "Dining Room", "Office", MULTI_PURPOSE]),
    ("Ottoman", &["Living Room", "Bedroom"]),
    ("Bench", &["Entryway", "Bedroom", "Dining Room"]),
    ("Stool", &["Kitchen", "Dining Room", "Bar"]),
    ("Table", &["Living Room", "Dining Room", MULTI_PURPOSE]),
    ("Console", &["Living Room", "Dining Room", "Entryway"]),
    ("Chandelier", &["Dining Room", "Living Room", "Entryway", MULTI_PURPOSE]),
    ("Pendant", &["Kitchen", "Dining Room", "Living Room", MULTI_PURPOSE]),
    ("Wall Sconce", &["Entryway", "Bathroom", "Living Room", MULTI_PURPOSE]),
    ("Table Lamp", &["Living Room", "Bedroom", "Office", MULTI_PURPOSE]),
    ("Floor Lamp", &["Living Room", "Bedroom", "Office"]),
    ("Desk", &["Office"]),
    ("Bookcase", &["Office", "Living Room"]),
    ("Cabinet", &["Dining Room", "Living Room"]),
    ("Bar Cart", &["Dining Room", "Living Room", "Bar"]),
    ("Side Table", &["Living Room", "Bedroom", MULTI_PURPOSE]),
    ("Drink Table", &["Living Room", MULTI_PURPOSE]),
    ("Mirror", &["Entryway", "Bathroom", "Bedroom", MULTI_PURPOSE]),
    ("Plant Stand", &["Living Room", "Entryway", MULTI_PURPOSE]),
    ("Pillow", &["Living Room", "Bedroom", "Outdoor", MULTI_PURPOSE]),
];

/// First category-label rule whose keyword occurs in `label_lower`.
pub fn match_category_label(label_lower: &str) -> Option<&'static str> {
    CATEGORY_LABEL_RULES
        .iter()
        .find(|(keyword, _)| label_lower.contains(keyword))
        .map(|(_, product_type)| *product_type)
}

/// Typical rooms for a product type; unknown types map to [`MULTI_PURPOSE`].
pub fn rooms_for_product_type(product_type: &str) -> &'static [&'static str] {
    PRODUCT_ROOMS
        .iter()
        .find(|(name, _)| *name == product_type)
        .map(|(_, rooms)| *rooms)
        .unwrap_or(&[MULTI_PURPOSE])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(keyword: &str) -> usize {
        CATEGORY_LABEL_RULES
            .iter()
            .position(|(k, _)| *k == keyword)
            .unwrap_or_else(|| panic!("missing label rule '{keyword}'"))
    }

    #[test]
    fn test_label_rules_list_narrow_phrases_first() {
        // Any keyword that contains another keyword must come before it.
        for (i, (narrow, _)) in CATEGORY_LABEL_RULES.iter().enumerate() {
            for (j, (broad, _)) in CATEGORY_LABEL_RULES.iter().enumerate() {
                if narrow != broad && narrow.contains(broad) && !narrow.contains('&') {
                    assert!(i < j, "'{narrow}' must precede '{broad}'");
                }
            }
        }
    }

    #[test]
    fn test_label_rule_pins() {
        assert!(position("bedside") < position("bed"));
        assert!(position("dining table") < position("table"));
        assert!(position("counter stool") < position("bar cart"));
        assert!(position("chair & chaise") < position("chaise"));
    }

    #[test]
    fn test_match_category_label() {
        assert_eq!(match_category_label("nightstands & bedside tables"), Some("Nightstand"));
        assert_eq!(match_category_label("dining_tables"), Some("Table"));
        assert_eq!(match_category_label("bar & counter stools"), Some("Stool"));
        assert_eq!(match_category_label("chairs & chaises"), Some("Chair"));
        assert_eq!(match_category_label("chaise lounges"), Some("Ottoman"));
        assert_eq!(match_category_label("beds"), Some("Bed"));
        assert_eq!(match_category_label("rugs"), None);
    }

    #[test]
    fn test_consolidation_sofa_table_before_sofa() {
        let sofa_table = CONSOLIDATION_RULES.iter().position(|(k, _)| *k == "sofa table");
        let sofa = CONSOLIDATION_RULES.iter().position(|(k, _)| *k == "sofa");
        assert!(sofa_table < sofa);
    }

    #[test]
    fn test_rooms_for_product_type() {
        assert_eq!(rooms_for_product_type("Bed"), &["Bedroom"]);
        assert_eq!(rooms_for_product_type("Spaceship"), &[MULTI_PURPOSE]);
        assert!(rooms_for_product_type("Chandelier").contains(&"Dining Room"));
    }
}
