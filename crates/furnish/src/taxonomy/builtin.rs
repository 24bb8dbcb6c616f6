//! Built-in furniture taxonomy.

use indexmap::IndexMap;

use super::table::{Taxonomy, TaxonomyEntry};

/// Room types in URL-matching order. Keywords are matched as plain
/// substrings of the lowercased category URL.
const ROOM_TYPES: &[(&str, &[&str])] = &[
    ("Bedroom", &["bedroom", "bed-room"]),
    ("Living Room", &["living-room", "living_room", "livingroom", "living"]),
    ("Dining Room", &["dining"]),
    ("Kitchen", &["kitchen"]),
    ("Office", &["office", "workspace"]),
    ("Outdoor", &["outdoor", "patio"]),
    ("Entryway", &["entryway", "entrance", "foyer"]),
    ("Bathroom", &["bathroom", "bath"]),
    ("Bar", &["home-bar", "bar-room"]),
];

/// Product types. Matched longest keyword first on word boundaries, after
/// the consolidation rules in [`crate::classify::rules`].
const PRODUCT_TYPES: &[(&str, &[&str])] = &[
    // === Seating ===
    ("Sofa", &["sofa", "couch", "chesterfield"]),
    ("Settee", &["settee", "banquette"]),
    ("Chair", &["chair", "armchair", "recliner", "chaise", "rocker", "wingback", "glider"]),
    ("Ottoman", &["ottoman", "pouf", "footstool", "hassock"]),
    ("Bench", &["bench"]),
    ("Stool", &["stool", "bar stool", "counter stool"]),

    // === Bedroom ===
    ("Bed", &[
        "bed", "headboard", "daybed", "canopy bed", "platform bed",
        "panel bed", "sleigh bed", "poster bed", "bunk bed",
    ]),
    ("Dresser", &["dresser", "chest", "bureau", "highboy", "lowboy", "chest of drawers"]),

    // === Tables & Storage ===
    ("Table", &[
        "table", "cocktail table", "coffee table", "dining table",
        "game table", "center table", "accent table",
    ]),
    ("Desk", &["desk", "writing desk", "secretary"]),
    ("Bookcase", &["bookcase", "bookshelf", "etagere"]),
    ("Cabinet", &["cabinet", "display cabinet", "curio", "hutch", "armoire", "media cabinet"]),
    ("Bar Cart", &["bar cart", "serving cart", "tea cart"]),

    // === Lighting ===
    ("Chandelier", &["chandelier"]),
    ("Pendant", &["pendant", "lantern"]),
    ("Wall Sconce", &["sconce", "wall sconce"]),
    ("Table Lamp", &["table lamp", "lamp", "buffet lamp"]),
    ("Floor Lamp", &["floor lamp"]),

    // === Accents ===
    ("Mirror", &["mirror"]),
    ("Plant Stand", &["plant stand"]),
    ("Pillow", &["pillow", "throw pillow"]),
    ("Accent", &["tray", "vase", "bowl", "sculpture", "decorative box"]),
    ("Rug", &["rug"]),
];

/// Fixture sub-types keyed by product type. Same matching policy as
/// product types.
const FIXTURE_TYPES: &[(&str, &[(&str, &[&str])])] = &[
    ("Table", &[
        ("Nightstand", &["nightstand", "night stand", "bedside table", "bedside chest"]),
        ("Dining Table", &["dining table", "extension table", "trestle table"]),
        ("Coffee Table", &["coffee table", "cocktail table"]),
        ("Side Table", &["side table", "end table", "accent table", "drink table", "martini table", "lamp table"]),
        ("Console", &["console", "sofa table", "credenza", "sideboard", "buffet"]),
        ("Game Table", &["game table", "card table"]),
        ("Center Table", &["center table", "foyer table", "entry table"]),
    ]),
    ("Chair", &[
        ("Swivel Chair", &["swivel"]),
        ("Recliner", &["recliner", "reclining"]),
        ("Dining Chair", &["dining chair", "side chair"]),
        ("Lounge Chair", &["lounge chair", "club chair"]),
        ("Wing Chair", &["wing chair", "wingback"]),
        ("Accent Chair", &["accent chair", "occasional chair", "slipper chair"]),
        ("Chaise", &["chaise"]),
        ("Rocking Chair", &["rocker", "rocking chair", "glider"]),
    ]),
    ("Sofa", &[
        ("Sectional", &["sectional"]),
        ("Sleeper", &["sleeper", "sleep sofa"]),
        ("Loveseat", &["loveseat", "love seat"]),
        ("Apartment Sofa", &["apartment sofa"]),
    ]),
    ("Bed", &[
        ("Canopy Bed", &["canopy"]),
        ("Panel Bed", &["panel bed"]),
        ("Sleigh Bed", &["sleigh"]),
        ("Poster Bed", &["poster"]),
        ("Platform Bed", &["platform"]),
        ("Upholstered Bed", &["upholstered"]),
        ("Daybed", &["daybed"]),
    ]),
    ("Stool", &[
        ("Bar Stool", &["bar stool", "bar height"]),
        ("Counter Stool", &["counter stool", "counter height"]),
    ]),
];

fn entries(table: &[(&str, &[&str])]) -> Vec<TaxonomyEntry> {
    table
        .iter()
        .map(|(name, keywords)| TaxonomyEntry::new(*name, keywords.iter().copied()))
        .collect()
}

impl Taxonomy {
    /// The built-in furniture taxonomy.
    pub fn builtin() -> Self {
        let fixtures: IndexMap<String, Vec<TaxonomyEntry>> = FIXTURE_TYPES
            .iter()
            .map(|(product, table)| (product.to_string(), entries(table)))
            .collect();

        Taxonomy::new(entries(ROOM_TYPES), entries(PRODUCT_TYPES), fixtures).with_source("built-in")
    }
}
