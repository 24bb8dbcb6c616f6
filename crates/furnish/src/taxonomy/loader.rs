//! Load taxonomy tables from JSON files.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{FurnishError, Result};

use super::table::{Taxonomy, TaxonomyEntry};

/// File holding `{"room_types": [...]}`.
pub const ROOM_TYPES_FILE: &str = "room_types.json";
/// File holding `{"product_types": [...]}`.
pub const PRODUCT_TYPES_FILE: &str = "product_types.json";
/// Optional file holding `{"fixture_types": {"<product type>": [...]}}`.
pub const FIXTURE_TYPES_FILE: &str = "fixture_types.json";

#[derive(Deserialize)]
struct RoomTypesFile {
    room_types: Vec<TaxonomyEntry>,
}

#[derive(Deserialize)]
struct ProductTypesFile {
    product_types: Vec<TaxonomyEntry>,
}

#[derive(Deserialize)]
struct FixtureTypesFile {
    fixture_types: IndexMap<String, Vec<TaxonomyEntry>>,
}

impl Taxonomy {
    /// Load and validate a taxonomy from a directory.
    ///
    /// The room and product files are required. A missing fixture file
    /// leaves the fixture table empty.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        let rooms: RoomTypesFile = read_json(&dir.join(ROOM_TYPES_FILE))?;
        let products: ProductTypesFile = read_json(&dir.join(PRODUCT_TYPES_FILE))?;

        let fixture_path = dir.join(FIXTURE_TYPES_FILE);
        let fixtures = if fixture_path.exists() {
            read_json::<FixtureTypesFile>(&fixture_path)?.fixture_types
        } else {
            tracing::debug!(path = %fixture_path.display(), "no fixture taxonomy, fixture types disabled");
            IndexMap::new()
        };

        let taxonomy = Taxonomy::new(rooms.room_types, products.product_types, fixtures)
            .with_source(dir.display().to_string());
        let stats = taxonomy.validate()?;

        tracing::info!(
            source = %stats.source,
            rooms = stats.room_types,
            products = stats.product_types,
            fixtures = stats.fixture_types,
            "taxonomy loaded"
        );

        Ok(taxonomy)
    }

    /// Parse a taxonomy from in-memory JSON documents.
    pub fn from_json_str(rooms: &str, products: &str, fixtures: Option<&str>) -> Result<Self> {
        let rooms: RoomTypesFile = serde_json::from_str(rooms)
            .map_err(|e| FurnishError::taxonomy(ROOM_TYPES_FILE, e.to_string()))?;
        let products: ProductTypesFile = serde_json::from_str(products)
            .map_err(|e| FurnishError::taxonomy(PRODUCT_TYPES_FILE, e.to_string()))?;
        let fixtures = match fixtures {
            Some(json) => {
                serde_json::from_str::<FixtureTypesFile>(json)
                    .map_err(|e| FurnishError::taxonomy(FIXTURE_TYPES_FILE, e.to_string()))?
                    .fixture_types
            }
            None => IndexMap::new(),
        };

        let taxonomy = Taxonomy::new(rooms.room_types, products.product_types, fixtures);
        taxonomy.validate()?;
        Ok(taxonomy)
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let source_name = path.display().to_string();
    let contents = fs::read_to_string(path)
        .map_err(|e| FurnishError::taxonomy(&source_name, format!("cannot read file: {e}")))?;
    serde_json::from_str(&contents)
        .map_err(|e| FurnishError::taxonomy(&source_name, format!("malformed JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const ROOMS: &str = r#"{"room_types": [{"name": "Bedroom", "keywords": ["Bedroom"]}]}"#;
    const PRODUCTS: &str = r#"{"product_types": [{"name": "Bed", "keywords": ["bed", "headboard"]}]}"#;
    const FIXTURES: &str = r#"{"fixture_types": {"Bed": [{"name": "Canopy", "keywords": ["canopy"]}]}}"#;

    fn write_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_load_dir_with_fixtures() {
        let dir = write_dir(&[
            (ROOM_TYPES_FILE, ROOMS),
            (PRODUCT_TYPES_FILE, PRODUCTS),
            (FIXTURE_TYPES_FILE, FIXTURES),
        ]);
        let taxonomy = Taxonomy::load_dir(dir.path()).unwrap();

        assert_eq!(taxonomy.room_types[0].keywords, vec!["bedroom"]);
        assert_eq!(taxonomy.fixtures_for("Bed").len(), 1);
        assert_eq!(taxonomy.source(), dir.path().display().to_string());
    }

    #[test]
    fn test_load_dir_without_fixtures() {
        let dir = write_dir(&[(ROOM_TYPES_FILE, ROOMS), (PRODUCT_TYPES_FILE, PRODUCTS)]);
        let taxonomy = Taxonomy::load_dir(dir.path()).unwrap();
        assert!(taxonomy.fixture_types.is_empty());
    }

    #[test]
    fn test_load_dir_missing_products_is_fatal() {
        let dir = write_dir(&[(ROOM_TYPES_FILE, ROOMS)]);
        let err = Taxonomy::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, FurnishError::Taxonomy { .. }));
        assert!(err.to_string().contains(PRODUCT_TYPES_FILE));
    }

    #[test]
    fn test_load_dir_malformed_json_is_fatal() {
        let dir = write_dir(&[(ROOM_TYPES_FILE, "{not json"), (PRODUCT_TYPES_FILE, PRODUCTS)]);
        let err = Taxonomy::load_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("malformed JSON"));
    }

    #[test]
    fn test_from_json_str() {
        let taxonomy = Taxonomy::from_json_str(ROOMS, PRODUCTS, Some(FIXTURES)).unwrap();
        assert_eq!(taxonomy.product_types.len(), 1);
        assert_eq!(taxonomy.fixtures_for("Bed")[0].name, "Canopy");
    }
}
