//! Room, product and fixture taxonomies.
//!
//! A taxonomy is a list of named entries, each with the keywords that signal
//! it in vendor text. Taxonomies are loaded once at startup and handed to the
//! [`Classifier`](crate::Classifier) by value, so several can coexist (one per
//! test, for instance).
//!
//! ```ignore
//! use furnish::Taxonomy;
//!
//! // Use the built-in furniture taxonomy
//! let taxonomy = Taxonomy::builtin();
//!
//! // Or load from a directory of JSON files
//! let taxonomy = Taxonomy::load_dir("taxonomies")?;
//! ```

mod builtin;
mod loader;
mod table;

pub use loader::{FIXTURE_TYPES_FILE, PRODUCT_TYPES_FILE, ROOM_TYPES_FILE};
pub use table::{Taxonomy, TaxonomyEntry, TaxonomyStats};
