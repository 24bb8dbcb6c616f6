//! Product classification.
//!
//! Three signals, in decreasing order of trust:
//!
//! 1. **Category URL**: names a room ("/luxury-bedroom-furniture/").
//! 2. **Category label**: the vendor's own menu entry ("Dining Tables").
//! 3. **Product text**: the display name, matched against the taxonomy.
//!
//! The ordered tables in [`rules`] resolve overlaps between keywords.

mod classifier;
mod matcher;
pub mod rules;

pub use classifier::{Classification, Classifier};
pub use matcher::KeywordMatcher;
