//! Catalog data model.

mod entity;
mod record;
pub mod values;

pub use entity::{Attributes, ComparisonField, Entity, RoomTypes};
pub use record::RawRecord;
