//! Reading observation batches from disk.

mod reader;
mod source;

pub use reader::{InputFormat, ObservationReader};
pub use source::{is_null_value, BatchSource};
