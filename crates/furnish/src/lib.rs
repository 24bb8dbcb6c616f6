//! Furnish: product classification and catalog reconciliation for furniture vendors.
//!
//! Vendor listings arrive as loosely structured records: a name, a category
//! page URL, perhaps a category label. Furnish assigns each product a room
//! set, a product type and a fixture type from a keyword taxonomy, then
//! reconciles a vendor's observed products against what the store already
//! holds and produces a minimal write plan.
//!
//! # Core Principles
//!
//! - **Deterministic**: the same inputs always yield the same classifications and plans
//! - **Pure**: no store I/O; the caller executes the plan
//! - **Lenient on data, strict on config**: bad records become issues, a bad taxonomy is an error
//!
//! # Example
//!
//! ```no_run
//! use furnish::{Furnish, Snapshot};
//!
//! let furnish = Furnish::new().unwrap();
//! let batch = furnish
//!     .reconcile_file("data/hvlgroup.json", Some("hvlgroup"), &Snapshot::empty())
//!     .unwrap();
//!
//! println!("Upserts: {}", batch.result.plan.to_upsert.len());
//! println!("Deletes: {}", batch.result.plan.to_delete.len());
//! ```

pub mod catalog;
pub mod classify;
pub mod config;
pub mod error;
pub mod input;
pub mod reconcile;
pub mod taxonomy;

mod engine;

pub use crate::engine::{BatchResult, Furnish, SnapshotPolicy, SyncReport, VendorFailure};
pub use catalog::{Attributes, ComparisonField, Entity, RawRecord, RoomTypes};
pub use classify::{Classification, Classifier};
pub use config::{EngineConfig, SyncConfig, VendorSource};
pub use error::{FurnishError, Result};
pub use input::{BatchSource, ObservationReader};
pub use reconcile::{
    DiffPlan, EntityTable, Issue, IssueKind, Observation, ReconcileResult, Snapshot, SyncSummary,
    SyncTotals,
};
pub use taxonomy::{Taxonomy, TaxonomyEntry, TaxonomyStats};
