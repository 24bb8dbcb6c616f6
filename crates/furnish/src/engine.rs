//! Main Furnish struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::catalog::RawRecord;
use crate::classify::{Classification, Classifier};
use crate::config::{EngineConfig, SyncConfig};
use crate::error::Result;
use crate::input::{BatchSource, ObservationReader};
use crate::reconcile::{self, Observation, ReconcileResult, Snapshot, SyncTotals};
use crate::taxonomy::Taxonomy;

/// How to treat a snapshot that cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapshotPolicy {
    /// Log a warning and diff against an empty store.
    #[default]
    Lenient,
    /// Fail the run.
    Strict,
}

/// Result of reconciling one batch file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Metadata about the batch file.
    pub source: BatchSource,
    #[serde(flatten)]
    pub result: ReconcileResult,
}

/// A vendor that could not be synced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorFailure {
    pub vendor: String,
    pub error: String,
}

/// Outcome of a multi-vendor sync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub runs: Vec<BatchResult>,
    pub failures: Vec<VendorFailure>,
    pub totals: SyncTotals,
}

/// The classification and reconciliation engine.
#[derive(Debug, Clone)]
pub struct Furnish {
    config: EngineConfig,
    classifier: Classifier,
    reader: ObservationReader,
}

impl Furnish {
    /// Create an engine over the built-in taxonomy.
    pub fn new() -> Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine, loading the taxonomy the config names.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        let taxonomy = match &config.taxonomy_dir {
            Some(dir) => Taxonomy::load_dir(dir)?,
            None => Taxonomy::builtin(),
        };
        Ok(Self::with_classifier(Classifier::new(taxonomy)?, config))
    }

    /// Create an engine around an existing classifier.
    pub fn with_classifier(classifier: Classifier, config: EngineConfig) -> Self {
        Self {
            config,
            classifier,
            reader: ObservationReader::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Classify one raw record.
    pub fn categorize(&self, record: &RawRecord) -> Classification {
        self.classifier.categorize_record(record)
    }

    /// Reconcile a batch of observations against a snapshot.
    pub fn reconcile<I>(&self, vendor: Option<&str>, observations: I, snapshot: &Snapshot) -> ReconcileResult
    where
        I: IntoIterator<Item = Observation>,
    {
        reconcile::reconcile(
            &self.classifier,
            vendor,
            observations,
            snapshot,
            self.config.reconcile_options(),
        )
    }

    /// Read a batch file and reconcile it against a snapshot.
    pub fn reconcile_file(
        &self,
        path: impl AsRef<Path>,
        vendor: Option<&str>,
        snapshot: &Snapshot,
    ) -> Result<BatchResult> {
        let (observations, source) = self.reader.read_file(path)?;
        info!(
            file = %source.file,
            records = source.record_count,
            vendor = vendor.unwrap_or("-"),
            "Reconciling batch"
        );
        let result = self.reconcile(vendor, observations, snapshot);
        Ok(BatchResult { source, result })
    }

    /// Load a snapshot, or an empty one when no path is given.
    pub fn load_snapshot(
        &self,
        path: Option<&Path>,
        vendor: Option<&str>,
        policy: SnapshotPolicy,
    ) -> Result<Snapshot> {
        let Some(path) = path else {
            return Ok(Snapshot::empty());
        };

        match Snapshot::load(path, vendor) {
            Ok(snapshot) => Ok(snapshot),
            Err(e) if policy == SnapshotPolicy::Lenient => {
                warn!(path = %path.display(), error = %e, "Cannot read snapshot, treating store as empty");
                Ok(Snapshot::empty())
            }
            Err(e) => Err(e),
        }
    }

    /// Reconcile the selected vendors of a sync config, in config order.
    ///
    /// A vendor whose files cannot be read is recorded as a failure and the
    /// run moves on. An unknown vendor name fails the whole call.
    pub fn sync<S: AsRef<str>>(
        &self,
        config: &SyncConfig,
        vendors: &[S],
        policy: SnapshotPolicy,
    ) -> Result<SyncReport> {
        let selected = config.select(vendors)?;
        let mut report = SyncReport::default();

        for (vendor, source) in selected {
            let snapshot_path = source.snapshot.as_deref().map(|p| config.resolve(p));
            let run = self
                .load_snapshot(snapshot_path.as_deref(), Some(vendor), policy)
                .and_then(|snapshot| {
                    self.reconcile_file(config.resolve(&source.observations), Some(vendor), &snapshot)
                });

            match run {
                Ok(batch) => {
                    report.totals.add(&batch.result.summary);
                    report.runs.push(batch);
                }
                Err(e) => {
                    error!(vendor, error = %e, "Vendor sync failed");
                    report.failures.push(VendorFailure {
                        vendor: vendor.to_string(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            vendors = report.totals.vendors_synced,
            products = report.totals.total_products,
            upserted = report.totals.upserted,
            deleted = report.totals.deleted,
            failed = report.failures.len(),
            "Sync complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Attributes;

    #[test]
    fn test_categorize() {
        let furnish = Furnish::new().unwrap();
        let result = furnish.categorize(&RawRecord::new("Bedside Table").with_url("https://x.com/bedroom/"));
        assert_eq!(result.room_types, vec!["Bedroom"]);
        assert_eq!(result.product_type.as_deref(), Some("Table"));
        assert_eq!(result.fixture_type.as_deref(), Some("Nightstand"));
    }

    #[test]
    fn test_reconcile_uses_config() {
        let config = EngineConfig::default().with_skip_unchanged(false);
        let furnish = Furnish::with_config(config).unwrap();
        let obs = Observation::new("A").with_attributes(Attributes::default().with_name("Oak Bench"));

        let first = furnish.reconcile(None, vec![obs.clone()], &Snapshot::empty());
        let stored = Snapshot::from_entities(first.plan.to_upsert.into_iter().map(|u| u.entity));
        let second = furnish.reconcile(None, vec![obs], &stored);

        assert_eq!(second.plan.updated(), 1);
        assert!(second.plan.to_skip.is_empty());
    }

    #[test]
    fn test_lenient_snapshot() {
        let furnish = Furnish::new().unwrap();
        let missing = Path::new("/nonexistent/store.json");

        let snapshot = furnish
            .load_snapshot(Some(missing), None, SnapshotPolicy::Lenient)
            .unwrap();
        assert!(snapshot.is_empty());
        assert!(furnish
            .load_snapshot(Some(missing), None, SnapshotPolicy::Strict)
            .is_err());
    }
}
