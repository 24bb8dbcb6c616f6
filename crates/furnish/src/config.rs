//! Engine and multi-vendor sync configuration.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FurnishError, Result};
use crate::reconcile::ReconcileOptions;

/// Default number of upserts handed to the store per call.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Configuration for a [`crate::Furnish`] engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory with taxonomy files. `None` uses the built-in taxonomy.
    pub taxonomy_dir: Option<PathBuf>,
    /// Leave unchanged entities out of the upsert list.
    pub skip_unchanged: bool,
    /// Let repeat sightings fill attributes that are still absent.
    pub fill_missing_attributes: bool,
    /// Upserts per store call.
    pub batch_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            taxonomy_dir: None,
            skip_unchanged: true,
            fill_missing_attributes: false,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl EngineConfig {
    /// Load from a JSON file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// Use taxonomy files from a directory.
    pub fn with_taxonomy_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.taxonomy_dir = Some(dir.into());
        self
    }

    /// Set whether unchanged entities are skipped.
    pub fn with_skip_unchanged(mut self, skip: bool) -> Self {
        self.skip_unchanged = skip;
        self
    }

    /// Set whether repeat sightings fill absent attributes.
    pub fn with_fill_missing_attributes(mut self, fill: bool) -> Self {
        self.fill_missing_attributes = fill;
        self
    }

    /// Set the upsert batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Options handed to each reconciliation run.
    pub fn reconcile_options(&self) -> ReconcileOptions {
        ReconcileOptions {
            skip_unchanged: self.skip_unchanged,
            fill_missing_attributes: self.fill_missing_attributes,
        }
    }
}

/// Where one vendor's data lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorSource {
    /// Observation batch file.
    pub observations: PathBuf,
    /// Export of the vendor's stored rows, if any.
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

/// Configuration for syncing several vendors in one go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Base directory for relative paths. Defaults to the config file's directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Vendors in run order.
    pub vendors: IndexMap<String, VendorSource>,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl SyncConfig {
    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config: SyncConfig = read_json(path)?;

        if config.data_dir.is_none() {
            config.data_dir = path.parent().map(Path::to_path_buf);
        }
        if config.vendors.is_empty() {
            return Err(FurnishError::Config(format!(
                "{} lists no vendors",
                path.display()
            )));
        }
        // Vendor names become plan file names.
        if let Some(name) = config.vendor_names().find(|n| !is_plain_name(n)) {
            return Err(FurnishError::Config(format!(
                "{}: vendor name '{}' must be non-blank and free of path separators",
                path.display(),
                name
            )));
        }
        Ok(config)
    }

    /// Resolve a configured path against `data_dir`.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Vendor names in run order.
    pub fn vendor_names(&self) -> impl Iterator<Item = &str> {
        self.vendors.keys().map(|k| k.as_str())
    }

    /// Pick the vendors to run. An empty selection means all of them.
    pub fn select<'a, S: AsRef<str>>(&'a self, names: &[S]) -> Result<Vec<(&'a str, &'a VendorSource)>> {
        if names.is_empty() {
            return Ok(self.vendors.iter().map(|(k, v)| (k.as_str(), v)).collect());
        }

        let invalid: Vec<&str> = names
            .iter()
            .map(|n| n.as_ref())
            .filter(|n| !self.vendors.contains_key(*n))
            .collect();
        if !invalid.is_empty() {
            return Err(FurnishError::Config(format!(
                "invalid vendor names: {}. Valid vendors: {}",
                invalid.join(", "),
                self.vendor_names().collect::<Vec<_>>().join(", ")
            )));
        }

        Ok(names
            .iter()
            .filter_map(|n| self.vendors.get_key_value(n.as_ref()))
            .map(|(k, v)| (k.as_str(), v))
            .collect())
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| FurnishError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content)
        .map_err(|e| FurnishError::Config(format!("{}: {}", path.display(), e)))
}
