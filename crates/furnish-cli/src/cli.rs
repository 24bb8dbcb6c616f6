//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Furnish: furniture catalog classification and reconciliation
#[derive(Parser)]
#[command(name = "furnish")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory with room_types.json, product_types.json and fixture_types.json
    #[arg(long, global = true, value_name = "DIR")]
    pub taxonomy_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a single product
    Categorize {
        /// Product text, usually its name
        #[arg(value_name = "TEXT")]
        text: String,

        /// Category page URL the product was listed on
        #[arg(long)]
        url: Option<String>,

        /// Vendor category label
        #[arg(long)]
        label: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reconcile an observation batch against a store snapshot
    Reconcile {
        /// Observation batch (JSON array or CSV/TSV)
        #[arg(value_name = "OBSERVATIONS")]
        file: PathBuf,

        /// Export of the vendor's stored rows
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Vendor the batch belongs to
        #[arg(long)]
        vendor: Option<String>,

        /// Write the plan to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail instead of assuming an empty store when the snapshot cannot be read
        #[arg(long)]
        strict_snapshot: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Reconcile every vendor in a sync config
    Sync {
        /// Sync configuration file
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Vendors to sync (default: all)
        #[arg(value_name = "VENDOR")]
        vendors: Vec<String>,

        /// Write one plan per vendor into this directory
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Fail a vendor instead of assuming an empty store when its snapshot cannot be read
        #[arg(long)]
        strict_snapshot: bool,
    },

    /// Load and validate a taxonomy, then print its statistics
    Taxonomy {
        /// Taxonomy directory (default: built-in taxonomy)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Engine settings for a single reconcile run.
#[derive(Args)]
pub struct EngineArgs {
    /// Engine configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Let repeat sightings fill attributes the first sighting lacked
    #[arg(long)]
    pub fill_missing: bool,

    /// Upserts per store call
    #[arg(long, value_name = "N")]
    pub batch_size: Option<usize>,
}
