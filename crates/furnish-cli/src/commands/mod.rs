//! CLI command implementations.

pub mod categorize;
pub mod reconcile;
pub mod sync;
pub mod taxonomy;

use std::path::PathBuf;

use colored::Colorize;
use furnish::{EngineConfig, Furnish, SyncSummary};

use crate::cli::EngineArgs;

/// Build an engine, honouring the global `--taxonomy-dir`.
pub(crate) fn engine(
    mut config: EngineConfig,
    taxonomy_dir: Option<PathBuf>,
) -> Result<Furnish, Box<dyn std::error::Error>> {
    if let Some(dir) = taxonomy_dir {
        config = config.with_taxonomy_dir(dir);
    }
    Ok(Furnish::with_config(config)?)
}

/// Engine config from `--config`, with command-line flags applied on top.
pub(crate) fn engine_config(
    args: EngineArgs,
    taxonomy_dir: Option<PathBuf>,
) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = match args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if args.fill_missing {
        config = config.with_fill_missing_attributes(true);
    }
    if let Some(batch_size) = args.batch_size {
        config = config.with_batch_size(batch_size);
    }
    if let Some(dir) = taxonomy_dir {
        config = config.with_taxonomy_dir(dir);
    }
    Ok(config)
}

/// Print one vendor's counts.
pub(crate) fn print_summary(summary: &SyncSummary) {
    println!("  Observed:       {}", summary.observed.to_string().white());
    println!("  Products:       {}", summary.entities.to_string().white().bold());
    println!("  Created:        {}", summary.created.to_string().green());
    println!("  Updated:        {}", summary.updated.to_string().blue());
    println!("  Skipped:        {}", summary.skipped.to_string().dimmed());
    println!("  Deleted:        {}", summary.deleted.to_string().red());
    if summary.dropped > 0 {
        println!("  Dropped:        {}", summary.dropped.to_string().yellow());
    }
    if summary.unclassifiable > 0 {
        println!("  Unclassifiable: {}", summary.unclassifiable.to_string().yellow());
    }

    if !summary.product_types.is_empty() {
        println!("  {}", "Product types:".bold());
        for (product_type, count) in &summary.product_types {
            println!("    {:<22} {}", product_type, count);
        }
    }
    if !summary.room_types.is_empty() {
        println!("  {}", "Room types:".bold());
        for (room, count) in &summary.room_types {
            println!("    {:<22} {}", room, count);
        }
    }
    println!("  Multi-room:     {}", summary.multi_room.to_string().white());
}
