//! Sync command - reconcile every configured vendor.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use furnish::{SnapshotPolicy, SyncConfig};
use tracing::debug;

pub fn run(
    config_path: PathBuf,
    vendors: Vec<String>,
    output_dir: Option<PathBuf>,
    strict_snapshot: bool,
    taxonomy_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = SyncConfig::load(&config_path)?;
    let furnish = super::engine(config.engine.clone(), taxonomy_dir)?;
    let policy = if strict_snapshot {
        SnapshotPolicy::Strict
    } else {
        SnapshotPolicy::Lenient
    };

    let report = furnish.sync(&config, &vendors, policy)?;

    if let Some(ref dir) = output_dir {
        fs::create_dir_all(dir)?;
    }

    for batch in &report.runs {
        let vendor = batch.result.summary.vendor.as_deref().unwrap_or("unknown");
        println!("{}", "=".repeat(60));
        println!("{} {}", "Vendor:".cyan().bold(), vendor.to_uppercase().white().bold());
        println!("{}", "=".repeat(60));
        println!("  File:           {}", batch.source.path.display());
        super::print_summary(&batch.result.summary);

        let batches = batch.result.plan.upsert_batches(config.engine.batch_size).count();
        println!("  Upsert batches: {}", batches);

        if let Some(ref dir) = output_dir {
            let path = dir.join(format!("{}.plan.json", vendor));
            fs::write(&path, serde_json::to_string_pretty(&batch.result.plan)?)?;
            debug!(vendor, path = %path.display(), "Wrote plan");
            println!("  Plan:           {}", path.display().to_string().white());
        }
        println!();
    }

    for failure in &report.failures {
        println!(
            "{} {}: {}",
            "Failed".red().bold(),
            failure.vendor.white(),
            failure.error
        );
    }

    let totals = &report.totals;
    println!("{}", "=".repeat(60));
    println!("{}", "Totals".cyan().bold());
    println!("{}", "=".repeat(60));
    println!("  Vendors synced: {}", totals.vendors_synced.to_string().white().bold());
    println!("  Products:       {}", totals.total_products.to_string().white());
    println!("  Upserted:       {}", totals.upserted.to_string().green());
    println!("  Skipped:        {}", totals.skipped.to_string().dimmed());
    println!("  Deleted:        {}", totals.deleted.to_string().red());
    if totals.dropped > 0 {
        println!("  Dropped:        {}", totals.dropped.to_string().yellow());
    }

    if !report.failures.is_empty() {
        return Err(format!("{} vendor(s) failed to sync", report.failures.len()).into());
    }

    Ok(())
}
