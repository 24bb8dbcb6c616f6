//! Reconcile command - diff one observation batch against a snapshot.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use furnish::{EngineConfig, IssueKind, SnapshotPolicy};
use tracing::debug;

pub fn run(
    file: PathBuf,
    snapshot: Option<PathBuf>,
    vendor: Option<String>,
    output: Option<PathBuf>,
    strict_snapshot: bool,
    json_output: bool,
    config: EngineConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let furnish = super::engine(config, None)?;
    let policy = if strict_snapshot {
        SnapshotPolicy::Strict
    } else {
        SnapshotPolicy::Lenient
    };

    let vendor = vendor.as_deref();
    let snapshot = furnish.load_snapshot(snapshot.as_deref(), vendor, policy)?;
    let batch = furnish.reconcile_file(&file, vendor, &snapshot)?;

    if let Some(ref output_path) = output {
        fs::write(output_path, serde_json::to_string_pretty(&batch.result.plan)?)?;
        debug!(path = %output_path.display(), "Wrote plan");
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    println!(
        "{} {} ({} records, {})",
        "Reconciled".cyan().bold(),
        batch.source.file.white(),
        batch.source.record_count,
        batch.source.format
    );
    if let Some(vendor) = vendor {
        println!("  Vendor:         {}", vendor.white().bold());
    }
    super::print_summary(&batch.result.summary);
    let batches = batch.result.plan.upsert_batches(furnish.config().batch_size).count();
    println!("  Upsert batches: {}", batches);

    let issues = &batch.result.issues;
    if !issues.is_empty() {
        println!();
        println!("{}", "Issues:".yellow().bold());
        for issue in issues {
            let label = match issue.kind {
                IssueKind::MissingKey => issue.kind.label().red(),
                IssueKind::UnclassifiableInput | IssueKind::UnknownRoomHint => {
                    issue.kind.label().yellow()
                }
            };
            println!(
                "  [{}] record {}{}: {}",
                label,
                issue.record,
                issue
                    .sku
                    .as_deref()
                    .map(|s| format!(" ({})", s))
                    .unwrap_or_default(),
                issue.detail
            );
        }
    }

    if let Some(output_path) = output {
        println!();
        println!("Plan written to {}", output_path.display().to_string().white());
    }

    Ok(())
}
