//! Categorize command - classify one product.

use std::path::PathBuf;

use colored::Colorize;
use furnish::{EngineConfig, RawRecord};

pub fn run(
    text: String,
    url: Option<String>,
    label: Option<String>,
    json_output: bool,
    taxonomy_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let furnish = super::engine(EngineConfig::default(), taxonomy_dir)?;

    let mut record = RawRecord::new(text);
    if let Some(url) = url {
        record = record.with_url(url);
    }
    if let Some(label) = label {
        record = record.with_label(label);
    }

    let classification = furnish.categorize(&record);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&classification)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Classification for".cyan().bold(),
        record.source_text.as_deref().unwrap_or("").white()
    );
    println!();
    println!("  Rooms:   {}", classification.room_types.join(", ").green());
    println!(
        "  Product: {}",
        classification
            .product_type
            .as_deref()
            .map(|p| p.green())
            .unwrap_or_else(|| "-".dimmed())
    );
    println!(
        "  Fixture: {}",
        classification
            .fixture_type
            .as_deref()
            .map(|f| f.green())
            .unwrap_or_else(|| "-".dimmed())
    );

    Ok(())
}
