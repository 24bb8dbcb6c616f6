//! Taxonomy command - load, validate and describe a taxonomy.

use std::path::PathBuf;

use colored::Colorize;
use furnish::Taxonomy;

pub fn run(dir: Option<PathBuf>, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let taxonomy = match dir {
        Some(dir) => Taxonomy::load_dir(dir)?,
        None => Taxonomy::builtin(),
    };
    let stats = taxonomy.validate()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{} {}", "Taxonomy".cyan().bold(), stats.source.white());
    println!();
    println!("  Room types:     {}", stats.room_types.to_string().white().bold());
    println!("  Product types:  {}", stats.product_types.to_string().white().bold());
    println!(
        "  Fixture types:  {} across {} product types",
        stats.fixture_types.to_string().white().bold(),
        stats.fixture_groups
    );
    println!("  Keywords:       {}", stats.keywords.to_string().white());
    println!();
    println!("{} valid", "✓".green());

    Ok(())
}
