//! Furnish CLI - furniture catalog classification and reconciliation.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "furnish=debug" } else { "furnish=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let taxonomy_dir = cli.taxonomy_dir;

    let result = match cli.command {
        Commands::Categorize {
            text,
            url,
            label,
            json,
        } => commands::categorize::run(text, url, label, json, taxonomy_dir),

        Commands::Reconcile {
            file,
            snapshot,
            vendor,
            output,
            strict_snapshot,
            json,
            engine,
        } => commands::engine_config(engine, taxonomy_dir).and_then(|config| {
            commands::reconcile::run(file, snapshot, vendor, output, strict_snapshot, json, config)
        }),

        Commands::Sync {
            config,
            vendors,
            output_dir,
            strict_snapshot,
        } => commands::sync::run(config, vendors, output_dir, strict_snapshot, taxonomy_dir),

        Commands::Taxonomy { dir, json } => commands::taxonomy::run(dir.or(taxonomy_dir), json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
