use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nutrition_lookup::{export, Catalog, Origin};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Dump the nutrition catalog as flat JSON for the offline client copy.
#[derive(Debug, Parser)]
#[command(name = "export-catalog", version)]
struct Args {
    /// Only export one origin (regional or international)
    #[arg(long)]
    origin: Option<Origin>,

    /// Write to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Indent the JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let catalog = Catalog::global();

    for origin in Origin::ALL {
        info!(
            origin = %origin,
            entries = catalog.count_by_origin(origin),
            "catalog summary"
        );
    }

    let json = export::to_json_filtered(catalog, args.origin, args.pretty)?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, json.as_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = json.len(), "catalog exported");
        }
        None => println!("{}", json),
    }

    Ok(())
}
