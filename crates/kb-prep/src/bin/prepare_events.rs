//! Prepare event documents with metadata for knowledge-base ingestion
//!
//! Run with: cargo run -p kb-prep --bin prepare-events

use clap::Parser;
use std::path::PathBuf;

use kb_prep::processing::{self, RecordKind};
use kb_prep::providers::object_store_from_config;
use kb_prep::{telemetry, PrepConfig};

#[derive(Debug, Parser)]
#[command(version, about = "Prepare event documents with metadata sidecars")]
struct Args {
    /// Config file (defaults to kb-prep.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Event export (defaults to global_events.json)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Root of the local document tree (defaults to documents_to_upload)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();

    let mut config = PrepConfig::load(args.config.as_deref())?;
    if let Some(input) = args.input {
        config.output.events_input = input;
    }
    if let Some(output_dir) = args.output_dir {
        config.output.root = output_dir;
    }

    let store = object_store_from_config(&config).await?;
    match store.health_check().await {
        Ok(true) => tracing::info!("Uploading to {} store", store.name()),
        Ok(false) => tracing::warn!("{} store did not pass its health check", store.name()),
        Err(e) => tracing::warn!("{} store health check failed: {}", store.name(), e),
    }

    processing::run(RecordKind::Events, &config, store).await?;
    Ok(())
}
