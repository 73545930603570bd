//! Point the knowledge-base data source at the documents/ and locations/ prefixes
//!
//! Run with: cargo run -p kb-prep --bin update-data-source-prefixes

use clap::Parser;
use std::path::PathBuf;

use kb_prep::providers::aws::{load_sdk_config, BedrockAgentClient};
use kb_prep::providers::data_source::update_inclusion_prefixes;
use kb_prep::{telemetry, Error, PrepConfig};

#[derive(Debug, Parser)]
#[command(version, about = "Update knowledge-base data source inclusion prefixes")]
struct Args {
    /// Config file (defaults to kb-prep.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let args = Args::parse();

    let config = PrepConfig::load(args.config.as_deref())?;
    if config.backend != kb_prep::config::BackendProvider::Aws {
        return Err(Error::config("data source updates require backend = \"aws\"").into());
    }

    let sdk_config = load_sdk_config(&config.aws).await;
    let client = BedrockAgentClient::new(&sdk_config)?;
    update_inclusion_prefixes(&client, &config).await?;

    tracing::info!("You can now run the ingestion job to index location documents.");
    Ok(())
}
