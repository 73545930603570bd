//! Preparation runs for events and locations
//!
//! Two error tiers: loading the export or building the output directory is
//! fatal and returned to the caller; anything that goes wrong inside one
//! record is logged with the record id and counted as skipped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use super::writer::DocumentWriter;
use crate::config::{PrepConfig, ProcessingConfig};
use crate::error::Result;
use crate::ingestion::extractor::content_len;
use crate::ingestion::{event_content, load_records, location_documents};
use crate::ingestion::{event_metadata, location_metadata};
use crate::providers::ObjectStoreProvider;
use crate::types::record::decode_record;
use crate::types::{EventRecord, LocationRecord, RecordSet};

/// Kind of exported record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Events,
    Locations,
}

impl RecordKind {
    /// Object key prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Events => "events/",
            Self::Locations => "locations/",
        }
    }

    /// Sub-directory of the local output root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Locations => "locations",
        }
    }

    /// Singular noun for log lines
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Events => "event",
            Self::Locations => "location",
        }
    }

    /// Export file configured for this kind
    pub fn input_path<'a>(&self, config: &'a PrepConfig) -> &'a Path {
        match self {
            Self::Events => &config.output.events_input,
            Self::Locations => &config.output.locations_input,
        }
    }

    /// Local output directory for this kind
    pub fn output_dir(&self, config: &PrepConfig) -> PathBuf {
        config.output.root.join(self.dir_name())
    }
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareSummary {
    /// Records that completed
    pub processed: usize,
    /// Records that were too short or failed
    pub skipped: usize,
    /// Document + sidecar pairs written
    pub documents_written: usize,
}

impl PrepareSummary {
    /// Local files created (document + sidecar per pair)
    pub fn files_created(&self) -> usize {
        self.documents_written * 2
    }

    /// Log the end-of-run report
    pub fn log(&self, kind: RecordKind, output_dir: &Path) {
        let rule = "=".repeat(60);
        tracing::info!("{}", rule);
        tracing::info!("{} document preparation complete!", capitalize(kind.noun()));
        tracing::info!("{}", rule);
        tracing::info!("Processed: {} {}", self.processed, kind.dir_name());
        tracing::info!("Skipped: {} {}", self.skipped, kind.dir_name());
        tracing::info!("Documents written: {}", self.documents_written);
        tracing::info!("Output directory: {}", output_dir.display());
        tracing::info!(
            "Files created: {} (txt + metadata.json pairs)",
            self.files_created()
        );
        tracing::info!("{}", rule);
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Load the configured export for `kind`, prepare every record and log a summary
pub async fn run(
    kind: RecordKind,
    config: &PrepConfig,
    store: Arc<dyn ObjectStoreProvider>,
) -> Result<PrepareSummary> {
    let records = load_records(kind.input_path(config))?.into_records();

    let output_dir = kind.output_dir(config);
    let writer = DocumentWriter::new(&output_dir, kind.prefix(), store)?;

    let summary = match kind {
        RecordKind::Events => prepare_events(&records, &writer, &config.processing).await,
        RecordKind::Locations => prepare_locations(&records, &writer, &config.processing).await,
    };

    summary.log(kind, &output_dir);
    Ok(summary)
}

enum EventOutcome {
    Written,
    TooShort(usize),
}

/// One document per event, skipping events whose text is too short
pub async fn prepare_events(
    records: &RecordSet,
    writer: &DocumentWriter,
    policy: &ProcessingConfig,
) -> PrepareSummary {
    let mut summary = PrepareSummary::default();

    for (event_key, event_data) in records {
        match process_event(event_key, event_data, writer, policy).await {
            Ok(EventOutcome::Written) => {
                summary.processed += 1;
                summary.documents_written += 1;
                if is_progress_tick(summary.processed, policy.event_progress_interval) {
                    tracing::info!("Processed {} events...", summary.processed);
                }
            }
            Ok(EventOutcome::TooShort(len)) => {
                tracing::debug!("Skipping event {}: content too short ({} chars)", event_key, len);
                summary.skipped += 1;
            }
            Err(e) => {
                tracing::error!("Error processing event {}: {}", event_key, e);
                summary.skipped += 1;
            }
        }
    }

    summary
}

async fn process_event(
    event_key: &str,
    event_data: &Value,
    writer: &DocumentWriter,
    policy: &ProcessingConfig,
) -> Result<EventOutcome> {
    let event: EventRecord = decode_record(event_key, event_data)?;

    let content = event_content(&event);
    let len = content_len(&content);
    if len < policy.min_event_chars {
        return Ok(EventOutcome::TooShort(len));
    }

    let event_hash = event
        .event_hash
        .as_deref()
        .filter(|hash| !hash.is_empty())
        .unwrap_or(event_key);
    let metadata = event_metadata(&event);

    writer.write(event_hash, &content, &metadata).await?;
    Ok(EventOutcome::Written)
}

/// One document per mention group of every location
///
/// A location counts as processed once all of its groups are written; a
/// failure part-way leaves the earlier groups written and counts the
/// location as skipped.
pub async fn prepare_locations(
    records: &RecordSet,
    writer: &DocumentWriter,
    policy: &ProcessingConfig,
) -> PrepareSummary {
    let mut summary = PrepareSummary::default();

    for (location_id, location_data) in records {
        let mut written = 0;
        let result =
            process_location(location_id, location_data, writer, policy, &mut written).await;
        summary.documents_written += written;

        match result {
            Ok(()) => {
                summary.processed += 1;
                if is_progress_tick(summary.processed, policy.location_progress_interval) {
                    tracing::info!("Processed {} locations...", summary.processed);
                }
            }
            Err(e) => {
                tracing::error!("Error processing location {}: {}", location_id, e);
                summary.skipped += 1;
            }
        }
    }

    summary
}

async fn process_location(
    location_id: &str,
    location_data: &Value,
    writer: &DocumentWriter,
    policy: &ProcessingConfig,
    written: &mut usize,
) -> Result<()> {
    let location: LocationRecord = decode_record(location_id, location_data)?;

    for document in location_documents(&location) {
        let len = content_len(&document.content);
        if len < policy.min_location_chars {
            tracing::debug!(
                "Skipping location {} article {}: content too short ({} chars)",
                location_id,
                document.article_hash,
                len
            );
            continue;
        }

        let metadata = location_metadata(&location, location_id, &document.article_hash);
        let document_id = Uuid::new_v4().to_string();
        writer.write(&document_id, &document.content, &metadata).await?;
        *written += 1;
    }

    Ok(())
}

fn is_progress_tick(processed: usize, interval: usize) -> bool {
    interval > 0 && processed % interval == 0
}
