//! Export file loader
//!
//! Any failure here is fatal for the run: a missing file, invalid JSON or an
//! unexpected top-level shape all surface as [`Error::RecordLoad`].

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::RecordExport;

/// Read and resolve an export file
pub fn load_records(path: impl AsRef<Path>) -> Result<RecordExport> {
    let path = path.as_ref();
    tracing::info!("Loading records from {}...", path.display());

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::record_load(path, e.to_string()))?;
    let export = parse_records(&content).map_err(|message| Error::record_load(path, message))?;

    if export.is_wrapped() {
        tracing::debug!("Unwrapped Firestore export envelope");
    }
    tracing::info!("Found {} records", export.len());

    Ok(export)
}

/// Parse export text without touching the filesystem
pub fn parse_records(content: &str) -> std::result::Result<RecordExport, String> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    RecordExport::from_value(value)
}
