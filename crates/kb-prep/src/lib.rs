//! kb-prep: Knowledge-base document preparation
//!
//! Turns exported event and location records into plain-text documents with
//! metadata sidecars, writes them locally and uploads them to an object store
//! for knowledge-base ingestion. Also carries the one-shot data-source prefix
//! update used after new prefixes are populated.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod providers;
pub mod telemetry;
pub mod types;

pub use config::PrepConfig;
pub use error::{Error, Result};
pub use processing::{PrepareSummary, RecordKind};
pub use types::{
    metadata::{MetadataAttributes, MetadataSidecar},
    record::{RecordExport, RecordSet},
};
