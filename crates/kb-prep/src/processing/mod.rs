//! Per-record processing: transform, write locally, upload

pub mod pipeline;
pub mod writer;

pub use pipeline::{prepare_events, prepare_locations, run, PrepareSummary, RecordKind};
pub use writer::{DocumentWriter, WrittenDocument};
