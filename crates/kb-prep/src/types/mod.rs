//! Core types for records, documents and metadata sidecars

pub mod metadata;
pub mod record;

pub use metadata::{MetadataAttributes, MetadataSidecar};
pub use record::{
    Address, Chunk, Collections, Coordinates, EventRecord, LocationRecord, MentionGroup,
    RecordExport, RecordSet,
};
