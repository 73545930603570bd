//! Record loading, content extraction and metadata generation

pub mod extractor;
pub mod loader;
pub mod metadata;

pub use extractor::{event_content, location_documents, LocationDocument};
pub use loader::{load_records, parse_records};
pub use metadata::{event_metadata, location_metadata};
