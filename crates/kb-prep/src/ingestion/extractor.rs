//! Document content extraction from mention groups

use crate::types::{EventRecord, LocationRecord, MentionGroup};

/// Separator between chunks of an event document
pub const EVENT_CHUNK_SEPARATOR: &str = "\n\n";

/// Separator between chunks of a location document
pub const LOCATION_CHUNK_SEPARATOR: &str = "\n";

/// One location document, built from a single article's mentions
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDocument {
    /// Article the chunks came from
    pub article_hash: String,
    /// Newline-joined chunk texts
    pub content: String,
}

/// Join every event mention across all articles into one document
///
/// Returns an empty string when the record has no mentions.
pub fn event_content(event: &EventRecord) -> String {
    let texts: Vec<&str> = event
        .mention_groups()
        .flat_map(|(_, group)| group_texts(group.mentions.as_deref()))
        .collect();
    texts.join(EVENT_CHUNK_SEPARATOR)
}

/// Build one document per mention group of a location
///
/// Groups whose chunks are all blank still yield a (possibly empty) document;
/// length filtering is the caller's policy.
pub fn location_documents(location: &LocationRecord) -> Vec<LocationDocument> {
    location
        .mention_groups()
        .map(|(article_hash, group)| LocationDocument {
            article_hash: article_hash.to_string(),
            content: location_group_content(group),
        })
        .collect()
}

fn location_group_content(group: &MentionGroup) -> String {
    let texts: Vec<&str> = group_texts(group.chunks.as_deref()).collect();
    texts.join(LOCATION_CHUNK_SEPARATOR)
}

fn group_texts(chunks: Option<&[crate::types::Chunk]>) -> impl Iterator<Item = &str> {
    chunks.unwrap_or_default().iter().filter_map(|chunk| chunk.text())
}

/// Length of a document as counted for minimum-content checks
pub fn content_len(content: &str) -> usize {
    content.trim().chars().count()
}
