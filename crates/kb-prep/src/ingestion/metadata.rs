//! Metadata generation for event and location documents
//!
//! Every attribute resolves to a fixed default when the source field is
//! absent or falsy (null, empty string, zero, empty list).

use serde_json::Value;

use crate::types::{EventRecord, LocationRecord, MetadataAttributes, MetadataSidecar};

/// Default for missing identifiers and names
pub const UNKNOWN: &str = "unknown";

/// Default category
pub const GENERAL: &str = "general";

/// Maximum number of categories the ingestion service accepts
pub const MAX_CATEGORIES: usize = 10;

/// Build the sidecar for an event document
pub fn event_metadata(event: &EventRecord) -> MetadataSidecar {
    let article_hash = event
        .article_hashes
        .as_ref()
        .and_then(|hashes| hashes.first())
        .and_then(|hash| non_empty(hash.as_deref()));
    let location_id = event.linked_location_id.as_ref().and_then(scalar_text);

    MetadataSidecar::new(MetadataAttributes {
        location_id: location_id.unwrap_or_else(|| UNKNOWN.to_string()),
        article_hash: article_hash.unwrap_or(UNKNOWN).to_string(),
        display_name: or_default(event.linked_location_name.as_deref(), UNKNOWN),
        categories: vec![or_default(event.category.as_deref(), GENERAL)],
        primary_category: None,
        city: None,
        country: None,
        latitude: None,
        longitude: None,
    })
}

/// Build the sidecar for one location document
///
/// `location_id` is the record key and `article_hash` the mention group the
/// document was built from.
pub fn location_metadata(
    location: &LocationRecord,
    location_id: &str,
    article_hash: &str,
) -> MetadataSidecar {
    let address = location.address.as_ref();
    let coordinates = location.coordinates.as_ref();

    let mut categories: Vec<String> = location
        .categories
        .as_deref()
        .unwrap_or_default()
        .iter()
        .take(MAX_CATEGORIES)
        .cloned()
        .collect();
    if categories.is_empty() {
        categories.push(GENERAL.to_string());
    }

    MetadataSidecar::new(MetadataAttributes {
        location_id: location_id.to_string(),
        article_hash: article_hash.to_string(),
        display_name: or_default(location.display_name.as_deref(), UNKNOWN),
        categories,
        primary_category: Some(or_default(location.primary_category.as_deref(), GENERAL)),
        city: Some(or_default(address.and_then(|a| a.city.as_deref()), UNKNOWN)),
        country: Some(or_default(address.and_then(|a| a.country.as_deref()), UNKNOWN)),
        latitude: Some(coordinate(coordinates.and_then(|c| c.latitude))),
        longitude: Some(coordinate(coordinates.and_then(|c| c.longitude))),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn or_default(value: Option<&str>, default: &str) -> String {
    non_empty(value).unwrap_or(default).to_string()
}

fn coordinate(value: Option<f64>) -> f64 {
    value.filter(|v| *v != 0.0).unwrap_or(0.0)
}

/// Text form of a scalar id, `None` for falsy values
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
