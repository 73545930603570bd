//! Exported record types
//!
//! Records arrive as a JSON object keyed by record id, optionally wrapped in a
//! Firestore-style `{"data": {...}}` envelope. Each record stays an untyped
//! `serde_json::Value` until it is processed so that one malformed record is
//! reported on its own instead of failing the whole load.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Record id → raw record, in file order
pub type RecordSet = IndexMap<String, Value>;

/// Key of the Firestore export envelope
pub const EXPORT_ENVELOPE_KEY: &str = "data";

/// Shape of a loaded export file
#[derive(Debug, Clone, PartialEq)]
pub enum RecordExport {
    /// `{"data": {id: record, ...}}`
    WrappedExport(RecordSet),
    /// `{id: record, ...}`
    RawMapping(RecordSet),
}

impl RecordExport {
    /// Resolve the export shape of a parsed JSON document
    ///
    /// Returns a plain message on failure; the loader attaches the file path.
    pub fn from_value(value: Value) -> std::result::Result<Self, String> {
        let Value::Object(map) = value else {
            return Err(format!(
                "expected a JSON object at top level, found {}",
                json_kind(&value)
            ));
        };

        if map.contains_key(EXPORT_ENVELOPE_KEY) {
            let inner = map
                .into_iter()
                .find_map(|(key, value)| (key == EXPORT_ENVELOPE_KEY).then_some(value))
                .unwrap_or(Value::Null);
            match inner {
                Value::Object(records) => Ok(Self::WrappedExport(records.into_iter().collect())),
                other => Err(format!(
                    "`{}` envelope must be an object, found {}",
                    EXPORT_ENVELOPE_KEY,
                    json_kind(&other)
                )),
            }
        } else {
            Ok(Self::RawMapping(map.into_iter().collect()))
        }
    }

    /// Whether the export used the `data` envelope
    pub fn is_wrapped(&self) -> bool {
        matches!(self, Self::WrappedExport(_))
    }

    /// Borrow the records
    pub fn records(&self) -> &RecordSet {
        match self {
            Self::WrappedExport(records) | Self::RawMapping(records) => records,
        }
    }

    /// Take the records
    pub fn into_records(self) -> RecordSet {
        match self {
            Self::WrappedExport(records) | Self::RawMapping(records) => records,
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// Whether the export holds no records
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode a raw record into a typed view, tagging failures with the record id
pub fn decode_record<T>(id: &str, value: &Value) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    T::deserialize(value).map_err(|e| Error::malformed_record(id, e.to_string()))
}

/// A text fragment attached to a mention
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Chunk {
    #[serde(rename = "chunkText", default)]
    pub chunk_text: Option<String>,
}

impl Chunk {
    /// Trimmed chunk text, `None` when absent or blank
    pub fn text(&self) -> Option<&str> {
        self.chunk_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// Mentions of one record within one source article
///
/// Event exports list fragments under `mentions`, location exports under
/// `chunks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MentionGroup {
    #[serde(default)]
    pub mentions: Option<Vec<Chunk>>,
    #[serde(default)]
    pub chunks: Option<Vec<Chunk>>,
}

/// Nested Firestore sub-collections of a record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Collections {
    /// Article hash → mention group
    #[serde(default)]
    pub contextual_mentions: Option<IndexMap<String, MentionGroup>>,
}

/// Event record fields used for documents and metadata
///
/// Only the mention structure is decoded strictly; a metadata field of an
/// unexpected type reads as absent and takes its default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventRecord {
    #[serde(deserialize_with = "lenient")]
    pub event_hash: Option<String>,
    #[serde(deserialize_with = "lenient_optional_strings")]
    pub article_hashes: Option<Vec<Option<String>>>,
    /// Kept untyped: exports carry both string and numeric ids
    pub linked_location_id: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    pub linked_location_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub category: Option<String>,
    #[serde(rename = "__collections__")]
    pub collections: Option<Collections>,
}

impl EventRecord {
    /// Mention groups in article order
    pub fn mention_groups(&self) -> impl Iterator<Item = (&str, &MentionGroup)> {
        mention_groups(self.collections.as_ref())
    }
}

/// Postal address of a location
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "lenient")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub country: Option<String>,
}

/// Geographic coordinates of a location
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Coordinates {
    #[serde(deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

/// Location record fields used for documents and metadata
///
/// Decoded like [`EventRecord`]: wrong-typed metadata fields read as absent,
/// and non-string category entries are dropped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocationRecord {
    #[serde(deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(deserialize_with = "lenient_strings")]
    pub categories: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub primary_category: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub address: Option<Address>,
    #[serde(deserialize_with = "lenient")]
    pub coordinates: Option<Coordinates>,
    #[serde(rename = "__collections__")]
    pub collections: Option<Collections>,
}

impl LocationRecord {
    /// Mention groups in article order
    pub fn mention_groups(&self) -> impl Iterator<Item = (&str, &MentionGroup)> {
        mention_groups(self.collections.as_ref())
    }
}

fn mention_groups(
    collections: Option<&Collections>,
) -> impl Iterator<Item = (&str, &MentionGroup)> {
    collections
        .and_then(|c| c.contextual_mentions.as_ref())
        .into_iter()
        .flat_map(|groups| groups.iter().map(|(hash, group)| (hash.as_str(), group)))
}

/// Decode a value as `T`, or `None` when it has another shape
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Numbers as-is, numeric strings parsed, anything else `None`
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// String entries of a list; other entries are dropped
fn lenient_strings<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// A list with positions kept; non-string entries become `None`
fn lenient_optional_strings<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Vec<Option<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}
