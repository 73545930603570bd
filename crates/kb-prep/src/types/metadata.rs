//! Metadata sidecar written next to every document
//!
//! The JSON layout follows the knowledge-base ingestion contract:
//! `{"metadataAttributes": {...}}` with camelCase keys except `article_hash`.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Flat attribute set used for retrieval filtering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataAttributes {
    #[serde(rename = "locationId")]
    pub location_id: String,
    pub article_hash: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub categories: Vec<String>,
    #[serde(rename = "primaryCategory", default, skip_serializing_if = "Option::is_none")]
    pub primary_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Wrapper matching the `.metadata.json` file layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSidecar {
    #[serde(rename = "metadataAttributes")]
    pub metadata_attributes: MetadataAttributes,
}

impl MetadataSidecar {
    pub fn new(metadata_attributes: MetadataAttributes) -> Self {
        Self { metadata_attributes }
    }

    /// Two-space indented JSON for the local sidecar file (non-ASCII kept as is)
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Compact JSON body for the object store
    pub fn to_compact_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Parse a sidecar file
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}
