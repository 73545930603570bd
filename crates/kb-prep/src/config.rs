//! Configuration for document preparation

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Config file read when no explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "kb-prep.toml";

/// Main preparation configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PrepConfig {
    /// Backend provider (aws or local)
    #[serde(default)]
    pub backend: BackendProvider,
    /// AWS region and credentials
    #[serde(default)]
    pub aws: AwsConfig,
    /// Target bucket
    #[serde(default)]
    pub s3: S3Config,
    /// Knowledge-base data source targeted by the prefix updater
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,
    /// Input and output locations
    #[serde(default)]
    pub output: OutputConfig,
    /// Per-record processing policy
    #[serde(default)]
    pub processing: ProcessingConfig,
}

impl PrepConfig {
    /// Load configuration from a TOML file, then apply environment overrides
    /// and validate.
    ///
    /// With `path = None` the default file is read if present; an explicit
    /// path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("{} ({})", e, path.display())))
    }

    /// Parse TOML config text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Invalid config: {}", e)))
    }

    /// Override fields from environment variables
    ///
    /// `lookup` abstracts `std::env::var` so overrides can be exercised
    /// without touching the process environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(region) = get("AWS_REGION").or_else(|| get("AWS_DEFAULT_REGION")) {
            self.aws.region = region;
        }
        if let Some(key_id) = get("AWS_ACCESS_KEY_ID") {
            self.aws.access_key_id = key_id;
        }
        if let Some(secret) = get("AWS_SECRET_ACCESS_KEY") {
            self.aws.secret_access_key = secret;
        }
        if let Some(token) = get("AWS_SESSION_TOKEN") {
            self.aws.session_token = Some(token);
        }
        if let Some(bucket) = get("S3_DATA_BUCKET_NAME") {
            self.s3.data_bucket_name = bucket;
        }
        if let Some(endpoint) = get("S3_ENDPOINT_URL") {
            self.s3.endpoint_url = Some(endpoint);
        }
        if let Some(kb_id) = get("KNOWLEDGE_BASE_ID") {
            self.knowledge_base.knowledge_base_id = kb_id;
        }
        if let Some(ds_id) = get("DATA_SOURCE_ID") {
            self.knowledge_base.data_source_id = ds_id;
        }
        if let Some(backend) = get("KB_BACKEND") {
            match backend.to_lowercase().as_str() {
                "aws" => self.backend = BackendProvider::Aws,
                "local" => self.backend = BackendProvider::Local,
                other => tracing::warn!("Ignoring unknown KB_BACKEND value: {}", other),
            }
        }
    }

    /// Check that the selected backend has everything it needs
    pub fn validate(&self) -> Result<()> {
        if self.backend == BackendProvider::Aws {
            let has_key_id = !self.aws.access_key_id.trim().is_empty();
            let has_secret = !self.aws.secret_access_key.trim().is_empty();
            if has_key_id != has_secret {
                return Err(Error::config(
                    "aws.access_key_id and aws.secret_access_key must be set together",
                ));
            }
            if self.s3.data_bucket_name.trim().is_empty() {
                return Err(Error::config("s3.data_bucket_name is required"));
            }
        }
        Ok(())
    }
}

/// Backend provider selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BackendProvider {
    /// AWS (S3 + Bedrock Agent)
    #[default]
    Aws,
    /// Local directory mirror, no network access
    Local,
}

/// AWS region and credentials
///
/// Empty values fall back to the SDK's default provider chain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AwsConfig {
    /// Region (e.g., "us-east-1")
    #[serde(default)]
    pub region: String,
    /// Access key id
    #[serde(default)]
    pub access_key_id: String,
    /// Secret access key
    #[serde(default)]
    pub secret_access_key: String,
    /// Session token for temporary credentials
    #[serde(default)]
    pub session_token: Option<String>,
}

/// Object store target
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct S3Config {
    /// Bucket that receives documents and sidecars
    #[serde(default)]
    pub data_bucket_name: String,
    /// Endpoint override for S3-compatible stores (path-style addressing)
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// Knowledge-base data source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseConfig {
    /// Knowledge base id
    #[serde(default = "default_knowledge_base_id")]
    pub knowledge_base_id: String,
    /// Data source id within the knowledge base
    #[serde(default = "default_data_source_id")]
    pub data_source_id: String,
    /// Data source display name
    #[serde(default = "default_data_source_name")]
    pub data_source_name: String,
    /// Prefixes the data source ingests from
    #[serde(default = "default_inclusion_prefixes")]
    pub inclusion_prefixes: Vec<String>,
}

fn default_knowledge_base_id() -> String {
    "RNV8IF58LD".to_string()
}

fn default_data_source_id() -> String {
    "ZTFJOUHWFY".to_string()
}

fn default_data_source_name() -> String {
    "hospitality-venues-s3-source".to_string()
}

fn default_inclusion_prefixes() -> Vec<String> {
    vec!["documents/".to_string(), "locations/".to_string()]
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            knowledge_base_id: default_knowledge_base_id(),
            data_source_id: default_data_source_id(),
            data_source_name: default_data_source_name(),
            inclusion_prefixes: default_inclusion_prefixes(),
        }
    }
}

/// Input files and output directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Event export file
    #[serde(default = "default_events_input")]
    pub events_input: PathBuf,
    /// Location export file
    #[serde(default = "default_locations_input")]
    pub locations_input: PathBuf,
    /// Root of the local document tree; kinds write to `<root>/<kind>/`
    #[serde(default = "default_output_root")]
    pub root: PathBuf,
    /// Directory that receives "uploads" when backend = local
    #[serde(default = "default_mirror_dir")]
    pub mirror_dir: PathBuf,
}

fn default_events_input() -> PathBuf {
    PathBuf::from("global_events.json")
}

fn default_locations_input() -> PathBuf {
    PathBuf::from("global_locations.json")
}

fn default_output_root() -> PathBuf {
    PathBuf::from("documents_to_upload")
}

fn default_mirror_dir() -> PathBuf {
    PathBuf::from("object_store_mirror")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            events_input: default_events_input(),
            locations_input: default_locations_input(),
            root: default_output_root(),
            mirror_dir: default_mirror_dir(),
        }
    }
}

/// Per-record processing policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Minimum trimmed length (characters) of an event document
    #[serde(default = "default_min_event_chars")]
    pub min_event_chars: usize,
    /// Minimum trimmed length (characters) of a location document; 0 keeps every group
    #[serde(default)]
    pub min_location_chars: usize,
    /// Log progress every N processed events
    #[serde(default = "default_event_progress_interval")]
    pub event_progress_interval: usize,
    /// Log progress every N processed locations
    #[serde(default = "default_location_progress_interval")]
    pub location_progress_interval: usize,
}

fn default_min_event_chars() -> usize {
    50
}

fn default_event_progress_interval() -> usize {
    10
}

fn default_location_progress_interval() -> usize {
    50
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            min_event_chars: default_min_event_chars(),
            min_location_chars: 0,
            event_progress_interval: default_event_progress_interval(),
            location_progress_interval: default_location_progress_interval(),
        }
    }
}
