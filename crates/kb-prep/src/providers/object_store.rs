//! Object store provider trait for uploading documents and sidecars

use async_trait::async_trait;

use crate::error::Result;

/// Trait for object storage
///
/// Implementations:
/// - `S3ObjectStore`: AWS S3 (or an S3-compatible endpoint)
/// - `LocalObjectStore`: Local directory mirror
#[async_trait]
pub trait ObjectStoreProvider: Send + Sync {
    /// Store `body` under `key`, replacing any existing object
    ///
    /// Returns the storage URI
    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<String>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
