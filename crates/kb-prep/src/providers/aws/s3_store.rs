//! Amazon S3 object store
//!
//! Uploads documents and sidecars with `PutObject`.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;

use crate::config::PrepConfig;
use crate::error::{Error, Result};
use crate::providers::object_store::ObjectStoreProvider;

/// S3 object store
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a new S3 object store
    ///
    /// # Arguments
    /// * `client` - S3 client
    /// * `bucket` - Target bucket name
    pub fn new(client: S3Client, bucket: String) -> Result<Self> {
        if bucket.trim().is_empty() {
            return Err(Error::config("S3 bucket name is empty"));
        }
        Ok(Self { client, bucket })
    }

    /// Create from config and a loaded SDK config
    ///
    /// An `endpoint_url` switches to path-style addressing for S3-compatible
    /// stores.
    pub fn from_sdk_config(config: &PrepConfig, sdk_config: &SdkConfig) -> Result<Self> {
        let mut builder = aws_sdk_s3::config::Builder::from(sdk_config);
        if let Some(endpoint) = &config.s3.endpoint_url {
            builder = builder
                .endpoint_url(endpoint.trim_end_matches('/'))
                .force_path_style(true);
        }

        Self::new(
            S3Client::from_conf(builder.build()),
            config.s3.data_bucket_name.clone(),
        )
    }

    /// Bucket this store writes to
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// S3 URI of an object
    fn s3_uri(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }
}

#[async_trait]
impl ObjectStoreProvider for S3ObjectStore {
    async fn put_object(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                Error::object_store(format!(
                    "S3 PutObject {} failed: {}",
                    key,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(self.s3_uri(key))
    }

    async fn health_check(&self) -> Result<bool> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::debug!(
                    "S3 HeadBucket {} failed: {}",
                    self.bucket,
                    DisplayErrorContext(&e)
                );
                Ok(false)
            }
        }
    }

    fn name(&self) -> &str {
        "s3"
    }
}
