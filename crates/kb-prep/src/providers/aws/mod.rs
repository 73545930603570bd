//! Amazon Web Services provider implementations
//!
//! Built on the AWS SDK:
//! - S3 `PutObject` for documents and metadata sidecars
//! - Bedrock Agent `UpdateDataSource` for knowledge-base inclusion prefixes

mod bedrock_agent;
mod s3_store;

pub use bedrock_agent::BedrockAgentClient;
pub use s3_store::S3ObjectStore;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::Credentials;

use crate::config::AwsConfig;

/// Load the shared SDK config
///
/// Region and static keys from `aws` take precedence; anything left empty
/// falls through to the SDK's default provider chain (environment, profile,
/// instance metadata).
pub async fn load_sdk_config(aws: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());

    if !aws.region.trim().is_empty() {
        loader = loader.region(Region::new(aws.region.clone()));
    }
    if let Some(credentials) = static_credentials(aws) {
        loader = loader.credentials_provider(credentials);
    }

    loader.load().await
}

/// Static credentials when both key parts are configured
fn static_credentials(aws: &AwsConfig) -> Option<Credentials> {
    if aws.access_key_id.trim().is_empty() || aws.secret_access_key.trim().is_empty() {
        return None;
    }
    Some(Credentials::new(
        aws.access_key_id.clone(),
        aws.secret_access_key.clone(),
        aws.session_token.clone(),
        None,
        "kb-prep",
    ))
}
