//! Bedrock Agent client for knowledge-base data source updates

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_bedrockagent::error::DisplayErrorContext;
use aws_sdk_bedrockagent::types::{
    DataSource, DataSourceConfiguration, DataSourceType, S3DataSourceConfiguration,
};
use aws_sdk_bedrockagent::Client as BedrockAgent;

use crate::error::{Error, Result};
use crate::providers::data_source::{DataSourceDescription, DataSourceProvider, DataSourceUpdate};

/// Bedrock Agent control-plane client
pub struct BedrockAgentClient {
    client: BedrockAgent,
}

impl BedrockAgentClient {
    /// Create a client from a loaded SDK config
    pub fn new(sdk_config: &SdkConfig) -> Result<Self> {
        if sdk_config.region().is_none() {
            return Err(Error::config("AWS region is not configured"));
        }
        Ok(Self {
            client: BedrockAgent::new(sdk_config),
        })
    }
}

/// S3 data source configuration carrying the requested bucket and prefixes
fn data_source_configuration(update: &DataSourceUpdate) -> Result<DataSourceConfiguration> {
    let s3 = S3DataSourceConfiguration::builder()
        .bucket_arn(&update.bucket_arn)
        .set_inclusion_prefixes(Some(update.inclusion_prefixes.clone()))
        .build()
        .map_err(|e| Error::data_source(format!("Invalid S3 data source configuration: {}", e)))?;

    DataSourceConfiguration::builder()
        .r#type(DataSourceType::S3)
        .s3_configuration(s3)
        .build()
        .map_err(|e| Error::data_source(format!("Invalid data source configuration: {}", e)))
}

fn describe(data_source: &DataSource) -> DataSourceDescription {
    DataSourceDescription {
        data_source_id: data_source.data_source_id().to_string(),
        status: Some(data_source.status().as_str().to_string()),
        inclusion_prefixes: data_source
            .data_source_configuration()
            .and_then(|c| c.s3_configuration())
            .map(|s3| s3.inclusion_prefixes().to_vec())
            .unwrap_or_default(),
    }
}

#[async_trait]
impl DataSourceProvider for BedrockAgentClient {
    async fn update_data_source(&self, update: &DataSourceUpdate) -> Result<DataSourceDescription> {
        let output = self
            .client
            .update_data_source()
            .knowledge_base_id(&update.knowledge_base_id)
            .data_source_id(&update.data_source_id)
            .name(&update.name)
            .data_source_configuration(data_source_configuration(update)?)
            .send()
            .await
            .map_err(|e| {
                Error::data_source(format!("UpdateDataSource failed: {}", DisplayErrorContext(&e)))
            })?;

        output
            .data_source()
            .map(describe)
            .ok_or_else(|| Error::data_source("UpdateDataSource returned no data source"))
    }

    fn name(&self) -> &str {
        "bedrock-agent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_config::{BehaviorVersion, Region};

    fn update() -> DataSourceUpdate {
        DataSourceUpdate {
            knowledge_base_id: "RNV8IF58LD".to_string(),
            data_source_id: "ZTFJOUHWFY".to_string(),
            name: "hospitality-venues-s3-source".to_string(),
            bucket_arn: "arn:aws:s3:::venues-data".to_string(),
            inclusion_prefixes: vec!["documents/".to_string(), "locations/".to_string()],
        }
    }

    #[test]
    fn test_configuration_is_s3_with_prefixes() {
        let configuration = data_source_configuration(&update()).unwrap();

        assert_eq!(configuration.r#type(), &DataSourceType::S3);
        let s3 = configuration.s3_configuration().unwrap();
        assert_eq!(s3.bucket_arn(), "arn:aws:s3:::venues-data");
        assert_eq!(s3.inclusion_prefixes(), ["documents/", "locations/"]);
    }

    #[test]
    fn test_client_requires_region() {
        let without_region = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .build();
        assert!(BedrockAgentClient::new(&without_region).is_err());

        let with_region = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        assert!(BedrockAgentClient::new(&with_region).is_ok());
    }
}
