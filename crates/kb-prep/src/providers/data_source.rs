//! Knowledge-base data source administration

use async_trait::async_trait;

use crate::config::{KnowledgeBaseConfig, PrepConfig};
use crate::error::Result;

/// Requested data source configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DataSourceUpdate {
    pub knowledge_base_id: String,
    pub data_source_id: String,
    /// Display name (the service requires it on every update)
    pub name: String,
    /// ARN of the bucket the data source reads
    pub bucket_arn: String,
    pub inclusion_prefixes: Vec<String>,
}

impl DataSourceUpdate {
    /// Build the update from the knowledge-base section and the data bucket
    pub fn from_config(config: &PrepConfig) -> Self {
        let KnowledgeBaseConfig {
            knowledge_base_id,
            data_source_id,
            data_source_name,
            inclusion_prefixes,
        } = config.knowledge_base.clone();

        Self {
            knowledge_base_id,
            data_source_id,
            name: data_source_name,
            bucket_arn: format!("arn:aws:s3:::{}", config.s3.data_bucket_name),
            inclusion_prefixes,
        }
    }
}

/// Data source state reported back by the service
#[derive(Debug, Clone, PartialEq)]
pub struct DataSourceDescription {
    pub data_source_id: String,
    pub status: Option<String>,
    pub inclusion_prefixes: Vec<String>,
}

/// Trait for knowledge-base data source administration
#[async_trait]
pub trait DataSourceProvider: Send + Sync {
    /// Replace the data source configuration
    async fn update_data_source(&self, update: &DataSourceUpdate) -> Result<DataSourceDescription>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Apply the configured inclusion prefixes and return what the service echoed
pub async fn update_inclusion_prefixes(
    provider: &dyn DataSourceProvider,
    config: &PrepConfig,
) -> Result<Vec<String>> {
    let update = DataSourceUpdate::from_config(config);

    tracing::info!("Updating data source to include prefixes {:?}...", update.inclusion_prefixes);
    tracing::info!("KB ID: {}", update.knowledge_base_id);
    tracing::info!("Data Source ID: {}", update.data_source_id);

    let description = provider.update_data_source(&update).await?;

    tracing::info!("Data source updated via {}", provider.name());
    tracing::info!("Inclusion prefixes: {:?}", description.inclusion_prefixes);
    if let Some(status) = &description.status {
        tracing::info!("Status: {}", status);
    }

    Ok(description.inclusion_prefixes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records updates and echoes the requested prefixes
    #[derive(Default)]
    struct RecordingProvider {
        updates: Mutex<Vec<DataSourceUpdate>>,
    }

    #[async_trait]
    impl DataSourceProvider for RecordingProvider {
        async fn update_data_source(
            &self,
            update: &DataSourceUpdate,
        ) -> Result<DataSourceDescription> {
            self.updates.lock().unwrap().push(update.clone());
            Ok(DataSourceDescription {
                data_source_id: update.data_source_id.clone(),
                status: Some("AVAILABLE".to_string()),
                inclusion_prefixes: update.inclusion_prefixes.clone(),
            })
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    #[test]
    fn test_update_from_config() {
        let mut config = PrepConfig::default();
        config.s3.data_bucket_name = "venues-data".to_string();

        let update = DataSourceUpdate::from_config(&config);
        assert_eq!(update.knowledge_base_id, "RNV8IF58LD");
        assert_eq!(update.data_source_id, "ZTFJOUHWFY");
        assert_eq!(update.name, "hospitality-venues-s3-source");
        assert_eq!(update.bucket_arn, "arn:aws:s3:::venues-data");
        assert_eq!(update.inclusion_prefixes, vec!["documents/", "locations/"]);
    }

    #[tokio::test]
    async fn test_update_inclusion_prefixes_sends_one_update() {
        let provider = RecordingProvider::default();
        let mut config = PrepConfig::default();
        config.s3.data_bucket_name = "venues-data".to_string();

        let prefixes = update_inclusion_prefixes(&provider, &config).await.unwrap();

        assert_eq!(prefixes, vec!["documents/", "locations/"]);
        assert_eq!(provider.updates.lock().unwrap().len(), 1);
    }
}
