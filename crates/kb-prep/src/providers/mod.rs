//! Provider abstractions for object storage and knowledge-base administration
//!
//! Trait-based so the entry points can switch between the AWS backend and a
//! local directory mirror.

pub mod aws;
pub mod data_source;
pub mod local;
pub mod object_store;

pub use data_source::{DataSourceDescription, DataSourceProvider, DataSourceUpdate};
pub use local::LocalObjectStore;
pub use object_store::ObjectStoreProvider;

use std::sync::Arc;

use crate::config::{BackendProvider, PrepConfig};
use crate::error::Result;

/// Build the object store selected by the config
pub async fn object_store_from_config(
    config: &PrepConfig,
) -> Result<Arc<dyn ObjectStoreProvider>> {
    match config.backend {
        BackendProvider::Aws => {
            let sdk_config = aws::load_sdk_config(&config.aws).await;
            Ok(Arc::new(aws::S3ObjectStore::from_sdk_config(config, &sdk_config)?))
        }
        BackendProvider::Local => Ok(Arc::new(LocalObjectStore::new(
            config.output.mirror_dir.clone(),
        )?)),
    }
}
