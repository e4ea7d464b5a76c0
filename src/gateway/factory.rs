use crate::config::{Config, StorageBackend};
use crate::gateway::{ListingGateway, LocalStore, RemoteClient, RemoteTable};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

/// Create the listing backend selected by configuration
pub async fn create_gateway(config: &Config) -> Result<Arc<dyn ListingGateway>> {
    match &config.backend {
        StorageBackend::Local { data_dir } => {
            info!("Using local listing store in {}", data_dir.display());
            let store = LocalStore::new(data_dir.clone())
                .await
                .context("Failed to open local listing store")?;
            Ok(Arc::new(store))
        }
        StorageBackend::Remote {
            url,
            api_key,
            listings_table,
            ..
        } => {
            info!("Using remote listing table '{}' at {}", listings_table, url);
            let remote = RemoteClient::new(url, api_key, config.request_timeout)?;
            Ok(Arc::new(RemoteTable::new(remote, listings_table.clone())))
        }
    }
}
