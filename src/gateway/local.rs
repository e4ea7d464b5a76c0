use crate::auth::Identity;
use crate::gateway::traits::ListingGateway;
use crate::gateway::types::{GatewayError, GatewayResult};
use crate::models::{Listing, ListingFields};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// Fixed key the whole listing set is stored under
pub const STORAGE_KEY: &str = "car_listings";

/// Device-local store: the full listing set as one JSON array in a file,
/// read wholesale and written back wholesale on every mutation
pub struct LocalStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStore {
    /// Create a store keeping its data under `data_dir`
    pub async fn new(data_dir: impl Into<PathBuf>) -> GatewayResult<Self> {
        let data_dir = data_dir.into();

        fs::create_dir_all(&data_dir).await.map_err(|e| {
            GatewayError::Persistence(format!(
                "Failed to create data directory {}: {}",
                data_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            path: data_dir.join(format!("{}.json", STORAGE_KEY)),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> GatewayResult<Vec<Listing>> {
        if !fs::try_exists(&self.path).await? {
            debug!("No listing file at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path).await?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    async fn save(&self, listings: &[Listing]) -> GatewayResult<()> {
        let json = serde_json::to_string_pretty(listings)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!("Wrote {} listings to {}", listings.len(), self.path.display());
        Ok(())
    }
}

#[async_trait]
impl ListingGateway for LocalStore {
    async fn list_all(&self) -> GatewayResult<Vec<Listing>> {
        self.load().await
    }

    async fn insert(&self, owner: &Identity, fields: ListingFields) -> GatewayResult<Listing> {
        let _guard = self.write_lock.lock().await;
        let mut listings = self.load().await?;

        let listing = Listing::create(
            Uuid::new_v4().to_string(),
            Some(owner.id.clone()),
            fields,
            Utc::now(),
        );
        listings.push(listing.clone());
        self.save(&listings).await?;

        info!(id = %listing.id, "Stored new listing {}", listing.title());
        Ok(listing)
    }

    async fn update(&self, id: &str, fields: ListingFields) -> GatewayResult<Listing> {
        let _guard = self.write_lock.lock().await;
        let mut listings = self.load().await?;

        let listing = listings
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        listing.apply(fields, Utc::now());
        let updated = listing.clone();

        self.save(&listings).await?;

        info!(id = %id, "Updated listing {}", updated.title());
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut listings = self.load().await?;

        let before = listings.len();
        listings.retain(|l| l.id != id);
        if listings.len() == before {
            return Err(GatewayError::NotFound(id.to_string()));
        }

        self.save(&listings).await?;

        info!(id = %id, "Deleted listing");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
