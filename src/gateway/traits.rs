use crate::auth::Identity;
use crate::gateway::types::GatewayResult;
use crate::models::{Listing, ListingFields};
use async_trait::async_trait;

/// Common contract for every listing backend.
/// Each call reads or changes exactly one listing (or reads all of them).
#[async_trait]
pub trait ListingGateway: Send + Sync {
    /// All stored listings, in the backend's native order
    async fn list_all(&self) -> GatewayResult<Vec<Listing>>;

    /// Store a new listing owned by `owner`; id and timestamps are assigned here
    async fn insert(&self, owner: &Identity, fields: ListingFields) -> GatewayResult<Listing>;

    /// Replace the editable fields of listing `id` and refresh its `updated_at`
    async fn update(&self, id: &str, fields: ListingFields) -> GatewayResult<Listing>;

    /// Permanently remove listing `id`
    async fn delete(&self, id: &str) -> GatewayResult<()>;

    /// Get the name of the backend
    fn backend_name(&self) -> &'static str;
}
