use crate::auth::Identity;
use crate::gateway::traits::ListingGateway;
use crate::gateway::types::{GatewayError, GatewayResult};
use crate::models::{Listing, ListingFields};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// HTTP access to a hosted REST table service (`{base}/rest/v1/{table}`)
#[derive(Clone)]
pub struct RemoteClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RemoteClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("carmarket/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Start a request against `table` with the service credentials attached
    pub fn table(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        debug!("{} {}", method, url);

        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Send the request and decode the JSON array of rows it returns
    pub async fn rows<T: DeserializeOwned>(&self, request: RequestBuilder) -> GatewayResult<Vec<T>> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Backend returned status: {} {}", status, body);
            return Err(GatewayError::Persistence(format!(
                "Backend returned {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

/// One row of the remote listings table
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ListingRow {
    id: String,
    #[serde(default)]
    user_id: Option<String>,
    brand: String,
    model: String,
    #[serde(default, deserialize_with = "crate::models::lenient::int")]
    year: i32,
    #[serde(default, deserialize_with = "crate::models::lenient::int")]
    km: i64,
    #[serde(default, deserialize_with = "crate::models::lenient::int")]
    price: i64,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    images: Vec<String>,
    owner_name: String,
    owner_phone: String,
    #[serde(default)]
    owner_email: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Columns a PATCH may touch; id, owner and creation time never change
#[derive(Debug, Serialize)]
struct ListingPatch<'a> {
    brand: &'a str,
    model: &'a str,
    year: i32,
    km: i64,
    price: i64,
    description: Option<&'a str>,
    images: &'a [String],
    owner_name: &'a str,
    owner_phone: &'a str,
    owner_email: Option<&'a str>,
    updated_at: DateTime<Utc>,
}

impl From<Listing> for ListingRow {
    fn from(l: Listing) -> Self {
        Self {
            id: l.id,
            user_id: l.owner_id,
            brand: l.brand,
            model: l.model,
            year: l.year,
            km: l.mileage,
            price: l.price,
            description: l.description,
            images: l.images,
            owner_name: l.owner_name,
            owner_phone: l.owner_phone,
            owner_email: l.owner_email,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

impl From<ListingRow> for Listing {
    fn from(r: ListingRow) -> Self {
        Self {
            id: r.id,
            brand: r.brand,
            model: r.model,
            year: r.year,
            mileage: r.km,
            price: r.price,
            description: r.description,
            images: r.images,
            owner_name: r.owner_name,
            owner_phone: r.owner_phone,
            owner_email: r.owner_email,
            owner_id: r.user_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl<'a> From<&'a Listing> for ListingPatch<'a> {
    fn from(l: &'a Listing) -> Self {
        Self {
            brand: &l.brand,
            model: &l.model,
            year: l.year,
            km: l.mileage,
            price: l.price,
            description: l.description.as_deref(),
            images: &l.images,
            owner_name: &l.owner_name,
            owner_phone: &l.owner_phone,
            owner_email: l.owner_email.as_deref(),
            updated_at: l.updated_at,
        }
    }
}

/// Listings kept in a hosted table, one row per listing
pub struct RemoteTable {
    remote: RemoteClient,
    table: String,
}

impl RemoteTable {
    pub fn new(remote: RemoteClient, table: impl Into<String>) -> Self {
        Self {
            remote,
            table: table.into(),
        }
    }

    fn id_filter(id: &str) -> [(&'static str, String); 1] {
        [("id", format!("eq.{}", id))]
    }

    async fn fetch(&self, id: &str) -> GatewayResult<Listing> {
        let request = self
            .remote
            .table(Method::GET, &self.table)
            .query(&Self::id_filter(id))
            .query(&[("select", "*")]);

        let rows: Vec<ListingRow> = self.remote.rows(request).await?;
        rows.into_iter()
            .next()
            .map(Listing::from)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl ListingGateway for RemoteTable {
    async fn list_all(&self) -> GatewayResult<Vec<Listing>> {
        let request = self
            .remote
            .table(Method::GET, &self.table)
            .query(&[("select", "*")]);

        let rows: Vec<ListingRow> = self.remote.rows(request).await?;
        debug!("Fetched {} listing rows from {}", rows.len(), self.table);

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    async fn insert(&self, owner: &Identity, fields: ListingFields) -> GatewayResult<Listing> {
        let listing = Listing::create(
            Uuid::new_v4().to_string(),
            Some(owner.id.clone()),
            fields,
            Utc::now(),
        );

        let request = self
            .remote
            .table(Method::POST, &self.table)
            .header("Prefer", "return=representation")
            .json(&[ListingRow::from(listing.clone())]);

        let rows: Vec<ListingRow> = self.remote.rows(request).await?;
        let stored = rows.into_iter().next().map(Listing::from).unwrap_or(listing);

        info!(id = %stored.id, "Inserted listing row {}", stored.title());
        Ok(stored)
    }

    async fn update(&self, id: &str, fields: ListingFields) -> GatewayResult<Listing> {
        let mut listing = self.fetch(id).await?;
        listing.apply(fields, Utc::now());

        let request = self
            .remote
            .table(Method::PATCH, &self.table)
            .query(&Self::id_filter(id))
            .header("Prefer", "return=representation")
            .json(&ListingPatch::from(&listing));

        let rows: Vec<ListingRow> = self.remote.rows(request).await?;
        let updated = rows
            .into_iter()
            .next()
            .map(Listing::from)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;

        info!(id = %id, "Updated listing row {}", updated.title());
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> GatewayResult<()> {
        let request = self
            .remote
            .table(Method::DELETE, &self.table)
            .query(&Self::id_filter(id))
            .header("Prefer", "return=representation");

        let rows: Vec<serde_json::Value> = self.remote.rows(request).await?;
        if rows.is_empty() {
            return Err(GatewayError::NotFound(id.to_string()));
        }

        info!(id = %id, "Deleted listing row");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "remote"
    }
}
