mod local;
mod remote;

use crate::config::{Config, StorageBackend};
use crate::gateway::RemoteClient;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub use local::LocalAuthenticator;
pub use remote::RemoteAuthenticator;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Please sign in first")]
    SignedOut,

    #[error("Sign-in service unavailable: {0}")]
    Backend(String),
}

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

/// Username/password sign-in
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn sign_in(&self, username: &str, password: &str) -> Result<Identity, AuthError>;
}

/// Create the sign-in collaborator matching the configured backend
pub fn create_authenticator(config: &Config) -> anyhow::Result<Arc<dyn Authenticator>> {
    match &config.backend {
        StorageBackend::Local { .. } => {
            let credentials = config.credentials.as_ref().ok_or_else(|| {
                anyhow::anyhow!("CARMARKET_USERNAME and CARMARKET_PASSWORD must be set for local sign-in")
            })?;
            Ok(Arc::new(LocalAuthenticator::new(
                credentials.username.clone(),
                credentials.password.clone(),
            )))
        }
        StorageBackend::Remote {
            url,
            api_key,
            users_table,
            ..
        } => {
            let remote = RemoteClient::new(url, api_key, config.request_timeout)?;
            Ok(Arc::new(RemoteAuthenticator::new(remote, users_table.clone())))
        }
    }
}

/// Reject blank input before any backend is asked
fn require_credentials<'a>(username: &'a str, password: &'a str) -> Result<(&'a str, &'a str), AuthError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingCredentials);
    }
    Ok((username, password))
}

/// Who is signed in, if anyone
#[derive(Debug, Clone, Default)]
pub struct Session {
    identity: Option<Identity>,
}

impl Session {
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub async fn sign_in(
        &mut self,
        auth: &dyn Authenticator,
        username: &str,
        password: &str,
    ) -> Result<&Identity, AuthError> {
        let identity = auth.sign_in(username, password).await?;
        tracing::info!(user = %identity.username, "Signed in");
        Ok(self.identity.insert(identity))
    }

    pub fn sign_out(&mut self) {
        if let Some(identity) = self.identity.take() {
            tracing::info!(user = %identity.username, "Signed out");
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The signed-in identity, or `SignedOut`
    pub fn require(&self) -> Result<&Identity, AuthError> {
        self.identity.as_ref().ok_or(AuthError::SignedOut)
    }
}
