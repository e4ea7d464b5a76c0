use super::{require_credentials, AuthError, Authenticator, Identity};
use crate::gateway::RemoteClient;
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct UserRow {
    id: serde_json::Value,
    username: String,
    password: String,
}

/// Sign-in by looking the user up in a hosted users table
pub struct RemoteAuthenticator {
    remote: RemoteClient,
    table: String,
}

impl RemoteAuthenticator {
    pub fn new(remote: RemoteClient, table: impl Into<String>) -> Self {
        Self {
            remote,
            table: table.into(),
        }
    }
}

#[async_trait]
impl Authenticator for RemoteAuthenticator {
    async fn sign_in(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        let (username, password) = require_credentials(username, password)?;

        let request = self
            .remote
            .table(Method::GET, &self.table)
            .query(&[
                ("username", format!("eq.{}", username)),
                ("select", "id,username,password".to_string()),
            ]);

        let rows: Vec<UserRow> = self
            .remote
            .rows(request)
            .await
            .map_err(|e| AuthError::Backend(e.to_string()))?;

        let user = rows
            .into_iter()
            .find(|row| row.password == password)
            .ok_or_else(|| {
                debug!(user = %username, "Remote sign-in rejected");
                AuthError::InvalidCredentials
            })?;

        let id = match user.id {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        Ok(Identity::new(id, user.username))
    }
}
