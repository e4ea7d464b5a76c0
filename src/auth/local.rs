use super::{require_credentials, AuthError, Authenticator, Identity};
use async_trait::async_trait;
use tracing::debug;

/// Device-local sign-in against one configured account
pub struct LocalAuthenticator {
    username: String,
    password: String,
}

impl LocalAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

#[async_trait]
impl Authenticator for LocalAuthenticator {
    async fn sign_in(&self, username: &str, password: &str) -> Result<Identity, AuthError> {
        let (username, password) = require_credentials(username, password)?;

        if username != self.username || password != self.password {
            debug!(user = %username, "Local sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(Identity::new(format!("local:{}", username), username))
    }
}
