use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_LISTINGS_TABLE: &str = "listings";
const DEFAULT_USERS_TABLE: &str = "users";
const DEFAULT_OPENER: &str = "xdg-open";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set when CARMARKET_BACKEND=remote")]
    Missing(&'static str),

    #[error("Unknown backend '{0}', expected 'local' or 'remote'")]
    UnknownBackend(String),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

/// Where listings are persisted
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// JSON file in a data directory on this device
    Local { data_dir: PathBuf },
    /// Hosted REST table service
    Remote {
        url: String,
        api_key: String,
        listings_table: String,
        users_table: String,
    },
}

/// Username/password pair
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Application configuration, read from `CARMARKET_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub backend: StorageBackend,
    pub credentials: Option<Credentials>,
    pub opener: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Load from the process environment, after reading a `.env` file if present
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get("CARMARKET_BACKEND").as_deref().map(str::trim) {
            None | Some("local") => StorageBackend::Local {
                data_dir: get("CARMARKET_DATA_DIR")
                    .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
                    .into(),
            },
            Some("remote") => StorageBackend::Remote {
                url: get("CARMARKET_REMOTE_URL")
                    .ok_or(ConfigError::Missing("CARMARKET_REMOTE_URL"))?,
                api_key: get("CARMARKET_REMOTE_KEY")
                    .ok_or(ConfigError::Missing("CARMARKET_REMOTE_KEY"))?,
                listings_table: get("CARMARKET_LISTINGS_TABLE")
                    .unwrap_or_else(|| DEFAULT_LISTINGS_TABLE.to_string()),
                users_table: get("CARMARKET_USERS_TABLE")
                    .unwrap_or_else(|| DEFAULT_USERS_TABLE.to_string()),
            },
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        let credentials = match (get("CARMARKET_USERNAME"), lookup("CARMARKET_PASSWORD")) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            _ => None,
        };

        let timeout_secs = match get("CARMARKET_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("CARMARKET_TIMEOUT_SECS", raw))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            backend,
            credentials,
            opener: get("CARMARKET_OPENER").unwrap_or_else(|| DEFAULT_OPENER.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
