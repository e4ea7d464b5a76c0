use thiserror::Error;

/// Gateway operation errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Listing not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Persistence(String),
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Persistence(format!("Malformed listing data: {}", err))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Persistence(format!("Backend request failed: {}", err))
    }
}
