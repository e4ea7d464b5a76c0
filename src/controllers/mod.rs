pub mod details;
pub mod form;
pub mod list;

pub use details::{DeleteOutcome, DetailsController};
pub use form::{FormController, FormOutcome};
pub use list::ListController;

use crate::auth::AuthError;
use crate::contact::IntentError;
use crate::gateway::GatewayError;
use std::fmt;

/// What went wrong, for choosing how a notification is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    NotFound,
    Persistence,
    Intent,
    Auth,
}

/// Dismissible user-facing error notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    /// Describe a failed gateway call; `action` reads like "save the listing"
    pub fn from_gateway(action: &str, err: &GatewayError) -> Self {
        match err {
            GatewayError::NotFound(_) => Self {
                kind: NoticeKind::NotFound,
                message: "This listing no longer exists".to_string(),
            },
            GatewayError::Persistence(reason) => Self {
                kind: NoticeKind::Persistence,
                message: format!("Could not {}: {}", action, reason),
            },
        }
    }
}

impl From<&AuthError> for Notice {
    fn from(err: &AuthError) -> Self {
        Self {
            kind: NoticeKind::Auth,
            message: err.to_string(),
        }
    }
}

impl From<&IntentError> for Notice {
    fn from(err: &IntentError) -> Self {
        Self {
            kind: NoticeKind::Intent,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
