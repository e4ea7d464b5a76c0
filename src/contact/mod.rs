use crate::models::Listing;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq)]
pub enum IntentError {
    #[error("The seller did not leave {0}")]
    NoTarget(&'static str),

    #[error("Could not open {target}: {reason}")]
    Dispatch { target: String, reason: String },
}

/// A call or mail action aimed at a listing's seller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactIntent {
    Call(String),
    Email(String),
}

impl ContactIntent {
    pub fn call(listing: &Listing) -> Result<Self, IntentError> {
        if listing.owner_phone.trim().is_empty() {
            return Err(IntentError::NoTarget("a phone number"));
        }
        Ok(ContactIntent::Call(listing.owner_phone.clone()))
    }

    pub fn email(listing: &Listing) -> Result<Self, IntentError> {
        match listing.owner_email.as_deref().map(str::trim) {
            Some(address) if !address.is_empty() => Ok(ContactIntent::Email(address.to_string())),
            _ => Err(IntentError::NoTarget("an email address")),
        }
    }

    /// Scheme-qualified target; the number is passed on as the seller typed it
    pub fn target(&self) -> String {
        match self {
            ContactIntent::Call(phone) => format!("tel:{}", phone),
            ContactIntent::Email(address) => format!("mailto:{}", address),
        }
    }
}

impl fmt::Display for ContactIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target())
    }
}

/// Hands a contact intent to whatever handles `tel:`/`mailto:` targets
#[async_trait]
pub trait IntentDispatcher: Send + Sync {
    async fn dispatch(&self, intent: &ContactIntent) -> Result<(), IntentError>;
}

/// Opens targets with an external program such as `xdg-open`
pub struct CommandDispatcher {
    program: String,
}

impl CommandDispatcher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl IntentDispatcher for CommandDispatcher {
    async fn dispatch(&self, intent: &ContactIntent) -> Result<(), IntentError> {
        let target = intent.target();
        debug!("Running {} {}", self.program, target);

        let failed = |reason: String| IntentError::Dispatch {
            target: target.clone(),
            reason,
        };

        let status = Command::new(&self.program)
            .arg(&target)
            .status()
            .await
            .map_err(|e| failed(e.to_string()))?;

        if !status.success() {
            return Err(failed(format!("{} exited with {}", self.program, status)));
        }

        info!("Opened {}", target);
        Ok(())
    }
}
