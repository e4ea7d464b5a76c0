use crate::auth::Session;
use crate::contact::{ContactIntent, IntentDispatcher, IntentError};
use crate::controllers::{FormController, Notice};
use crate::gateway::{GatewayError, ListingGateway};
use crate::models::Listing;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Nothing deleted yet; the user must confirm first
    NeedsConfirmation,
    /// Gone; show the list view
    Deleted,
    /// Backend failed or nobody is signed in; the listing remains
    Failed,
    /// Someone else already removed it; show the list view
    ReturnToList,
}

/// Detail screen for one listing: contact actions, edit and delete
pub struct DetailsController {
    gateway: Arc<dyn ListingGateway>,
    dispatcher: Arc<dyn IntentDispatcher>,
    listing: Listing,
    confirming_delete: bool,
    notice: Option<Notice>,
}

impl DetailsController {
    pub fn new(
        gateway: Arc<dyn ListingGateway>,
        dispatcher: Arc<dyn IntentDispatcher>,
        listing: Listing,
    ) -> Self {
        Self {
            gateway,
            dispatcher,
            listing,
            confirming_delete: false,
            notice: None,
        }
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Open the edit form for this listing
    pub fn edit(&self) -> FormController {
        FormController::edit(self.gateway.clone(), self.listing.clone())
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.confirming_delete
    }

    /// First step of delete: ask the user to confirm
    pub fn request_delete(&mut self) -> DeleteOutcome {
        self.confirming_delete = true;
        DeleteOutcome::NeedsConfirmation
    }

    pub fn cancel_delete(&mut self) {
        self.confirming_delete = false;
    }

    /// Second step of delete. Does nothing unless `request_delete` came first.
    pub async fn confirm_delete(&mut self, session: &Session) -> DeleteOutcome {
        if !self.confirming_delete {
            return DeleteOutcome::NeedsConfirmation;
        }
        self.confirming_delete = false;
        self.notice = None;

        if let Err(err) = session.require() {
            self.notice = Some(Notice::from(&err));
            return DeleteOutcome::Failed;
        }

        match self.gateway.delete(&self.listing.id).await {
            Ok(()) => {
                info!(id = %self.listing.id, "🗑️  Deleted {}", self.listing.title());
                DeleteOutcome::Deleted
            }
            Err(err) => {
                warn!(id = %self.listing.id, "Delete failed: {}", err);
                self.notice = Some(Notice::from_gateway("delete the listing", &err));
                match err {
                    GatewayError::NotFound(_) => DeleteOutcome::ReturnToList,
                    GatewayError::Persistence(_) => DeleteOutcome::Failed,
                }
            }
        }
    }

    /// Dial the seller's phone number
    pub async fn call_owner(&mut self) -> Result<(), Notice> {
        let intent = ContactIntent::call(&self.listing);
        self.contact(intent).await
    }

    /// Write to the seller's email address
    pub async fn email_owner(&mut self) -> Result<(), Notice> {
        let intent = ContactIntent::email(&self.listing);
        self.contact(intent).await
    }

    async fn contact(&mut self, intent: Result<ContactIntent, IntentError>) -> Result<(), Notice> {
        let result = match intent {
            Ok(intent) => self.dispatcher.dispatch(&intent).await,
            Err(err) => Err(err),
        };

        result.map_err(|err| {
            warn!("Contact action failed: {}", err);
            let notice = Notice::from(&err);
            self.notice = Some(notice.clone());
            notice
        })
    }
}
