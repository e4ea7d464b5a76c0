use crate::auth::Session;
use crate::controllers::Notice;
use crate::gateway::{GatewayError, ListingGateway};
use crate::models::{Draft, Field, Listing};
use crate::validation::{self, FieldErrors};
use chrono::{Datelike, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where the form goes after a submit
#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    /// Committed; show the list view
    Saved(Listing),
    /// Validation failed; field errors are set and the form stays open
    Invalid,
    /// Backend failed or nobody is signed in; a notice is set and the draft is kept
    Failed,
    /// The edited listing is gone; a notice is set and the list view should reload
    ReturnToList,
}

/// Shared Add/Edit form. Editing an existing listing when `existing` is set.
pub struct FormController {
    gateway: Arc<dyn ListingGateway>,
    existing: Option<Listing>,
    draft: Draft,
    errors: FieldErrors,
    notice: Option<Notice>,
}

impl FormController {
    /// Empty form for a new listing
    pub fn add(gateway: Arc<dyn ListingGateway>) -> Self {
        Self::new(gateway, None)
    }

    /// Form preloaded from an existing listing
    pub fn edit(gateway: Arc<dyn ListingGateway>, listing: Listing) -> Self {
        Self::new(gateway, Some(listing))
    }

    fn new(gateway: Arc<dyn ListingGateway>, existing: Option<Listing>) -> Self {
        let draft = existing.as_ref().map(Draft::from_listing).unwrap_or_default();
        Self {
            gateway,
            existing,
            draft,
            errors: FieldErrors::new(),
            notice: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.existing.is_some()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Change one input; its stale error goes away
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.draft.set(field, value);
        self.errors.remove(&field);
    }

    /// Attach photo URIs from the camera or the photo library
    pub fn add_images<I, S>(&mut self, uris: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.draft.add_images(uris);
    }

    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        self.draft.remove_image(index)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Validate against this year and commit
    pub async fn submit(&mut self, session: &Session) -> FormOutcome {
        self.submit_in_year(session, Utc::now().year()).await
    }

    /// Validate against `current_year` and, if acceptable, insert or update
    pub async fn submit_in_year(&mut self, session: &Session, current_year: i32) -> FormOutcome {
        self.notice = None;

        let fields = match validation::check(&self.draft, current_year) {
            Ok(fields) => fields,
            Err(errors) => {
                debug!("Form has {} invalid fields", errors.len());
                self.errors = errors;
                return FormOutcome::Invalid;
            }
        };
        self.errors.clear();

        let owner = match session.require() {
            Ok(identity) => identity,
            Err(err) => {
                self.notice = Some(Notice::from(&err));
                return FormOutcome::Failed;
            }
        };

        let (action, result) = match &self.existing {
            Some(listing) => ("update the listing", self.gateway.update(&listing.id, fields).await),
            None => ("save the listing", self.gateway.insert(owner, fields).await),
        };

        match result {
            Ok(listing) => {
                info!(id = %listing.id, "✅ Saved {}", listing.title());
                self.existing = self.existing.take().map(|_| listing.clone());
                FormOutcome::Saved(listing)
            }
            Err(err) => {
                warn!("Could not {}: {}", action, err);
                self.notice = Some(Notice::from_gateway(action, &err));
                match err {
                    GatewayError::NotFound(_) => FormOutcome::ReturnToList,
                    GatewayError::Persistence(_) => FormOutcome::Failed,
                }
            }
        }
    }
}
