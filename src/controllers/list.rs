use crate::auth::Session;
use crate::controllers::Notice;
use crate::gateway::ListingGateway;
use crate::models::Listing;
use crate::query::{self, SortKey};
use std::sync::Arc;
use tracing::{debug, warn};

/// Browse screen: the latest listing snapshot seen through search and sort
pub struct ListController {
    gateway: Arc<dyn ListingGateway>,
    snapshot: Arc<[Listing]>,
    search_text: String,
    sort: SortKey,
    notice: Option<Notice>,
}

impl ListController {
    pub fn new(gateway: Arc<dyn ListingGateway>) -> Self {
        Self {
            gateway,
            snapshot: Arc::from(Vec::<Listing>::new()),
            search_text: String::new(),
            sort: SortKey::default(),
            notice: None,
        }
    }

    /// Replace the snapshot with a fresh `list_all`. On failure the previous
    /// snapshot stays and a notice is set.
    pub async fn refresh(&mut self, session: &Session) -> Result<usize, Notice> {
        if let Err(err) = session.require() {
            return Err(self.fail(Notice::from(&err)));
        }

        match self.gateway.list_all().await {
            Ok(listings) => {
                debug!("Loaded {} listings from {}", listings.len(), self.gateway.backend_name());
                self.snapshot = Arc::from(listings);
                self.notice = None;
                Ok(self.snapshot.len())
            }
            Err(err) => {
                warn!("Could not load listings: {}", err);
                Err(self.fail(Notice::from_gateway("load listings", &err)))
            }
        }
    }

    fn fail(&mut self, notice: Notice) -> Notice {
        self.notice = Some(notice.clone());
        notice
    }

    /// The full unfiltered snapshot
    pub fn snapshot(&self) -> Arc<[Listing]> {
        self.snapshot.clone()
    }

    /// Listings to render, filtered and ordered
    pub fn visible(&self) -> Vec<Listing> {
        query::query(&self.snapshot, &self.search_text, self.sort)
    }

    pub fn find(&self, id: &str) -> Option<&Listing> {
        self.snapshot.iter().find(|l| l.id == id)
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}
