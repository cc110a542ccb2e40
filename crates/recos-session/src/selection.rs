//! Selection and derived-view controller
//!
//! Holds a copy of the item the user picked plus two independent derived
//! views fetched for it: related-item recommendations and a generated
//! description. Changing the selection resets both views and invalidates
//! every request issued for the previous selection.

use recos_client::ClientError;
use recos_core::{CatalogItem, Completion, Fetch, ItemId};
use tracing::{debug, info, warn};

/// Identifies one derived-view request and the selection it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedTicket {
    item_id: ItemId,
    selection: u64,
    request: u64,
}

impl DerivedTicket {
    /// Id of the item selected when the request was issued
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }
}

/// State machine for the selected item and its derived views
#[derive(Debug, Default)]
pub struct SelectionController {
    selected: Option<CatalogItem>,

    /// Bumped on every selection change
    selection: u64,

    recommendations: Fetch<Vec<CatalogItem>>,
    recommend_request: u64,

    description: Fetch<String>,
    describe_request: u64,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&CatalogItem> {
        self.selected.as_ref()
    }

    pub fn recommendations(&self) -> &Fetch<Vec<CatalogItem>> {
        &self.recommendations
    }

    pub fn description(&self) -> &Fetch<String> {
        &self.description
    }

    pub fn is_loading(&self) -> bool {
        self.recommendations.is_loading() || self.description.is_loading()
    }

    /// Select `item`, resetting both derived views before anything else
    pub fn select(&mut self, item: CatalogItem) {
        debug!("Selected item {}", item.id);
        self.selected = Some(item);
        self.invalidate();
    }

    /// Drop the selection and its derived views
    pub fn clear(&mut self) {
        if self.selected.take().is_some() {
            debug!("Selection cleared");
        }
        self.invalidate();
    }

    fn invalidate(&mut self) {
        self.selection += 1;
        self.recommendations.reset();
        self.description.reset();
    }

    /// Start a recommendation fetch for the current selection
    pub fn request_recommendations(&mut self) -> Option<DerivedTicket> {
        let item_id = self.selected.as_ref()?.id.clone();
        self.recommend_request += 1;
        self.recommendations.reset();
        self.recommendations.start();

        Some(DerivedTicket {
            item_id,
            selection: self.selection,
            request: self.recommend_request,
        })
    }

    /// Start a description generation for the current selection
    pub fn request_description(&mut self) -> Option<DerivedTicket> {
        let item_id = self.selected.as_ref()?.id.clone();
        self.describe_request += 1;
        self.description.reset();
        self.description.start();

        Some(DerivedTicket {
            item_id,
            selection: self.selection,
            request: self.describe_request,
        })
    }

    pub fn complete_recommendations(
        &mut self,
        ticket: &DerivedTicket,
        result: Result<Vec<CatalogItem>, ClientError>,
    ) -> Completion {
        if !self.is_current(ticket, self.recommend_request) {
            debug!("Dropping stale recommendations for {}", ticket.item_id);
            return Completion::Stale;
        }

        match result {
            Ok(items) => {
                info!("Received {} recommendations for {}", items.len(), ticket.item_id);
                self.recommendations.succeed(items);
            }
            Err(e) => {
                warn!("Recommendations for {} failed: {}", ticket.item_id, e);
                self.recommendations.fail(e.to_string());
            }
        }
        Completion::Applied
    }

    pub fn complete_description(
        &mut self,
        ticket: &DerivedTicket,
        result: Result<String, ClientError>,
    ) -> Completion {
        if !self.is_current(ticket, self.describe_request) {
            debug!("Dropping stale description for {}", ticket.item_id);
            return Completion::Stale;
        }

        match result {
            Ok(text) => {
                info!("Generated {} chars for {}", text.len(), ticket.item_id);
                self.description.succeed(text);
            }
            Err(e) => {
                warn!("Description for {} failed: {}", ticket.item_id, e);
                self.description.fail(e.to_string());
            }
        }
        Completion::Applied
    }

    fn is_current(&self, ticket: &DerivedTicket, latest_request: u64) -> bool {
        ticket.selection == self.selection
            && ticket.request == latest_request
            && self.selected.as_ref().is_some_and(|item| item.id == ticket.item_id)
    }
}
