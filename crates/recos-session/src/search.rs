//! Search session controller
//!
//! Owns the query text, the raw result set and the search lifecycle. Every
//! issued search carries a generation number; only the completion for the
//! most recently issued generation is applied.

use recos_client::ClientError;
use recos_core::{CatalogItem, Completion, Fetch, ItemId, Status};
use tracing::{debug, info, warn};

/// Identifies one issued search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    query: String,
}

impl SearchTicket {
    /// Query text captured when the search was issued
    pub fn query(&self) -> &str {
        &self.query
    }
}

/// State machine for the search operation
#[derive(Debug)]
pub struct SearchController {
    query: String,
    results: Fetch<Vec<CatalogItem>>,
    generation: u64,
    activated: bool,
}

impl SearchController {
    pub fn new(default_query: impl Into<String>) -> Self {
        Self {
            query: default_query.into(),
            results: Fetch::new(),
            generation: 0,
            activated: false,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status(&self) -> Status {
        self.results.status()
    }

    pub fn is_loading(&self) -> bool {
        self.results.is_loading()
    }

    /// Results of the last successful search
    pub fn results(&self) -> &[CatalogItem] {
        self.results.data()
    }

    pub fn error(&self) -> Option<&str> {
        self.results.error()
    }

    /// Look up an item in the current result set
    pub fn item(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.results().iter().find(|item| &item.id == id)
    }

    /// Update the query text; no search is issued
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
    }

    /// Issue the initial search, exactly once per controller
    pub fn activate(&mut self) -> Option<SearchTicket> {
        if self.activated {
            return None;
        }
        self.activated = true;
        Some(self.run_search())
    }

    /// Issue a search for the current query, superseding any in flight
    pub fn run_search(&mut self) -> SearchTicket {
        self.activated = true;
        self.generation += 1;
        self.results.start();

        debug!("Search #{} issued for {:?}", self.generation, self.query);

        SearchTicket {
            generation: self.generation,
            query: self.query.clone(),
        }
    }

    /// Apply a finished search if it is still the latest one issued
    ///
    /// On failure the previous results stay visible next to the error.
    pub fn complete(
        &mut self,
        ticket: &SearchTicket,
        result: Result<Vec<CatalogItem>, ClientError>,
    ) -> Completion {
        if ticket.generation != self.generation {
            debug!(
                "Dropping stale search #{} (latest is #{})",
                ticket.generation, self.generation
            );
            return Completion::Stale;
        }

        match result {
            Ok(items) => {
                info!("Search {:?} returned {} results", ticket.query, items.len());
                self.results.succeed(items);
            }
            Err(e) => {
                warn!("Search {:?} failed: {}", ticket.query, e);
                self.results.fail(e.to_string());
            }
        }
        Completion::Applied
    }
}
