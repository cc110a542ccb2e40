//! Analytics view controller

use recos_client::ClientError;
use recos_core::{AnalyticsSummary, CategoryCount, Completion, Fetch, PriceStats, Status};
use tracing::{debug, info, warn};

/// Identifies one analytics fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsTicket {
    generation: u64,
}

/// Fetches the catalog summary once per view activation
#[derive(Debug, Default)]
pub struct AnalyticsController {
    summary: Fetch<Option<AnalyticsSummary>>,
    generation: u64,
    active: bool,
}

impl AnalyticsController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Status {
        self.summary.status()
    }

    pub fn is_loading(&self) -> bool {
        self.summary.is_loading()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn error(&self) -> Option<&str> {
        self.summary.error()
    }

    /// Start the view's single fetch; `None` if the view is already active
    pub fn activate(&mut self) -> Option<AnalyticsTicket> {
        if self.active {
            return None;
        }
        self.active = true;
        self.generation += 1;
        self.summary.reset();
        self.summary.start();

        debug!("Analytics fetch #{} issued", self.generation);
        Some(AnalyticsTicket {
            generation: self.generation,
        })
    }

    /// Leave the view; a fetch still in flight will be dropped
    pub fn deactivate(&mut self) {
        self.active = false;
        self.generation += 1;
        self.summary.reset();
    }

    pub fn complete(
        &mut self,
        ticket: &AnalyticsTicket,
        result: Result<AnalyticsSummary, ClientError>,
    ) -> Completion {
        if !self.active || ticket.generation != self.generation {
            debug!("Dropping stale analytics fetch #{}", ticket.generation);
            return Completion::Stale;
        }

        match result {
            Ok(summary) => {
                info!(
                    "Analytics summary: {} categories, {} items",
                    summary.category_counts.len(),
                    summary.total_items()
                );
                self.summary.succeed(Some(summary));
            }
            Err(e) => {
                warn!("Analytics summary failed: {}", e);
                self.summary.fail(e.to_string());
            }
        }
        Completion::Applied
    }

    /// Category histogram in the backend's order; only after a successful fetch
    pub fn histogram(&self) -> Option<&[CategoryCount]> {
        self.loaded().map(|summary| summary.category_counts.as_slice())
    }

    /// Price statistics exactly as the backend sent them
    pub fn price_stats(&self) -> Option<&PriceStats> {
        self.loaded()?.price_stats.as_ref()
    }

    fn loaded(&self) -> Option<&AnalyticsSummary> {
        match self.summary.status() {
            Status::Success => self.summary.data().as_ref(),
            _ => None,
        }
    }
}
