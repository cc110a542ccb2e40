//! The remote operations the session core depends on

use async_trait::async_trait;
use recos_core::{AnalyticsSummary, CatalogItem, ItemId};

use crate::error::Result;

/// Remote catalog operations
///
/// Each call is a single attempt: no retries and no caching. Failures come
/// back classified as `ClientError` for the caller to present.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Ranked results for a free-text prompt
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogItem>>;

    /// Items related to `item_id`
    async fn recommend(&self, item_id: &ItemId, limit: usize) -> Result<Vec<CatalogItem>>;

    /// Generated description text for `item_id` (may be empty)
    async fn generate(&self, item_id: &ItemId) -> Result<String>;

    /// Category histogram and price statistics over the whole catalog
    async fn analytics_summary(&self) -> Result<AnalyticsSummary>;
}
