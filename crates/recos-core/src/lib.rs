//! Recos Core - Core types for the product discovery client
//!
//! This crate defines the data shared by every other Recos crate:
//! - `CatalogItem`: a product returned by search or recommend
//! - `AnalyticsSummary`: the aggregate catalog view
//! - `FilterCriteria` and `filter`: the local filter engine
//! - `Fetch`: the lifecycle of one asynchronous operation

pub mod analytics;
pub mod error;
pub mod filter;
pub mod item;
pub mod lifecycle;

pub use analytics::*;
pub use error::*;
pub use filter::*;
pub use item::*;
pub use lifecycle::*;
