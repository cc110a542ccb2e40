//! Local filter engine
//!
//! Narrows an already-fetched result set by category and price without any
//! network round trip. Everything here is pure so the visible list can be
//! recomputed on every keystroke.

use serde::{Deserialize, Serialize};

use crate::item::CatalogItem;

/// User-entered constraints on the visible results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring matched against the whole `categories` field
    pub category_substring: String,

    /// Inclusive lower price bound
    pub min_price: Option<f64>,

    /// Inclusive upper price bound
    pub max_price: Option<f64>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, substring: impl Into<String>) -> Self {
        self.category_substring = substring.into();
        self
    }

    pub fn with_min_price(mut self, min: f64) -> Self {
        self.min_price = Some(min);
        self
    }

    pub fn with_max_price(mut self, max: f64) -> Self {
        self.max_price = Some(max);
        self
    }

    /// True when no constraint is set and every item is visible
    pub fn is_empty(&self) -> bool {
        self.category_substring.is_empty() && !self.has_price_bounds()
    }

    pub fn has_price_bounds(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some()
    }

    /// Whether a single item passes both the category and the price test
    pub fn matches(&self, item: &CatalogItem) -> bool {
        self.category_matches(item) && self.price_matches(item)
    }

    fn category_matches(&self, item: &CatalogItem) -> bool {
        if self.category_substring.is_empty() {
            return true;
        }
        item.categories
            .as_deref()
            .unwrap_or_default()
            .to_lowercase()
            .contains(&self.category_substring.to_lowercase())
    }

    fn price_matches(&self, item: &CatalogItem) -> bool {
        if !self.has_price_bounds() {
            return true;
        }
        // An unparseable price cannot satisfy a bound
        let Ok(price) = item.price_value() else {
            return false;
        };
        if self.min_price.is_some_and(|min| price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| price > max) {
            return false;
        }
        true
    }
}

/// Iterate the items of `raw` that pass `criteria`, in their original order
pub fn visible<'a>(
    raw: &'a [CatalogItem],
    criteria: &'a FilterCriteria,
) -> impl Iterator<Item = &'a CatalogItem> + 'a {
    raw.iter().filter(move |item| criteria.matches(item))
}

/// Derive the visible subset of `raw` under `criteria`
pub fn filter(raw: &[CatalogItem], criteria: &FilterCriteria) -> Vec<CatalogItem> {
    visible(raw, criteria).cloned().collect()
}
