//! Presentation helpers shared by every front end
//!
//! These turn controller state into plain display values so a renderer never
//! has to inspect optional fields or lifecycle states itself.

use recos_core::{CatalogItem, Fetch, PriceStats, Status};

pub const EMPTY_RESULTS: &str = "No results";
pub const EMPTY_HINT: &str = "Try changing your search or filters.";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const GENERATION_FALLBACK: &str = "⚠️ generation failed.";
pub const GENERATING_LABEL: &str = "Generating description…";

/// Display values for one catalog item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCard {
    pub id: String,
    pub title: String,
    /// Brand followed by the price label, when there is one
    pub subtitle: String,
    /// Primary image URL; `None` means render no image at all
    pub image: Option<String>,
    /// Primary category, or `UNCATEGORIZED`
    pub badge: String,
    /// The full comma-separated category list
    pub categories: String,
}

impl ItemCard {
    pub fn from_item(item: &CatalogItem) -> Self {
        let brand = item.brand.as_deref().unwrap_or_default();
        let subtitle = match price_label(item) {
            Some(price) if brand.is_empty() => format!("• {}", price),
            Some(price) => format!("{} • {}", brand, price),
            None => brand.to_string(),
        };

        Self {
            id: item.id.to_string(),
            title: item.display_title().to_string(),
            subtitle,
            image: item.primary_image().map(str::to_string),
            badge: item.primary_category().unwrap_or(UNCATEGORIZED).to_string(),
            categories: item.categories.clone().unwrap_or_default(),
        }
    }
}

/// `₹{price}` for items that carry a price
pub fn price_label(item: &CatalogItem) -> Option<String> {
    item.price
        .as_deref()
        .filter(|price| !price.is_empty())
        .map(|price| format!("₹{}", price))
}

/// What the description panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionView<'a> {
    /// Nothing requested yet, or an empty text came back
    Hidden,
    Generating,
    Text(&'a str),
}

/// Map the description lifecycle to its panel; failures show a fixed fallback
pub fn description_view(description: &Fetch<String>) -> DescriptionView<'_> {
    match description.status() {
        Status::Loading => DescriptionView::Generating,
        Status::Error => DescriptionView::Text(GENERATION_FALLBACK),
        Status::Success if !description.data().is_empty() => {
            DescriptionView::Text(description.data())
        }
        _ => DescriptionView::Hidden,
    }
}

/// Pretty-printed price statistics for display
pub fn format_price_stats(stats: &PriceStats) -> String {
    serde_json::to_string_pretty(stats).unwrap_or_default()
}
