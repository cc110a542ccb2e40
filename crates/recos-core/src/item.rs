//! Catalog item types - the products returned by search and recommend

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, PriceParseError, Result};

/// Stable identifier of a catalog item (`uniq_id` on the wire)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a user-supplied id, rejecting blank input
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidItemId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A product record returned by the search and recommend endpoints
///
/// Only `id` is required. Every other attribute may be absent or null on the
/// wire and must still render:
/// - `price` is free text and may carry currency formatting
/// - `categories` is a comma-separated list, first segment is primary
/// - `images` is a comma-separated list of URLs, first segment is primary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "uniq_id")]
    pub id: ItemId,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default, deserialize_with = "price_text")]
    pub price: Option<String>,

    #[serde(default)]
    pub categories: Option<String>,

    #[serde(default)]
    pub images: Option<String>,
}

impl CatalogItem {
    /// Create an item carrying only its id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            title: None,
            brand: None,
            price: None,
            categories: None,
            images: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = Some(categories.into());
        self
    }

    pub fn with_images(mut self, images: impl Into<String>) -> Self {
        self.images = Some(images.into());
        self
    }

    /// Title, or an empty string when the backend sent none
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// First URL of the `images` list, if there is a usable one
    pub fn primary_image(&self) -> Option<&str> {
        first_segment(self.images.as_deref())
    }

    /// First label of the `categories` list
    pub fn primary_category(&self) -> Option<&str> {
        first_segment(self.categories.as_deref())
    }

    /// Numeric value of `price`
    pub fn price_value(&self) -> Result<f64> {
        let text = self.price.as_deref().unwrap_or_default();
        Ok(parse_price(text)?)
    }
}

fn first_segment(list: Option<&str>) -> Option<&str> {
    let first = list?.split(',').next()?.trim();
    (!first.is_empty()).then_some(first)
}

/// Parse a free-text price such as `"₹1,200"` or `"999.50"`.
///
/// Every character that is not an ASCII digit or a decimal point is dropped,
/// then the longest leading run holding at most one decimal point is read as
/// the number.
pub fn parse_price(text: &str) -> std::result::Result<f64, PriceParseError> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let end = cleaned
        .match_indices('.')
        .nth(1)
        .map_or(cleaned.len(), |(idx, _)| idx);
    let number = &cleaned[..end];

    if !number.bytes().any(|b| b.is_ascii_digit()) {
        return Err(PriceParseError::NoDigits(text.to_string()));
    }

    number
        .parse::<f64>()
        .map_err(|_| PriceParseError::NotNumeric(text.to_string()))
}

/// Accept `price` as either a JSON string or a JSON number
fn price_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PriceRepr {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<PriceRepr>::deserialize(deserializer)?.map(|repr| match repr {
        PriceRepr::Text(text) => text,
        PriceRepr::Number(number) => number.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_strips_currency() {
        assert_eq!(parse_price("₹1,200").unwrap(), 1200.0);
        assert_eq!(parse_price("999").unwrap(), 999.0);
        assert_eq!(parse_price("$49.99").unwrap(), 49.99);
    }

    #[test]
    fn test_parse_price_stops_at_second_decimal_point() {
        assert_eq!(parse_price("1.2.3").unwrap(), 1.2);
    }

    #[test]
    fn test_parse_price_rejects_non_numeric() {
        assert!(matches!(parse_price("abc"), Err(PriceParseError::NoDigits(_))));
        assert!(matches!(parse_price(""), Err(PriceParseError::NoDigits(_))));
        assert!(matches!(parse_price("."), Err(PriceParseError::NoDigits(_))));
    }

    #[test]
    fn test_decode_minimal_item() {
        let item: CatalogItem = serde_json::from_str(r#"{"uniq_id": "abc"}"#).unwrap();
        assert_eq!(item.id.as_str(), "abc");
        assert_eq!(item.display_title(), "");
        assert_eq!(item.primary_image(), None);
        assert_eq!(item.primary_category(), None);
        assert!(item.price_value().is_err());
    }

    #[test]
    fn test_decode_nulls_and_numeric_price() {
        let item: CatalogItem = serde_json::from_str(
            r#"{"uniq_id": "x1", "title": "Chair", "brand": null, "price": 1499, "categories": null, "images": null}"#,
        )
        .unwrap();
        assert_eq!(item.brand, None);
        assert_eq!(item.price.as_deref(), Some("1499"));
        assert_eq!(item.price_value().unwrap(), 1499.0);
    }

    #[test]
    fn test_decode_requires_id() {
        let result = serde_json::from_str::<CatalogItem>(r#"{"title": "No id"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_primary_segments() {
        let item = CatalogItem::new("a")
            .with_categories("Home, Furniture")
            .with_images("https://img/1.jpg,https://img/2.jpg");
        assert_eq!(item.primary_category(), Some("Home"));
        assert_eq!(item.primary_image(), Some("https://img/1.jpg"));

        let blank = CatalogItem::new("b").with_images("").with_categories(" ,Office");
        assert_eq!(blank.primary_image(), None);
        assert_eq!(blank.primary_category(), None);
    }

    #[test]
    fn test_item_id_parse() {
        assert_eq!(ItemId::parse("  abc ").unwrap(), ItemId::new("abc"));
        assert!(matches!(ItemId::parse("   "), Err(CoreError::InvalidItemId(_))));
    }
}
