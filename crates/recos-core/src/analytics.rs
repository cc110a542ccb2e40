//! Aggregate catalog analytics

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Summary statistics over catalog prices (min, max, mean, ...)
///
/// The key set is owned by the backend and passed through untouched.
pub type PriceStats = serde_json::Map<String, serde_json::Value>;

/// One bar of the category histogram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub label: String,
    pub count: u64,
}

impl CategoryCount {
    pub fn new(label: impl Into<String>, count: u64) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// The `/analytics/summary` payload
///
/// `category_counts` keeps the order in which the backend listed the labels.
/// A missing or null mapping decodes as empty; missing or null `price_stats`
/// decodes as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(
        default,
        deserialize_with = "ordered_counts",
        serialize_with = "counts_as_map"
    )]
    pub category_counts: Vec<CategoryCount>,

    #[serde(default)]
    pub price_stats: Option<PriceStats>,
}

impl AnalyticsSummary {
    /// Number of items across every category
    pub fn total_items(&self) -> u64 {
        self.category_counts.iter().map(|c| c.count).sum()
    }
}

fn ordered_counts<'de, D>(deserializer: D) -> Result<Vec<CategoryCount>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountsVisitor;

    impl<'de> Visitor<'de> for CountsVisitor {
        type Value = Vec<CategoryCount>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of category label to count")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut counts = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((label, count)) = map.next_entry::<String, u64>()? {
                counts.push(CategoryCount { label, count });
            }
            Ok(counts)
        }
    }

    deserializer.deserialize_any(CountsVisitor)
}

fn counts_as_map<S>(counts: &[CategoryCount], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for entry in counts {
        map.serialize_entry(&entry.label, &entry.count)?;
    }
    map.end()
}
