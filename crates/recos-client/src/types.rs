//! Wire types for the catalog backend's JSON responses

use recos_core::CatalogItem;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Catalog Operations
// ============================================================================

/// Response of `GET /search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<CatalogItem>,
}

/// Response of `GET /recommend/{item_id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended: Vec<CatalogItem>,
}

/// Response of `GET /generate/{item_id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub uniq_id: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub generated_description: String,
}

// ============================================================================
// Service Operations
// ============================================================================

/// Response of `GET /healthz`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Response of `GET /classify`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub predicted_category: String,
}

/// Decode an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
