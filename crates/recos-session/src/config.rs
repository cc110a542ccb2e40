//! Session configuration

use crate::error::{Result, SessionError};

/// Prompt searched on activation when the user has typed nothing yet
pub const DEFAULT_QUERY: &str = "modern wooden chair";

/// Configuration for a `Screen`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Query text the session starts with
    pub default_query: String,

    /// Result limit (`k`) for searches
    pub search_limit: usize,

    /// Result limit (`k`) for recommendations
    pub recommend_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_query: DEFAULT_QUERY.to_string(),
            search_limit: 12,
            recommend_limit: 6,
        }
    }
}

impl SessionConfig {
    /// Read `RECOS_QUERY`, `RECOS_SEARCH_LIMIT` and `RECOS_RECOMMEND_LIMIT`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(query) = lookup("RECOS_QUERY") {
            config.default_query = query;
        }
        if let Some(raw) = lookup("RECOS_SEARCH_LIMIT") {
            config.search_limit = parse_limit("RECOS_SEARCH_LIMIT", &raw)?;
        }
        if let Some(raw) = lookup("RECOS_RECOMMEND_LIMIT") {
            config.recommend_limit = parse_limit("RECOS_RECOMMEND_LIMIT", &raw)?;
        }

        Ok(config)
    }
}

fn parse_limit(key: &str, raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(SessionError::Config(format!(
            "{} must be a positive integer, got {:?}",
            key, raw
        ))),
    }
}
