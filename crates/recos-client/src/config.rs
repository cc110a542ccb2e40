//! Client configuration

use std::time::Duration;

use url::Url;

use crate::error::{ClientError, Result};

/// Backend used when `RECOS_API` is not set
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Per-request timeout used when `RECOS_TIMEOUT_SECS` is not set
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for a `CatalogClient`
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend base URL; endpoint paths are appended to it
    pub base_url: Url,

    /// Per-request timeout (None = wait indefinitely)
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.parse().unwrap(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at `base_url` with default settings
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url.as_ref())?,
            ..Self::default()
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `RECOS_API` and `RECOS_TIMEOUT_SECS` from the environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup("RECOS_API") {
            Some(url) => Self::new(url)?,
            None => Self::default(),
        };

        if let Some(raw) = lookup("RECOS_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("RECOS_TIMEOUT_SECS must be whole seconds, got {:?}", raw))
            })?;
            config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url: Url = raw
        .trim()
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ClientError::InvalidUrl(format!(
            "Unsupported scheme: {} (only http/https allowed)",
            url.scheme()
        )));
    }

    Ok(url)
}
