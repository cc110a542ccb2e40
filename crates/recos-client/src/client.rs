//! HTTP client implementation

use async_trait::async_trait;
use recos_core::{AnalyticsSummary, CatalogItem, ItemId};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::api::CatalogApi;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::types::{ClassifyResponse, GenerateResponse, HealthStatus, RecommendResponse, SearchResponse};

const USER_AGENT: &str = concat!("recos/", env!("CARGO_PKG_VERSION"));

/// Client for the catalog backend's JSON-over-HTTP API
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl CatalogClient {
    /// Build a client for the configured backend
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Catalog client ready for {}", config.base_url);

        Ok(Self { http, config })
    }

    /// Build a client from `RECOS_API` / `RECOS_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the backend URL
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    // ========================================================================
    // Service Operations
    // ========================================================================

    /// Probe the backend's health endpoint
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.endpoint(&["healthz"])?;
        self.get_json(url).await
    }

    /// Predict a category for the image at `image_url`
    pub async fn classify(&self, image_url: &str) -> Result<String> {
        let mut url = self.endpoint(&["classify"])?;
        url.query_pairs_mut().append_pair("image_url", image_url);

        let response: ClassifyResponse = self.get_json(url).await?;
        Ok(response.predicted_category)
    }

    // ========================================================================
    // Transport
    // ========================================================================

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base URL", self.config.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!("GET {} returned {}", url, status);
            return Err(ClientError::Response {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("Failed to read response body: {}", e)))?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<CatalogItem>> {
        let mut url = self.endpoint(&["search"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("k", &limit.to_string());

        let response: SearchResponse = self.get_json(url).await?;
        debug!("Search {:?} returned {} results", query, response.results.len());
        Ok(response.results)
    }

    async fn recommend(&self, item_id: &ItemId, limit: usize) -> Result<Vec<CatalogItem>> {
        let mut url = self.endpoint(&["recommend", item_id.as_str()])?;
        url.query_pairs_mut().append_pair("k", &limit.to_string());

        let response: RecommendResponse = self.get_json(url).await?;
        Ok(response.recommended)
    }

    async fn generate(&self, item_id: &ItemId) -> Result<String> {
        let url = self.endpoint(&["generate", item_id.as_str()])?;

        let response: GenerateResponse = self.get_json(url).await?;
        Ok(response.generated_description)
    }

    async fn analytics_summary(&self) -> Result<AnalyticsSummary> {
        let url = self.endpoint(&["analytics", "summary"])?;
        self.get_json(url).await
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Serve exactly one HTTP response and hand back the request line
    async fn serve_once(status_line: &'static str, body: &'static str) -> (CatalogClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            let request = String::from_utf8_lossy(&request).into_owned();
            request.lines().next().unwrap_or_default().to_string()
        });

        let config = ClientConfig::new(format!("http://{}", addr)).unwrap();
        (CatalogClient::new(config).unwrap(), handle)
    }

    #[tokio::test]
    async fn test_search() {
        let (client, server) = serve_once(
            "200 OK",
            r#"{"results": [{"uniq_id": "a1", "title": "Oak Chair", "price": "₹2,499", "categories": "Furniture,Chairs"}, {"uniq_id": "b2"}]}"#,
        )
        .await;

        let results = client.search("modern wooden chair", 12).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].display_title(), "Oak Chair");
        assert_eq!(results[1].id, ItemId::new("b2"));

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /search?"));
        assert!(request_line.contains("q=modern+wooden+chair"));
        assert!(request_line.contains("k=12"));
    }

    #[tokio::test]
    async fn test_recommend_encodes_item_id() {
        let (client, server) = serve_once("200 OK", r#"{"recommended": []}"#).await;

        let recommended = client.recommend(&ItemId::new("abc/1"), 6).await.unwrap();
        assert!(recommended.is_empty());

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /recommend/abc%2F1?k=6 "));
    }

    #[tokio::test]
    async fn test_generate() {
        let (client, server) = serve_once(
            "200 OK",
            r#"{"uniq_id": "a1", "generated_description": "A sturdy oak chair."}"#,
        )
        .await;

        let text = client.generate(&ItemId::new("a1")).await.unwrap();
        assert_eq!(text, "A sturdy oak chair.");
        assert!(server.await.unwrap().starts_with("GET /generate/a1 "));
    }

    #[tokio::test]
    async fn test_analytics_summary() {
        let (client, server) = serve_once(
            "200 OK",
            r#"{"category_counts": {"Chairs": 4, "Lamps": 2}, "price_stats": {"min": 99.0}}"#,
        )
        .await;

        let summary = client.analytics_summary().await.unwrap();
        assert_eq!(summary.category_counts.len(), 2);
        assert_eq!(summary.category_counts[0].label, "Chairs");
        assert!(summary.price_stats.is_some());
        assert!(server.await.unwrap().starts_with("GET /analytics/summary "));
    }

    #[tokio::test]
    async fn test_health_and_classify() {
        let (client, _server) =
            serve_once("200 OK", r#"{"status": "ok", "message": "Backend is healthy."}"#).await;
        assert!(client.health().await.unwrap().is_ok());

        let (client, server) = serve_once("200 OK", r#"{"predicted_category": "Lamps"}"#).await;
        assert_eq!(client.classify("https://img.example/1.jpg").await.unwrap(), "Lamps");
        assert!(server.await.unwrap().contains("image_url=https%3A%2F%2Fimg.example%2F1.jpg"));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let (client, _server) =
            serve_once("503 Service Unavailable", r#"{"detail": "FAISS store not initialized."}"#).await;

        let err = client.search("lamp", 12).await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Response {
                status: 503,
                status_text: "Service Unavailable".to_string()
            }
        );
        assert_eq!(err.to_string(), "503 Service Unavailable");
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_unregistered_status_code() {
        let (client, _server) = serve_once("599 Whatever", "{}").await;

        let err = client.analytics_summary().await.unwrap_err();
        assert_eq!(err.status(), Some(599));
        assert_eq!(err.to_string(), "599");
    }

    #[tokio::test]
    async fn test_malformed_payload() {
        let (client, _server) = serve_once("200 OK", "<html>not json</html>").await;
        let err = client.analytics_summary().await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = CatalogClient::new(ClientConfig::new(format!("http://{}", addr)).unwrap()).unwrap();
        let err = client.generate(&ItemId::new("a1")).await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = ClientConfig::new("http://localhost:8000/api/").unwrap();
        let client = CatalogClient::new(config).unwrap();
        let url = client.endpoint(&["analytics", "summary"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/analytics/summary");
    }
}
