use crate::errors::{AppError, AppResult};
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Capability to download a bulletin page or API response.
///
/// Implementations return an error on network failure or a non-2xx status.
pub trait Fetch {
    /// Fetches `url` and returns the body as text.
    fn fetch(&self, url: &str, timeout: Duration) -> impl Future<Output = AppResult<String>> + Send;

    /// Fetches `url` asking for JSON and returns the parsed document.
    fn fetch_json(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl Future<Output = AppResult<serde_json::Value>> + Send;
}

/// [`Fetch`] implementation backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::NetworkError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    async fn get(&self, url: &str, timeout: Duration, accept: Option<&str>) -> AppResult<String> {
        let parsed = Url::parse(url)?;
        let mut request = self.client.get(parsed.as_str()).timeout(timeout);
        if let Some(accept) = accept {
            request = request.header(reqwest::header::ACCEPT, accept);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::NetworkError(format!("Failed to fetch {url}: {e}")))?;

        // Keep the status code in the message so callers can tell 4xx from 5xx
        let status = response.status();
        let response = response.error_for_status().map_err(|e| {
            AppError::NetworkError(format!("HTTP {}: Failed to fetch {url}: {e}", status.as_u16()))
        })?;

        let body = response.text().await?;
        debug!(url = url, bytes = body.len(), "Fetched document");
        Ok(body)
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> AppResult<String> {
        self.get(url, timeout, None).await
    }

    async fn fetch_json(&self, url: &str, timeout: Duration) -> AppResult<serde_json::Value> {
        let body = self.get(url, timeout, Some("application/json")).await?;
        serde_json::from_str(&body)
            .map_err(|e| AppError::ParseError(format!("Invalid JSON from {url}: {e}")))
    }
}
