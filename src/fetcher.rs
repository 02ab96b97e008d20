use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::error::ExtractError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// The injected fetch capability the extraction backends depend on.
///
/// Transport errors surface as [`ExtractError`]; callers above the trait
/// convert them into per-operation or per-item defaults.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a URL and returns the response body as text.
    async fn fetch_text(&self, url: &str) -> Result<String, ExtractError>;

    /// Fetches a URL and parses the response body as JSON.
    async fn fetch_json(&self, url: &str) -> Result<Value, ExtractError> {
        let body = self.fetch_text(url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// HTTP implementation of [`Fetcher`] backed by a reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Option<Duration>) -> Self {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, ExtractError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}
