//! reqwest-backed HTTP fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{FetchResponse, HttpFetch};
use crate::config::ProviderConfig;
use crate::error::{BotError, ProviderError, Result};

/// Fetcher used against the real providers.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Creates a fetcher with the configured timeout and user agent.
    pub fn new(config: &ProviderConfig, user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| BotError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> std::result::Result<FetchResponse, ProviderError> {
        let network_error = |e: reqwest::Error| ProviderError::Network {
            url: url.to_string(),
            reason: if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            },
        };

        let response = self
            .client
            .get(url)
            .query(params)
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let bytes = response.bytes().await.map_err(network_error)?;

        tracing::debug!(status, url = %final_url, bytes = bytes.len(), "fetched");

        Ok(FetchResponse {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
            url: final_url,
        })
    }
}
