//! Mock fetcher for testing.
//!
//! Serves canned responses keyed by URL prefix and records every request, so
//! tests can assert both on what was fetched and on nothing being fetched.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{url_with_params, FetchResponse, HttpFetch};
use crate::error::ProviderError;

/// A fetcher that returns predefined responses.
#[derive(Debug, Default)]
pub struct MockFetcher {
    routes: Vec<(String, u16, String)>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// Creates a mock with no routes; every request fails as unreachable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers requests whose full URL starts with `prefix`.
    ///
    /// Routes are tried in insertion order.
    pub fn with_response(mut self, prefix: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        self.routes.push((prefix.into(), status, body.into()));
        self
    }

    /// URLs requested so far, query strings included.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl HttpFetch for MockFetcher {
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<FetchResponse, ProviderError> {
        let full_url = url_with_params(url, params);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(full_url.clone());
        }

        self.routes
            .iter()
            .find(|(prefix, _, _)| full_url.starts_with(prefix.as_str()))
            .map(|(_, status, body)| FetchResponse {
                status: *status,
                body: body.clone(),
                url: full_url.clone(),
            })
            .ok_or_else(|| ProviderError::Network {
                url: full_url.clone(),
                reason: "no mock route".to_string(),
            })
    }
}
