//! Stat provider access.
//!
//! Providers are reached through the [`HttpFetch`] trait so the handlers can
//! be exercised against canned pages. `wotinfo` covers player pages (HTML)
//! and `wotclans` the clan and tank JSON APIs.

mod document;
mod http;
mod mock;
pub mod wotclans;
pub mod wotinfo;

pub use document::{element_text, Document};
pub use http::ReqwestFetcher;
pub use mock::MockFetcher;
pub use wotclans::{ClanMember, ClanStats, TankStats, WotClansClient};
pub use wotinfo::{PlayerPage, PlayerSummary, RecentRow, TrendRow, WotInfoClient};

use async_trait::async_trait;

use crate::error::ProviderError;

/// Response to a GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body decoded as UTF-8 (lossy).
    pub body: String,
    /// Final URL including the query string; cited as the report source.
    pub url: String,
}

impl FetchResponse {
    /// Returns self if the status is 200, otherwise a status error.
    pub fn ensure_ok(self) -> Result<Self, ProviderError> {
        if self.status == 200 {
            Ok(self)
        } else {
            Err(ProviderError::Status {
                status: self.status,
                url: self.url,
            })
        }
    }
}

/// Trait defining the HTTP GET capability used by providers.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// Performs a GET with the given query parameters.
    ///
    /// Any response, whatever its status, is `Ok`; only transport failures are errors.
    async fn get(&self, url: &str, params: &[(&str, &str)]) -> Result<FetchResponse, ProviderError>;
}

/// Builds `url?k=v&...` the way the HTTP client would send it.
pub fn url_with_params(url: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    match url::Url::parse_with_params(url, params) {
        Ok(full) => full.to_string(),
        Err(_) => url.to_string(),
    }
}
