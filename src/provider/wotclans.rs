//! wotclans.com.br clan and tank APIs.

use std::sync::Arc;

use serde::Deserialize;

use super::{FetchResponse, HttpFetch};
use crate::commands::definitions::{Choice, Platform, TankView};
use crate::error::ProviderError;
use crate::record::Scalar;

/// Clan statistics as returned by `/api/clan/{tag}`.
///
/// Absent fields decode as [`Scalar::Null`]; each report decides which of
/// them it cannot do without.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ClanStats {
    pub name: String,
    pub count: Scalar,
    pub active: Scalar,
    pub active_percent: Scalar,
    pub month_battles: Scalar,
    pub month_win_rate: Scalar,
    pub total_battles: Scalar,
    pub total_win_rate: Scalar,
    pub total_wn8: Scalar,
    pub total_avg_tier: Scalar,
    pub active_battles: Scalar,
    pub active_win_rate: Scalar,
    pub active_wn8: Scalar,
    pub active_avg_tier: Scalar,
    pub top15_battles: Scalar,
    pub top15_avg_tier: Scalar,
    pub players: Vec<ClanMember>,
}

/// One member entry in [`ClanStats::players`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ClanMember {
    pub name: String,
    pub month_battles: Scalar,
    pub total_wn8: Scalar,
    pub month_wn8: Scalar,
    pub total_tier: Scalar,
    pub month_tier: Scalar,
}

/// Reference values for one vehicle from `/api/tanks/{moe|wn8}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TankStats {
    pub name: String,
    pub type_name: Scalar,
    pub tier: Scalar,
    pub natio_name: Scalar,
    pub moe1_dmg: Scalar,
    pub moe2_dmg: Scalar,
    pub moe3_dmg: Scalar,
    pub damage: Scalar,
    pub win_rate: Scalar,
    pub frag: Scalar,
    pub spot: Scalar,
    pub def: Scalar,
}

#[derive(Debug, Deserialize)]
struct TanksResponse {
    #[serde(rename = "Tanks")]
    tanks: Vec<TankStats>,
}

/// Client for the per-platform wotclans.com.br sites.
#[derive(Clone)]
pub struct WotClansClient {
    fetcher: Arc<dyn HttpFetch>,
    xbox_url: String,
    ps_url: String,
}

impl WotClansClient {
    pub fn new(fetcher: Arc<dyn HttpFetch>, xbox_url: impl Into<String>, ps_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            xbox_url: xbox_url.into().trim_end_matches('/').to_string(),
            ps_url: ps_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn base(&self, platform: Platform) -> &str {
        match platform {
            Platform::Xbox => &self.xbox_url,
            Platform::PlayStation => &self.ps_url,
        }
    }

    /// URL of a clan's API resource. The tag is one percent-encoded path segment.
    pub fn clan_url(&self, platform: Platform, tag: &str) -> Result<String, ProviderError> {
        let base = self.base(platform);
        let invalid = |reason: String| ProviderError::Network {
            url: base.to_string(),
            reason,
        };

        let mut url = url::Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(["api", "clan", tag]);
        Ok(url.into())
    }

    pub async fn clan(&self, platform: Platform, tag: &str) -> Result<FetchResponse, ProviderError> {
        let url = self.clan_url(platform, tag)?;
        self.fetcher.get(&url, &[]).await
    }

    /// Searches vehicles by (partial) name.
    pub async fn tanks(
        &self,
        platform: Platform,
        view: TankView,
        name: &str,
    ) -> Result<FetchResponse, ProviderError> {
        let url = format!("{}/api/tanks/{}", self.base(platform), view.as_str());
        self.fetcher.get(&url, &[("tank", name)]).await
    }
}

/// Decodes a clan response body.
pub fn decode_clan(body: &str) -> Result<ClanStats, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Decode(e.to_string()))
}

/// Decodes a tanks response body into the matching vehicles.
pub fn decode_tanks(body: &str) -> Result<Vec<TankStats>, ProviderError> {
    serde_json::from_str::<TanksResponse>(body)
        .map(|response| response.tanks)
        .map_err(|e| ProviderError::Decode(e.to_string()))
}
