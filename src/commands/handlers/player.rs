//! `player` handler (wotinfo.net).

use super::{provider_failure, report_failure, Responder};
use crate::commands::definitions::{PlayerView, TanksView};
use crate::commands::help;
use crate::commands::router::PlayerRequest;
use crate::error::{ExtractError, ProviderError};
use crate::provider::wotinfo::{self, PlayerPage, PlayerSummary};
use crate::provider::FetchResponse;
use crate::report::{self, Report};

/// Handle a `player` request.
pub async fn handle(responder: &Responder, request: &PlayerRequest) -> String {
    match build(responder, request).await {
        Ok(report) => report.render(),
        Err(reply) => reply,
    }
}

async fn build(responder: &Responder, request: &PlayerRequest) -> Result<Report, String> {
    let efficiency = responder
        .wotinfo
        .efficiency(request.platform, &request.name)
        .await
        .and_then(FetchResponse::ensure_ok)
        .map_err(|e| provider_failure(&e))?;

    let Some(view) = DetailView::of(request.view) else {
        return summary(request, &efficiency);
    };
    let page = view.page();

    let player_id = match wotinfo::parse_player_id(&efficiency.body) {
        Ok(Some(id)) => id,
        Ok(None) | Err(ProviderError::MissingNode(_)) => {
            tracing::info!(player = %request.name, "player not found on wotinfo");
            return Err(help::PLAYER_NOT_FOUND.to_string());
        }
        Err(e) => return Err(provider_failure(&e)),
    };

    let detail = responder
        .wotinfo
        .player_page(page, request.platform, &player_id)
        .await
        .and_then(FetchResponse::ensure_ok)
        .map_err(|e| {
            tracing::error!(error = %e, page = page.description(), "player page failed");
            help::player_detail_failure_text(page.description(), &responder.maintainer)
        })?;

    match view {
        DetailView::Recent => {
            let rows = wotinfo::parse_recent(&detail.body).map_err(|e| provider_failure(&e))?;
            report::player::recent(&request.name, &rows, &detail.url).map_err(|e| report_failure(&e))
        }
        DetailView::Trend => {
            let rows = wotinfo::parse_trend(&detail.body).map_err(|e| provider_failure(&e))?;
            report::player::trend(&request.name, &rows, &detail.url).map_err(|e| report_failure(&e))
        }
        DetailView::Vehicles(tanks) => {
            let vehicles = responder
                .extractor
                .extract(&detail.body)
                .map_err(|e| extract_failure(&e, &responder.maintainer))?;
            tracing::debug!(count = vehicles.len(), "vehicles extracted");
            report::player::tanks(&request.name, tanks, &vehicles, &detail.url)
                .map_err(|e| report_failure(&e))
        }
    }
}

/// Views that need a second page after the efficiency page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailView {
    Recent,
    Trend,
    Vehicles(TanksView),
}

impl DetailView {
    /// `None` for the summary, which is built from the efficiency page alone.
    fn of(view: PlayerView) -> Option<Self> {
        match view {
            PlayerView::Summary => None,
            PlayerView::Recent => Some(Self::Recent),
            PlayerView::Efficiency => Some(Self::Trend),
            PlayerView::Tanks(tanks) => Some(Self::Vehicles(tanks)),
        }
    }

    fn page(self) -> PlayerPage {
        match self {
            Self::Recent => PlayerPage::Recent,
            Self::Trend => PlayerPage::Trend,
            Self::Vehicles(_) => PlayerPage::Vehicles,
        }
    }
}

fn summary(request: &PlayerRequest, efficiency: &FetchResponse) -> Result<Report, String> {
    let vars = wotinfo::summary_vars(&efficiency.body).map_err(|e| provider_failure(&e))?;
    let stats = PlayerSummary::from_vars(vars).map_err(|e| report_failure(&e))?;
    report::player::summary(&request.name, &stats, &efficiency.url).map_err(|e| report_failure(&e))
}

fn extract_failure(err: &ExtractError, maintainer: &str) -> String {
    tracing::error!(error = %err, "vehicle chart extraction failed");
    match err {
        ExtractError::UnknownIcon(icon) => help::unknown_badge_text(icon, maintainer),
        _ => help::unreadable_vehicles_text(maintainer),
    }
}
