//! `clan` handler (wotclans clan API).

use super::{provider_failure, report_failure, Responder};
use crate::commands::help;
use crate::commands::router::ClanRequest;
use crate::provider::wotclans;
use crate::report;

/// Handle a `clan` request.
pub async fn handle(responder: &Responder, request: &ClanRequest) -> String {
    let response = match responder.wotclans.clan(request.platform, &request.tag).await {
        Ok(response) if response.status == 200 => response,
        Ok(response) => {
            tracing::warn!(status = response.status, tag = %request.tag, "clan lookup failed");
            return help::clan_unavailable_text(&response.url);
        }
        Err(e) => return provider_failure(&e),
    };

    let clan = match wotclans::decode_clan(&response.body) {
        Ok(clan) => clan,
        Err(e) => {
            tracing::warn!(error = %e, tag = %request.tag, "clan payload is not JSON");
            return help::clan_decode_failure_text(&request.tag);
        }
    };

    match report::clan::render(request.view, &clan, &response.url) {
        Ok(report) => report.render(),
        Err(e) => report_failure(&e),
    }
}
