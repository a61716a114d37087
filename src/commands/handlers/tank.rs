//! `tank` handler (wotclans tanks API).

use super::{provider_failure, report_failure, Responder};
use crate::commands::help;
use crate::commands::router::TankRequest;
use crate::error::ReportError;
use crate::provider::wotclans;
use crate::report;

/// Handle a `tank` request.
pub async fn handle(responder: &Responder, request: &TankRequest) -> String {
    let response = match responder
        .wotclans
        .tanks(request.platform, request.view, &request.name)
        .await
    {
        Ok(response) if response.status == 200 => response,
        Ok(response) => {
            tracing::info!(status = response.status, tank = %request.name, "tank rejected by API");
            return help::TANK_NOT_FOUND.to_string();
        }
        Err(e) => return provider_failure(&e),
    };

    let tanks = match wotclans::decode_tanks(&response.body) {
        Ok(tanks) => tanks,
        Err(e) => return provider_failure(&e),
    };

    match report::tank::render(request.view, &tanks, &response.url) {
        Ok(report) => report.render(),
        Err(ReportError::NotFound) => help::TANK_NOT_FOUND.to_string(),
        Err(e) => report_failure(&e),
    }
}
