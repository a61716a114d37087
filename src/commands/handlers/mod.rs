//! Command handlers.
//!
//! Each handler takes a validated request, fetches what it needs through the
//! provider clients and returns the reply text. Every failure is turned into
//! a reply here, so nothing a provider does can stop the processing loop.

pub mod clan;
pub mod player;
pub mod system;
pub mod tank;

use std::sync::Arc;

use super::help;
use super::router::{Command, CommandRouter};
use crate::config::Config;
use crate::error::{BotError, ProviderError, ReportError, Result};
use crate::extract::VehicleExtractor;
use crate::provider::{HttpFetch, WotClansClient, WotInfoClient};

/// Turns inbound text into reply text.
pub struct Responder {
    wotinfo: WotInfoClient,
    wotclans: WotClansClient,
    extractor: VehicleExtractor,
    maintainer: String,
}

impl Responder {
    /// Builds the provider clients on top of a shared fetcher.
    pub fn new(config: &Config, fetcher: Arc<dyn HttpFetch>) -> Result<Self> {
        let extractor = VehicleExtractor::new(config.extractor.unknown_icons)
            .map_err(|e| BotError::internal(format!("Failed to build chart extractor: {e}")))?;

        Ok(Self {
            wotinfo: WotInfoClient::new(fetcher.clone(), config.providers.wotinfo_url.clone()),
            wotclans: WotClansClient::new(
                fetcher,
                config.providers.wotclans_xbox_url.clone(),
                config.providers.wotclans_ps_url.clone(),
            ),
            extractor,
            maintainer: config.bot.maintainer.clone(),
        })
    }

    /// Reply for a message body, or `None` if the message is not a request.
    pub async fn route(&self, text: &str) -> Option<String> {
        let command = CommandRouter::parse(text)?;
        Some(self.respond(command).await)
    }

    /// Executes a parsed command.
    pub async fn respond(&self, command: Command) -> String {
        match command {
            Command::Help { mention } => system::handle_help(&mention),
            Command::Courtesy => system::handle_courtesy(),
            Command::InvalidVerb { origin } => system::handle_invalid_verb(&origin),
            Command::Rejected(reply) => reply,
            Command::Player(request) => player::handle(self, &request).await,
            Command::Clan(request) => clan::handle(self, &request).await,
            Command::Tank(request) => tank::handle(self, &request).await,
        }
    }
}

/// Reply for a provider failure with no more specific message.
fn provider_failure(err: &ProviderError) -> String {
    tracing::warn!(error = %err, "provider request failed");
    match err {
        ProviderError::Status { status, .. } => help::provider_status_text(*status),
        ProviderError::Network { url, .. } => help::provider_unreachable_text(url),
        ProviderError::Decode(_) | ProviderError::MissingNode(_) => {
            help::UNEXPECTED_RESPONSE.to_string()
        }
    }
}

/// Reply for a formatter failure.
fn report_failure(err: &ReportError) -> String {
    tracing::warn!(error = %err, "report could not be built");
    match err {
        ReportError::FieldCount { .. } => help::UNEXPECTED_RESPONSE.to_string(),
        ReportError::Empty => help::EMPTY_RESULT.to_string(),
        ReportError::NotFound => help::NOT_FOUND_RESULT.to_string(),
        ReportError::Schema(field) => help::missing_field_text(field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockFetcher;

    fn responder(mock: Arc<MockFetcher>) -> Responder {
        Responder::new(&Config::default(), mock).unwrap()
    }

    #[tokio::test]
    async fn test_route_ignores_unaddressed_text() {
        let mock = Arc::new(MockFetcher::new());
        let responder = responder(mock.clone());

        assert_eq!(responder.route("nice shot").await, None);
        assert_eq!(responder.route("").await, None);
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_route_help_and_courtesy() {
        let mock = Arc::new(MockFetcher::new());
        let responder = responder(mock.clone());

        let help = responder.route("/u/wotc_bot").await.unwrap();
        assert!(help.contains("`/u/wotc_bot clan xbox summary RDDT`"));

        let thanks = responder.route("good bot").await.unwrap();
        assert_eq!(thanks, help::THANK_YOU_TEXT);

        assert_eq!(mock.call_count(), 0);
    }

    #[test]
    fn test_provider_failure_messages() {
        assert_eq!(
            provider_failure(&ProviderError::Status {
                status: 503,
                url: "u".to_string()
            }),
            help::provider_status_text(503)
        );
        assert_eq!(
            provider_failure(&ProviderError::Decode("eof".to_string())),
            help::UNEXPECTED_RESPONSE
        );
    }

    #[test]
    fn test_report_failure_messages() {
        assert_eq!(
            report_failure(&ReportError::Schema("TotalWn8")),
            help::missing_field_text("TotalWn8")
        );
        assert_eq!(report_failure(&ReportError::Empty), help::EMPTY_RESULT);
    }

    #[test]
    fn test_report_failure_tells_empty_from_not_found() {
        let empty = report_failure(&ReportError::Empty);
        let not_found = report_failure(&ReportError::NotFound);

        assert_ne!(empty, not_found);
        assert_eq!(not_found, help::NOT_FOUND_RESULT);
    }
}
