//! Request routing: malformed requests are answered without touching a provider.

use std::sync::Arc;

use wotc_bot::commands::help;
use wotc_bot::commands::{Command, CommandRouter, Responder};
use wotc_bot::config::Config;
use wotc_bot::provider::MockFetcher;

fn responder() -> (Responder, Arc<MockFetcher>) {
    let mock = Arc::new(MockFetcher::new());
    let responder = Responder::new(&Config::default(), mock.clone()).unwrap();
    (responder, mock)
}

#[tokio::test]
async fn test_malformed_requests_fetch_nothing() {
    let (responder, mock) = responder();

    let cases = [
        ("/u/wotc_bot player", help::MALFORMED_REQUEST.to_string()),
        ("/u/wotc_bot player xbox", help::MALFORMED_REQUEST.to_string()),
        ("/u/wotc_bot player xbox summary", help::MALFORMED_REQUEST.to_string()),
        ("/u/wotc_bot player pc summary someone", help::bad_platform_text()),
        ("/u/wotc_bot player xbox wins someone", help::bad_subcommand_text("wins")),
        ("/u/wotc_bot player xbox tanks", help::MALFORMED_REQUEST.to_string()),
        ("/u/wotc_bot player xbox tanks all someone", help::bad_subcommand_text("all")),
        ("/u/wotc_bot player xbox tanks top", help::MALFORMED_REQUEST.to_string()),
        ("/u/wotc_bot clan", help::MISSING_CLAN_NAME.to_string()),
        ("/u/wotc_bot clan xbox summary", help::MISSING_CLAN_NAME.to_string()),
        ("/u/wotc_bot clan switch summary rddt", help::bad_platform_text()),
        ("/u/wotc_bot tank", help::MISSING_TANK_NAME.to_string()),
        ("/u/wotc_bot tank xbox moe", help::MISSING_TANK_NAME.to_string()),
        ("/u/wotc_bot stats xbox me", help::invalid_verb_text("wotc_bot")),
    ];

    for (input, expected) in cases {
        let reply = responder.route(input).await;
        assert_eq!(reply.as_deref(), Some(expected.as_str()), "input: {input}");
    }

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_clan_view_lists_choices() {
    let (responder, mock) = responder();

    let reply = responder
        .route("/u/wotc_bot clan xbox members rddt")
        .await
        .unwrap();

    assert!(reply.starts_with("Invalid clan command."));
    assert!(reply.contains("summary, active, battles, players, tier, top"));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_help_names_the_mention_used() {
    let (responder, _) = responder();

    let reply = responder.route("/u/Tank_Helper").await.unwrap();

    assert!(reply.contains("`/u/tank_helper clan xbox summary RDDT`"));
}

#[test]
fn test_parse_is_case_insensitive() {
    assert_eq!(
        CommandRouter::parse("/U/WOTC_BOT CLAN XBOX SUMMARY RDDT"),
        CommandRouter::parse("/u/wotc_bot clan xbox summary rddt")
    );
    assert!(matches!(
        CommandRouter::parse("/u/wotc_bot tank ps4 moe T-62A"),
        Some(Command::Tank(_))
    ));
}

#[tokio::test]
async fn test_unaddressed_text_gets_no_reply() {
    let (responder, mock) = responder();

    assert_eq!(responder.route("gg wp").await, None);
    assert_eq!(responder.route("   ").await, None);
    assert_eq!(mock.call_count(), 0);
}
