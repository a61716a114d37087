//! Clan reports end to end, from the wotclans payload to the reply text.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use wotc_bot::commands::Responder;
use wotc_bot::config::Config;
use wotc_bot::provider::MockFetcher;

use super::fixture;

const CLAN_URL: &str = "https://wotclans.com.br/api/clan/rddt";

fn responder() -> (Responder, Arc<MockFetcher>) {
    let mock = Arc::new(MockFetcher::new().with_response(CLAN_URL, 200, fixture("clan.json")));
    let responder = Responder::new(&Config::default(), mock.clone()).unwrap();
    (responder, mock)
}

async fn reply(text: &str) -> String {
    let (responder, _) = responder();
    responder.route(text).await.unwrap()
}

#[tokio::test]
async fn test_battles_report() {
    let text = reply("/u/wotc_bot clan xbox battles RDDT").await;

    assert!(text.starts_with("##Name: Reddit Tankers\n\n"));
    assert!(text.contains("Total win rate|51.230%"));
    assert!(text.contains("This month's win rate|49.87%"));
    assert!(text.contains("Total battles|912345"));
    assert!(text.ends_with(&format!("Source: {CLAN_URL}")));
}

#[tokio::test]
async fn test_summary_report() {
    let text = reply("/u/wotc_bot clan xbox summary rddt").await;

    assert!(text.contains("Total members|42"));
    assert!(text.contains("Total win rate|51.230%"));
}

#[tokio::test]
async fn test_active_lists_members_who_played() {
    let text = reply("/u/wotc_bot clan xbox active rddt").await;

    assert!(text.contains("###Active players"));
    assert!(text.contains("alpha|410\ncharlie|233"));
    assert!(!text.contains("bravo|"));
    assert!(!text.contains("delta|"));
}

#[tokio::test]
async fn test_top_orders_by_wn8() {
    let text = reply("/u/wotc_bot clan xbox top rddt").await;

    assert!(text.contains("alpha|2890\ncharlie|2100\nbravo|0\ndelta|"));
    assert!(text.contains("charlie|3105\nalpha|2450\nbravo|1320\ndelta|980"));
}

#[tokio::test]
async fn test_tier_alias() {
    let (responder, mock) = responder();

    let plural = responder.route("/u/wotc_bot clan xbox tiers rddt").await.unwrap();
    let singular = responder.route("/u/wotc_bot clan xbox tier rddt").await.unwrap();

    assert_eq!(plural, singular);
    assert!(plural.contains("Top 15 average tier|9.2"));
    assert_eq!(mock.call_count(), 2);
}

#[tokio::test]
async fn test_playstation_uses_its_own_host() {
    let mock = Arc::new(MockFetcher::new().with_response(
        "https://ps.wotclans.com.br/api/clan/rddt",
        200,
        fixture("clan.json"),
    ));
    let responder = Responder::new(&Config::default(), mock.clone()).unwrap();

    let text = responder.route("/u/wotc_bot clan ps summary rddt").await.unwrap();

    assert!(text.starts_with("##Name: Reddit Tankers"));
    assert_eq!(
        mock.calls(),
        vec!["https://ps.wotclans.com.br/api/clan/rddt".to_string()]
    );
}
