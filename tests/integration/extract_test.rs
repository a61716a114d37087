//! Vehicle chart extraction against a full page.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use wotc_bot::commands::Responder;
use wotc_bot::config::{Config, UnknownIconPolicy};
use wotc_bot::extract::{normalize_literal, MasteryBadge, VehicleExtractor};
use wotc_bot::provider::MockFetcher;
use wotc_bot::record::Scalar;

use super::fixture;

const MIXED_ROW: &str = r#"data.addRow([7, "<img src='/img/rank_03.png'>", '', '<a href="/en/tank?id=9">Tiger (P)</a>', "", '<img src="/img/heavyTank.png">', {v: 0.5, f: '50.00%'}, 10, 20, 1800, {v: 0.02, f: "2.00%"}, {v: 1400, 'f': '1,400'}, {"v": 1550, "f": "1,550"}]);"#;

const JSON_ROW: &str = r#"data.addRow([7, "<img src='/img/rank_03.png'>", "", "<a href=\"/en/tank?id=9\">Tiger (P)</a>", "", "<img src=\"/img/heavyTank.png\">", {"v": 0.5, "f": "50.00%"}, 10, 20, 1800, {"v": 0.02, "f": "2.00%"}, {"v": 1400, "f": "1,400"}, {"v": 1550, "f": "1,550"}]);"#;

fn extractor() -> VehicleExtractor {
    VehicleExtractor::new(UnknownIconPolicy::Strict).unwrap()
}

#[test]
fn test_mixed_quotes_match_json() {
    let mixed = extractor().extract(MIXED_ROW).unwrap();
    let json = extractor().extract(JSON_ROW).unwrap();

    assert_eq!(mixed, json);
    assert_eq!(mixed[0].name, "Tiger (P)");
    assert_eq!(mixed[0].mastery, MasteryBadge::Third);
    assert_eq!(mixed[0].class, "heavyTank");
}

#[test]
fn test_normalization_is_idempotent() {
    let literal = r#"[7, '<a href="/x">Tiger</a>', {v: 0.5, f: '50.00%'}, "it's"]"#;

    let once = normalize_literal(literal).unwrap();
    let twice = normalize_literal(&once).unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_fixture_page() {
    let records = extractor().extract(&fixture("vehicles.html")).unwrap();

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["T-62A", "Pershing; \"Gold\"", "Hellcat", "It's a trap"]
    );

    let badges: Vec<&str> = records.iter().map(|r| r.mastery.label()).collect();
    assert_eq!(badges, vec!["M", "2", "", "1"]);

    assert_eq!(records[0].class, "mediumTank");
    assert_eq!(records[2].class, "AT-SPG");
    assert_eq!(records[2].avg_damage, Scalar::Float(1100.25));
    assert_eq!(records[3].battle_share, "0.50%");
}

#[test]
fn test_unknown_badge_depends_on_policy() {
    let page = fixture("vehicles.html").replace("rank_02.png", "rank_99.png");

    assert!(extractor().extract(&page).is_err());

    let tolerant = VehicleExtractor::new(UnknownIconPolicy::Tolerate).unwrap();
    let records = tolerant.extract(&page).unwrap();
    assert!(records[1].mastery.is_unknown());
}

fn player_responder(vehicles: String) -> Responder {
    let mock = MockFetcher::new()
        .with_response("http://wotinfo.net/en/efficiency", 200, fixture("efficiency.html"))
        .with_response("http://wotinfo.net/en/vehicles", 200, vehicles);
    Responder::new(&Config::default(), Arc::new(mock)).unwrap()
}

#[tokio::test]
async fn test_tanks_top_ordering() {
    let responder = player_responder(fixture("vehicles.html"));

    let reply = responder
        .route("/u/wotc_bot player xbox tanks top Some Player")
        .await
        .unwrap();

    assert!(reply.starts_with("##Name: some player"));
    let order: Vec<usize> = ["It's a trap", "T-62A", "Hellcat", "Pershing"]
        .iter()
        .map(|name| reply.find(name).unwrap())
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]), "{reply}");
    assert!(reply.ends_with("Source: http://wotinfo.net/en/vehicles?playerid=4417&server=xbox"));
}

#[tokio::test]
async fn test_tanks_efficiency_keeps_page_order() {
    let responder = player_responder(fixture("vehicles.html"));

    let reply = responder
        .route("/u/wotc_bot player xbox tanks efficiency someone")
        .await
        .unwrap();

    let first = reply.find("T-62A").unwrap();
    let last = reply.find("It's a trap").unwrap();
    assert!(first < last);
}

#[tokio::test]
async fn test_summary_from_fixture() {
    let responder = player_responder(String::new());

    let reply = responder
        .route("/u/wotc_bot player xbox summary someone")
        .await
        .unwrap();

    assert!(reply.contains("Eff|1,588"));
    assert!(reply.contains("WN8|1,911"));
}
