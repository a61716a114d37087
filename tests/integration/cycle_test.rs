//! Full processing cycles over the in-memory inbox.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use wotc_bot::bot::{Bot, CycleStats};
use wotc_bot::commands::help;
use wotc_bot::config::Config;
use wotc_bot::provider::MockFetcher;
use wotc_bot::transport::{InboundItem, MemoryTransport};

use super::fixture;

fn clan_fetcher() -> Arc<MockFetcher> {
    Arc::new(MockFetcher::new().with_response(
        "https://wotclans.com.br/api/clan/rddt",
        200,
        fixture("clan.json"),
    ))
}

fn config_with_limit(max_reply_len: usize) -> Config {
    let mut config = Config::default();
    config.bot.max_reply_len = max_reply_len;
    config
}

#[tokio::test]
async fn test_oversize_report_becomes_post() {
    let transport = Arc::new(MemoryTransport::new().with_item(InboundItem::mention(
        "t1_big",
        "tanker",
        "WorldOfTanksConsole",
        "/u/wotc_bot clan xbox players rddt",
    )));
    let bot = Bot::new(&config_with_limit(100), transport.clone(), clan_fetcher()).unwrap();

    let stats = bot.run_cycle().await.unwrap();
    assert_eq!(stats.posted, 1);

    let posts = transport.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, "Response to tanker");
    assert!(posts[0].1.starts_with("##Name: Reddit Tankers"));
    assert!(posts[0].1.contains("charlie|3105|2100"));

    let replies = transport.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].0, "t1_big");
    let length = posts[0].1.chars().count();
    assert!(replies[0].1.contains(&format!("(Max: 100, Mine: {length})")));
    assert!(replies[0].1.ends_with("memory://posts/1"));

    assert_eq!(transport.consumed(), vec!["t1_big".to_string()]);
}

#[tokio::test]
async fn test_report_at_limit_is_replied() {
    let expected = help::help_text("wotc_bot");
    let limit = expected.chars().count();
    let transport = Arc::new(MemoryTransport::new().with_item(InboundItem::mention(
        "t1_help",
        "tanker",
        "wotc_bot",
        "/u/wotc_bot help",
    )));
    let bot = Bot::new(&config_with_limit(limit), transport.clone(), clan_fetcher()).unwrap();

    bot.run_cycle().await.unwrap();

    assert!(transport.posts().is_empty());
    assert_eq!(transport.replies(), vec![("t1_help".to_string(), expected)]);
}

#[tokio::test]
async fn test_out_of_scope_and_direct_messages_are_consumed_silently() {
    let fetcher = clan_fetcher();
    let transport = Arc::new(
        MemoryTransport::new()
            .with_item(InboundItem::mention(
                "t1_pics",
                "tanker",
                "pics",
                "/u/wotc_bot clan xbox summary rddt",
            ))
            .with_item(InboundItem::direct(
                "t4_dm",
                "tanker",
                "/u/wotc_bot clan xbox summary rddt",
            )),
    );
    let bot = Bot::new(&Config::default(), transport.clone(), fetcher.clone()).unwrap();

    let stats = bot.run_cycle().await.unwrap();

    assert_eq!(
        stats,
        CycleStats {
            seen: 2,
            skipped: 2,
            ..CycleStats::default()
        }
    );
    assert!(transport.replies().is_empty());
    assert_eq!(
        transport.consumed(),
        vec!["t1_pics".to_string(), "t4_dm".to_string()]
    );
    assert_eq!(fetcher.call_count(), 0);
}

#[tokio::test]
async fn test_failed_reply_does_not_stop_the_cycle() {
    let transport = Arc::new(
        MemoryTransport::new()
            .with_item(InboundItem::mention("t1_a", "first", "wotc_bot", "/u/wotc_bot clan xbox summary rddt"))
            .with_item(InboundItem::mention("t1_b", "second", "wotc_bot", "/u/wotc_bot clan xbox battles rddt"))
            .failing_replies_to("t1_a"),
    );
    let bot = Bot::new(&Config::default(), transport.clone(), clan_fetcher()).unwrap();

    let stats = bot.run_cycle().await.unwrap();

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.replied, 1);

    let replies = transport.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].0, "t1_b");
    assert!(replies[0].1.contains("51.230%"));

    assert_eq!(transport.consumed(), vec!["t1_a".to_string(), "t1_b".to_string()]);
}

#[tokio::test]
async fn test_second_cycle_sees_nothing() {
    let transport = Arc::new(MemoryTransport::new().with_item(InboundItem::mention(
        "t1_once",
        "tanker",
        "wotc_bot",
        "good bot",
    )));
    let bot = Bot::new(&Config::default(), transport.clone(), clan_fetcher()).unwrap();

    let first = bot.run_cycle().await.unwrap();
    let second = bot.run_cycle().await.unwrap();

    assert_eq!(first.replied, 1);
    assert_eq!(second, CycleStats::default());
    assert_eq!(transport.replies()[0].1, help::THANK_YOU_TEXT);
}
