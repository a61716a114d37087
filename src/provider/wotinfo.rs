//! wotinfo.net player pages.
//!
//! The site has no API. A player is looked up through the efficiency page,
//! which also links to the player's other pages with a `playerid` query
//! parameter. Parsing is kept separate from fetching so the parsers can be
//! run against saved pages.

use std::sync::Arc;

use super::document::{element_text, selector, Document};
use super::{FetchResponse, HttpFetch};
use crate::commands::definitions::Platform;
use crate::error::{ProviderError, ReportError};

/// Number of `<var>` nodes on a valid efficiency page (three label/value pairs).
pub const SUMMARY_VARS: usize = 6;

/// Per-player pages reachable once the player id is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPage {
    Vehicles,
    Recent,
    Trend,
}

impl PlayerPage {
    fn path(&self) -> &'static str {
        match self {
            Self::Vehicles => "vehicles",
            Self::Recent => "recent",
            Self::Trend => "trend",
        }
    }

    /// What the page holds, for error replies.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Vehicles => "vehicle statistics",
            Self::Recent => "recent statistics",
            Self::Trend => "efficiency trend",
        }
    }
}

/// Client for wotinfo.net.
#[derive(Clone)]
pub struct WotInfoClient {
    fetcher: Arc<dyn HttpFetch>,
    base_url: String,
}

impl WotInfoClient {
    pub fn new(fetcher: Arc<dyn HttpFetch>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the efficiency page for a player name.
    pub async fn efficiency(&self, platform: Platform, name: &str) -> Result<FetchResponse, ProviderError> {
        let url = format!("{}/efficiency", self.base_url);
        self.fetcher
            .get(
                &url,
                &[("server", platform.wotinfo_server()), ("playername", name)],
            )
            .await
    }

    /// Fetches one of a player's pages by id.
    pub async fn player_page(
        &self,
        page: PlayerPage,
        platform: Platform,
        player_id: &str,
    ) -> Result<FetchResponse, ProviderError> {
        let url = format!("{}/{}", self.base_url, page.path());
        self.fetcher
            .get(
                &url,
                &[("playerid", player_id), ("server", platform.wotinfo_server())],
            )
            .await
    }
}

/// Career averages from the efficiency page, as (label, value) pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSummary {
    pub stats: Vec<(String, String)>,
}

impl PlayerSummary {
    /// Pairs up `<var>` texts; anything but [`SUMMARY_VARS`] of them is a field-count error.
    pub fn from_vars(vars: Vec<String>) -> Result<Self, ReportError> {
        if vars.len() != SUMMARY_VARS {
            return Err(ReportError::FieldCount {
                expected: SUMMARY_VARS,
                found: vars.len(),
            });
        }

        let mut iter = vars.into_iter();
        let mut stats = Vec::with_capacity(SUMMARY_VARS / 2);
        while let (Some(label), Some(value)) = (iter.next(), iter.next()) {
            stats.push((label, value));
        }
        Ok(Self { stats })
    }

    /// Value for a label such as `WN8`.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.stats
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// Text of every `<var>` node on the efficiency page.
pub fn summary_vars(body: &str) -> Result<Vec<String>, ProviderError> {
    Document::parse(body).texts("var")
}

/// Player id from the active menu link, `None` if the link carries none.
///
/// A page without the menu link at all is a [`ProviderError::MissingNode`].
pub fn parse_player_id(body: &str) -> Result<Option<String>, ProviderError> {
    let href = Document::parse(body).first_attr("li.activemenu a", "href")?;
    let query = href
        .split_once('?')
        .map(|(_, q)| q.split('#').next().unwrap_or(q))
        .unwrap_or("");

    Ok(url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "playerid")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty()))
}

/// One statistic over the week, month and lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentRow {
    pub title: String,
    pub week: String,
    pub month: String,
    pub overall: String,
}

fn first_word(text: &str) -> String {
    text.split_whitespace().next().unwrap_or_default().to_string()
}

/// Parses the recent page.
///
/// Week and month values alternate in the `my_plan1` cells; lifetime values
/// are the `my_plan2` cells; the row titles are the `my_feature` cells.
/// Rows stop at the shortest of the four columns.
pub fn parse_recent(body: &str) -> Result<Vec<RecentRow>, ProviderError> {
    let doc = Document::parse(body);

    let titles: Vec<String> = doc
        .select("div.col-xs-12.col-sm-3.my_feature")?
        .into_iter()
        .map(|el| {
            el.text()
                .map(str::trim)
                .find(|t| !t.is_empty())
                .unwrap_or_default()
                .to_string()
        })
        .collect();

    let (mut week, mut month) = (Vec::new(), Vec::new());
    for (i, el) in doc
        .select("div.col-xs-4.col-sm-4.my_plan1")?
        .into_iter()
        .enumerate()
    {
        let value = first_word(&element_text(el));
        if i % 2 == 0 {
            week.push(value);
        } else {
            month.push(value);
        }
    }

    let overall: Vec<String> = doc
        .select("div.col-xs-4.col-sm-4.my_plan2")?
        .into_iter()
        .map(|el| first_word(&element_text(el)))
        .collect();

    Ok(titles
        .into_iter()
        .zip(week)
        .zip(month)
        .zip(overall)
        .map(|(((title, week), month), overall)| RecentRow {
            title,
            week,
            month,
            overall,
        })
        .collect())
}

/// One period on the efficiency trend page: from, to, efficiency, WN7, WN8, battles, wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendRow {
    pub cells: Vec<String>,
}

/// Parses the trend page, one row per `ul.event-list`.
///
/// Cell count is not checked here; the formatter rejects short rows.
pub fn parse_trend(body: &str) -> Result<Vec<TrendRow>, ProviderError> {
    let doc = Document::parse(body);
    let li = selector("li")?;
    let time = selector("time")?;
    let progress = selector("div.progress")?;
    let div = selector("div")?;
    let ul = selector("ul")?;

    let mut rows = Vec::new();
    for event in doc.select("ul.event-list")? {
        let mut cells = Vec::new();
        let first_item = event.select(&li).next();

        if let Some(item) = first_item {
            for stamp in item.select(&time) {
                // "From 12.01.2017" → "12.01.2017"
                let words: Vec<_> = element_text(stamp)
                    .split_whitespace()
                    .skip(1)
                    .map(str::to_string)
                    .collect();
                cells.push(words.join(" "));
            }
        }

        cells.extend(event.select(&progress).map(element_text));

        let counters = first_item
            .and_then(|item| item.select(&div).next())
            .and_then(|d| d.select(&ul).next());
        if let Some(counters) = counters {
            cells.extend(
                counters
                    .select(&li)
                    .take(2)
                    .map(|el| first_word(&element_text(el))),
            );
        }

        rows.push(TrendRow { cells });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_pairs() {
        let vars = ["Eff", "1500", "WN7", "1400", "WN8", "1650"]
            .map(str::to_string)
            .to_vec();
        let summary = PlayerSummary::from_vars(vars).unwrap();
        assert_eq!(summary.get("WN8"), Some("1650"));
        assert_eq!(summary.get("Eff"), Some("1500"));
        assert_eq!(summary.get("XVM"), None);
    }

    #[test]
    fn test_summary_wrong_count() {
        let err = PlayerSummary::from_vars(vec!["Eff".to_string()]).unwrap_err();
        assert_eq!(
            err,
            ReportError::FieldCount {
                expected: 6,
                found: 1
            }
        );
    }

    #[test]
    fn test_player_id() {
        let page = r#"<li class="activemenu"><a href="/en/efficiency?server=xbox&playerid=1234#top">x</a></li>"#;
        assert_eq!(parse_player_id(page).unwrap(), Some("1234".to_string()));

        let page = r#"<li class="activemenu"><a href="/en/efficiency?server=xbox">x</a></li>"#;
        assert_eq!(parse_player_id(page).unwrap(), None);

        assert!(matches!(
            parse_player_id("<p>nothing</p>"),
            Err(ProviderError::MissingNode(_))
        ));
    }

    #[test]
    fn test_recent() {
        let page = r#"
            <div class="col-xs-12 col-sm-3 my_feature"> Battles <small>count</small></div>
            <div class="col-xs-12 col-sm-3 my_feature">Win rate</div>
            <div class="col-xs-4 col-sm-4 my_plan1">120 battles</div>
            <div class="col-xs-4 col-sm-4 my_plan1">480 battles</div>
            <div class="col-xs-4 col-sm-4 my_plan1">55.1%</div>
            <div class="col-xs-4 col-sm-4 my_plan1">53.0%</div>
            <div class="col-xs-4 col-sm-4 my_plan2">9000</div>
            <div class="col-xs-4 col-sm-4 my_plan2">51.2%</div>
        "#;
        let rows = parse_recent(page).unwrap();
        assert_eq!(
            rows,
            vec![
                RecentRow {
                    title: "Battles".to_string(),
                    week: "120".to_string(),
                    month: "480".to_string(),
                    overall: "9000".to_string(),
                },
                RecentRow {
                    title: "Win rate".to_string(),
                    week: "55.1%".to_string(),
                    month: "53.0%".to_string(),
                    overall: "51.2%".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_trend() {
        let page = r#"
            <ul class="event-list">
              <li>
                <time>From 01.02.2017</time><time>To 01.03.2017</time>
                <div class="info"><ul><li>310 battles</li><li>170 wins</li><li>ignored</li></ul></div>
              </li>
              <div class="progress"> 1450 </div>
              <div class="progress">1300</div>
              <div class="progress">1620</div>
            </ul>
        "#;
        let rows = parse_trend(page).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].cells,
            vec!["01.02.2017", "01.03.2017", "1450", "1300", "1620", "310", "170"]
        );
    }
}
