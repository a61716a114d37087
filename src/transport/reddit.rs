//! Reddit transport over the OAuth API.
//!
//! Authenticates as a script app with the password grant and keeps the
//! bearer token until shortly before it expires.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::{InboundItem, Transport};
use crate::config::RedditConfig;
use crate::error::{BotError, Result};

/// Token endpoint.
const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

/// Base URL for authenticated API calls.
const API_URL: &str = "https://oauth.reddit.com";

/// Tokens are renewed this long before Reddit says they expire.
const TOKEN_MARGIN: Duration = Duration::from_secs(60);

/// Items per inbox page, the most Reddit serves.
const PAGE_LIMIT: &str = "100";

/// Upper bound on inbox pages read in one cycle.
const MAX_UNREAD_PAGES: usize = 10;

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: u64,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<Thing>,
    /// Cursor for the next (older) page, absent on the last one.
    #[serde(default)]
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thing {
    data: MessageData,
}

#[derive(Debug, Deserialize)]
struct MessageData {
    name: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    subreddit: Option<String>,
    #[serde(default)]
    body: String,
}

/// Collects listing pages, newest first, into oldest-first inbound items.
#[derive(Debug, Default)]
struct UnreadPages {
    items: Vec<InboundItem>,
}

impl UnreadPages {
    /// Adds one page and returns the cursor of the next, if there is one.
    fn absorb(&mut self, listing: Listing) -> Option<String> {
        let ListingData { children, after } = listing.data;
        if children.is_empty() {
            return None;
        }
        self.items
            .extend(children.into_iter().map(|thing| InboundItem::from(thing.data)));
        after.filter(|cursor| !cursor.is_empty())
    }

    fn into_items(self) -> Vec<InboundItem> {
        let mut items = self.items;
        items.reverse();
        items
    }
}

impl From<MessageData> for InboundItem {
    fn from(data: MessageData) -> Self {
        Self {
            id: data.name,
            author: data.author.unwrap_or_else(|| "[deleted]".to_string()),
            subreddit: data.subreddit,
            body: data.body,
        }
    }
}

/// Reddit inbox and posting client.
pub struct RedditTransport {
    client: Client,
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
    token: Mutex<Option<AccessToken>>,
}

impl RedditTransport {
    /// Creates a transport; fails if any credential is missing.
    pub fn new(config: &RedditConfig, timeout_secs: u64) -> Result<Self> {
        let credentials = config.credentials()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| BotError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            client_id: credentials.client_id.to_string(),
            client_secret: credentials.client_secret.to_string(),
            username: credentials.username.to_string(),
            password: credentials.password.to_string(),
            token: Mutex::new(None),
        })
    }

    /// Returns a valid bearer token, requesting a new one if needed.
    async fn token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.expires_at > Instant::now()) {
            return Ok(token.value.clone());
        }

        debug!("requesting reddit access token");
        let response = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| BotError::transport(format!("Token request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(BotError::transport(
                "Authentication failed. Check the reddit client id and secret.",
            ));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| BotError::transport(format!("Failed to parse token response: {}", e)))?;

        let value = match (body.access_token, body.error) {
            (Some(token), None) => token,
            (_, Some(error)) => {
                return Err(BotError::transport(format!("Token request rejected: {}", error)))
            }
            (None, None) => return Err(BotError::transport("Token response had no token")),
        };

        let lifetime = Duration::from_secs(body.expires_in).saturating_sub(TOKEN_MARGIN);
        *cached = Some(AccessToken {
            value: value.clone(),
            expires_at: Instant::now() + lifetime,
        });
        info!(user = %self.username, "authenticated with reddit");

        Ok(value)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let token = self.token().await?;
        let response = self
            .client
            .get(format!("{API_URL}{path}"))
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| BotError::transport(format!("GET {} failed: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::transport(format!("GET {} returned {}", path, status)));
        }

        response
            .json()
            .await
            .map_err(|e| BotError::transport(format!("Failed to parse {} response: {}", path, e)))
    }

    async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> Result<Value> {
        let token = self.token().await?;
        let response = self
            .client
            .post(format!("{API_URL}{path}"))
            .bearer_auth(token)
            .form(form)
            .send()
            .await
            .map_err(|e| BotError::transport(format!("POST {} failed: {}", path, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BotError::transport(format!("Failed to read {} response: {}", path, e)))?;

        if !status.is_success() {
            return Err(BotError::transport(format!("POST {} returned {}: {}", path, status, body)));
        }

        let value: Value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)
                .map_err(|e| BotError::transport(format!("Failed to parse {} response: {}", path, e)))?
        };
        check_api_errors(path, &value)?;
        Ok(value)
    }
}

/// Fails if an `api_type=json` response lists errors.
fn check_api_errors(path: &str, value: &Value) -> Result<()> {
    match value.pointer("/json/errors").and_then(Value::as_array) {
        Some(errors) if !errors.is_empty() => Err(BotError::transport(format!(
            "{} rejected: {}",
            path,
            Value::Array(errors.clone())
        ))),
        _ => Ok(()),
    }
}

#[async_trait]
impl Transport for RedditTransport {
    async fn unread(&self) -> Result<Vec<InboundItem>> {
        let mut pages = UnreadPages::default();
        let mut after: Option<String> = None;

        for page in 0..MAX_UNREAD_PAGES {
            let mut query = vec![("limit", PAGE_LIMIT)];
            if let Some(cursor) = after.as_deref() {
                query.push(("after", cursor));
            }
            let listing: Listing = self.get_json("/message/unread", &query).await?;

            match pages.absorb(listing) {
                Some(next) => after = Some(next),
                None => break,
            }
            if page + 1 == MAX_UNREAD_PAGES {
                info!("unread inbox exceeds {MAX_UNREAD_PAGES} pages, rest left for the next cycle");
            }
        }

        Ok(pages.into_items())
    }

    async fn reply(&self, item: &InboundItem, text: &str) -> Result<()> {
        self.post_form(
            "/api/comment",
            &[("api_type", "json"), ("thing_id", item.id.as_str()), ("text", text)],
        )
        .await
        .map(|_| ())
    }

    async fn create_post(&self, title: &str, text: &str) -> Result<String> {
        // Self-posts go to the subreddit named after the bot account.
        let value = self
            .post_form(
                "/api/submit",
                &[
                    ("api_type", "json"),
                    ("kind", "self"),
                    ("sr", self.username.as_str()),
                    ("title", title),
                    ("text", text),
                    ("sendreplies", "false"),
                ],
            )
            .await?;

        value
            .pointer("/json/data/url")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| BotError::transport("Submit response had no post URL"))
    }

    async fn mark_consumed(&self, item: &InboundItem) -> Result<()> {
        self.post_form("/api/read_message", &[("id", item.id.as_str())])
            .await
            .map(|_| ())
    }
}
