//! Configuration management for the bot.
//!
//! Handles loading configuration from TOML files and environment variables.
//! A default file can be generated with `wotc-bot --generate <path>`.

use crate::error::{BotError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Bot identity and scope.
    #[serde(default)]
    pub bot: BotConfig,

    /// Reddit API credentials.
    #[serde(default)]
    pub reddit: RedditConfig,

    /// Stat provider endpoints.
    #[serde(default)]
    pub providers: ProviderConfig,

    /// Chart extraction behavior.
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Log file settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Bot identity and scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Account name the bot answers to.
    #[serde(default = "default_bot_name")]
    pub name: String,

    /// Subreddits whose mentions are answered. Compared case-insensitively.
    #[serde(default = "default_subreddits")]
    pub subreddits: Vec<String>,

    /// Longest reply the transport accepts; longer reports become a self-post.
    #[serde(default = "default_max_reply_len")]
    pub max_reply_len: usize,

    /// Account tagged when a provider misbehaves after the player was found.
    #[serde(default = "default_maintainer")]
    pub maintainer: String,
}

fn default_bot_name() -> String {
    "wotc_bot".to_string()
}

fn default_subreddits() -> Vec<String> {
    vec!["worldoftanksconsole".to_string(), "wotc_bot".to_string()]
}

fn default_max_reply_len() -> usize {
    10_000
}

fn default_maintainer() -> String {
    "KamikazeRusher".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            subreddits: default_subreddits(),
            max_reply_len: default_max_reply_len(),
            maintainer: default_maintainer(),
        }
    }
}

/// Reddit script-app credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditConfig {
    /// OAuth client id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// OAuth client secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Bot account username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Bot account password (prefer REDDIT_PASSWORD over storing it here).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// User agent sent with every API call.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("wotc-bot/{} (by /u/KamikazeRusher)", env!("CARGO_PKG_VERSION"))
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            username: None,
            password: None,
            user_agent: default_user_agent(),
        }
    }
}

impl RedditConfig {
    /// Applies environment variables (REDDIT_CLIENT_ID, etc.) as defaults.
    pub fn apply_env_defaults(&mut self) {
        if self.client_id.is_none() {
            self.client_id = std::env::var("REDDIT_CLIENT_ID").ok();
        }
        if self.client_secret.is_none() {
            self.client_secret = std::env::var("REDDIT_CLIENT_SECRET").ok();
        }
        if self.username.is_none() {
            self.username = std::env::var("REDDIT_USERNAME").ok();
        }
        if self.password.is_none() {
            self.password = std::env::var("REDDIT_PASSWORD").ok();
        }
    }

    /// Returns every credential, or a config error naming the first one missing.
    pub fn credentials(&self) -> Result<RedditCredentials<'_>> {
        fn require<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str> {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .ok_or_else(|| BotError::config(format!("missing reddit.{key}")))
        }

        Ok(RedditCredentials {
            client_id: require(&self.client_id, "client_id")?,
            client_secret: require(&self.client_secret, "client_secret")?,
            username: require(&self.username, "username")?,
            password: require(&self.password, "password")?,
        })
    }
}

/// Borrowed, validated Reddit credentials.
#[derive(Debug, Clone, Copy)]
pub struct RedditCredentials<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

/// Stat provider endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// wotinfo.net base URL (player pages).
    #[serde(default = "default_wotinfo_url")]
    pub wotinfo_url: String,

    /// wotclans base URL for Xbox.
    #[serde(default = "default_wotclans_xbox_url")]
    pub wotclans_xbox_url: String,

    /// wotclans base URL for PlayStation.
    #[serde(default = "default_wotclans_ps_url")]
    pub wotclans_ps_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_wotinfo_url() -> String {
    "http://wotinfo.net/en".to_string()
}

fn default_wotclans_xbox_url() -> String {
    "https://wotclans.com.br".to_string()
}

fn default_wotclans_ps_url() -> String {
    "https://ps.wotclans.com.br".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            wotinfo_url: default_wotinfo_url(),
            wotclans_xbox_url: default_wotclans_xbox_url(),
            wotclans_ps_url: default_wotclans_ps_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// What to do with a mastery icon missing from the lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownIconPolicy {
    /// Fail the request with an apology.
    #[default]
    Strict,
    /// Render the badge as `?` and keep going.
    Tolerate,
}

/// Chart extraction behavior.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExtractorConfig {
    /// Policy for unrecognized mastery icons.
    #[serde(default)]
    pub unknown_icons: UnknownIconPolicy,
}

/// Log file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log file location. Relative paths resolve against the working directory.
    #[serde(default = "default_log_path")]
    pub path: PathBuf,

    /// Size at which the log is rotated on startup.
    #[serde(default = "default_log_max_bytes")]
    pub max_bytes: u64,

    /// Number of rotated files kept.
    #[serde(default = "default_log_backups")]
    pub backups: u32,
}

fn default_log_path() -> PathBuf {
    PathBuf::from("bot.log")
}

fn default_log_max_bytes() -> u64 {
    256_000
}

fn default_log_backups() -> u32 {
    7
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
            max_bytes: default_log_max_bytes(),
            backups: default_log_backups(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wotc-bot")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| BotError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            BotError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Writes a config file populated with defaults.
    pub fn write_default(path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(&Self::default())
            .map_err(|e| BotError::internal(format!("Failed to serialize config: {e}")))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| BotError::config(format!("Failed to create {}: {e}", parent.display())))?;
        }

        std::fs::write(path, content)
            .map_err(|e| BotError::config(format!("Failed to write {}: {e}", path.display())))
    }
}
