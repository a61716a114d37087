//! Error types for the bot.
//!
//! `BotError` covers failures that reach the processing loop. Provider,
//! extraction and report failures have their own enums because each of them
//! is turned into a user-facing reply rather than propagated.

use thiserror::Error;

/// Main error type for bot operations.
#[derive(Error, Debug)]
pub enum BotError {
    /// Configuration errors (invalid config file, missing credentials, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Inbound/outbound message transport errors (auth failed, reply rejected, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Stat provider errors that could not be turned into a reply.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "Configuration Error",
            Self::Transport(_) => "Transport Error",
            Self::Provider(_) => "Provider Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Failures while talking to a stat provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider answered with a non-200 status.
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The request never got an answer (DNS, timeout, refused connection).
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// The payload was not valid structured data.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// An expected element was absent from a provider page.
    #[error("missing element '{0}' in provider page")]
    MissingNode(String),
}

/// Failures while recovering vehicle rows from an embedded chart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The chart literal could not be scanned.
    #[error("malformed chart literal at offset {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// A row carried fewer entries than the projection needs.
    #[error("chart row {row} has {found} entries, expected at least {expected}")]
    FieldCount {
        row: usize,
        found: usize,
        expected: usize,
    },

    /// A mastery icon is not in the lookup table.
    #[error("unknown mastery icon '{0}'")]
    UnknownIcon(String),

    /// A row entry had the wrong shape for its column.
    #[error("chart row {row}, column {column}: {message}")]
    Decode {
        row: usize,
        column: usize,
        message: String,
    },
}

/// Failures while turning records into a report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The source document had the wrong number of fields.
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// The provider returned no records.
    #[error("empty result set")]
    Empty,

    /// The provider reported that nothing matched.
    #[error("not found")]
    NotFound,

    /// A record lacked a field the selected template needs.
    #[error("missing field '{0}'")]
    Schema(&'static str),
}

/// Result type alias using BotError.
pub type Result<T> = std::result::Result<T, BotError>;
