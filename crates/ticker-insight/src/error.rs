//! Error types for the analysis pipeline

use std::fmt;
use thiserror::Error;

/// What the provider was asked for, used to phrase error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Quote,
    News,
    DailySeries,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Quote => "price",
            Self::News => "news",
            Self::DailySeries => "price history",
        };
        f.write_str(text)
    }
}

/// A failure talking to, or understanding, the market data provider
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// The provider answered with an `"Error Message"` payload
    #[error("API error: {0}")]
    Api(String),

    /// The provider answered with a rate-limit `"Note"` (or `"Information"`)
    #[error("rate limit reached: {0}")]
    RateLimited(String),

    /// Non-success HTTP status
    #[error("HTTP status {0}")]
    Http(u16),

    /// Network failure, timeout, or request construction error
    #[error("transport error: {0}")]
    Transport(String),

    /// The payload could not be decoded or a value could not be parsed
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The expected top-level payload key was absent
    #[error("response has no `{0}` section")]
    MissingPayload(&'static str),

    /// The payload was well-formed but held nothing usable
    #[error("no data returned")]
    NoData,
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Http(status.as_u16())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Pipeline errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InsightError {
    /// No ticker could be identified in the query
    #[error(
        "Could not identify a stock ticker from the query. Please specify a company name or ticker symbol."
    )]
    NotFound { query: String },

    /// The provider signalled an error or its response was unusable
    #[error("Error retrieving {resource} for {symbol}: {source}")]
    Provider {
        symbol: String,
        resource: Resource,
        #[source]
        source: ProviderError,
    },

    /// Not enough daily closes to compare two dates
    #[error("Insufficient data to calculate price change for {symbol} ({available} data points)")]
    Insufficient { symbol: String, available: usize },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl InsightError {
    pub fn provider(symbol: impl Into<String>, resource: Resource, source: ProviderError) -> Self {
        Self::Provider {
            symbol: symbol.into(),
            resource,
            source,
        }
    }

    /// The provider failure underneath, if this is one
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::Provider { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, InsightError>;
