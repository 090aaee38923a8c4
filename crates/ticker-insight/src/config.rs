//! Configuration for the market data provider

use crate::error::{InsightError, Result};
use std::num::NonZeroU32;
use std::time::Duration;
use ticker_utils::{env_or, env_parse, env_var};

/// Public Alpha Vantage query endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Environment variable names read by [`InsightConfig::from_env`]
pub mod env {
    pub const BASE_URL: &str = "ALPHA_VANTAGE_BASE_URL";
    pub const API_KEY: &str = "ALPHA_VANTAGE_API_KEY";
    pub const TIMEOUT_SECS: &str = "ALPHA_VANTAGE_TIMEOUT_SECS";
    pub const REQUESTS_PER_MINUTE: &str = "ALPHA_VANTAGE_REQUESTS_PER_MINUTE";
    pub const NEWS_LIMIT: &str = "ALPHA_VANTAGE_NEWS_LIMIT";
}

/// Configuration for provider access
#[derive(Clone)]
pub struct InsightConfig {
    /// Provider endpoint URL
    pub base_url: String,

    /// Provider API key; requests go out without one when absent
    pub api_key: Option<String>,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Optional budget of outbound requests per minute
    pub requests_per_minute: Option<NonZeroU32>,

    /// `limit` sent with news requests
    pub news_limit: u32,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            request_timeout: Duration::from_secs(30),
            requests_per_minute: None,
            news_limit: 5,
        }
    }
}

// Hand-written so the key never reaches a log line.
impl std::fmt::Debug for InsightConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout", &self.request_timeout)
            .field("requests_per_minute", &self.requests_per_minute)
            .field("news_limit", &self.news_limit)
            .finish()
    }
}

impl InsightConfig {
    /// Create a new configuration builder
    pub fn builder() -> InsightConfigBuilder {
        InsightConfigBuilder::default()
    }

    /// Load configuration from the environment
    ///
    /// A missing API key is only a warning: startup proceeds and requests
    /// fail at call time.
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url).map_err(|e| {
            InsightError::Config(format!("invalid base URL {:?}: {e}", self.base_url))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(InsightError::Config(format!(
                "base URL must be http or https, got {}",
                url.scheme()
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(InsightError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.news_limit == 0 {
            return Err(InsightError::Config(
                "news_limit must be greater than 0".to_string(),
            ));
        }

        if self.api_key.is_none() {
            tracing::warn!(
                "{} not set; provider requests will fail until a key is configured",
                env::API_KEY
            );
        }

        Ok(())
    }
}

/// Builder for InsightConfig
#[derive(Debug, Default)]
pub struct InsightConfigBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    request_timeout: Option<Duration>,
    requests_per_minute: Option<NonZeroU32>,
    news_limit: Option<u32>,
}

impl InsightConfigBuilder {
    /// Set the provider endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Cap outbound requests per minute
    pub fn requests_per_minute(mut self, limit: NonZeroU32) -> Self {
        self.requests_per_minute = Some(limit);
        self
    }

    /// Set the news `limit` parameter
    pub fn news_limit(mut self, limit: u32) -> Self {
        self.news_limit = Some(limit);
        self
    }

    /// Fill unset fields from the environment
    pub fn with_env(mut self) -> Self {
        if self.base_url.is_none() {
            self.base_url = Some(env_or(env::BASE_URL, DEFAULT_BASE_URL));
        }
        if self.api_key.is_none() {
            self.api_key = env_var(env::API_KEY);
        }
        if self.request_timeout.is_none() {
            self.request_timeout = env_parse::<u64>(env::TIMEOUT_SECS).map(Duration::from_secs);
        }
        if self.requests_per_minute.is_none() {
            self.requests_per_minute = env_parse::<NonZeroU32>(env::REQUESTS_PER_MINUTE);
        }
        if self.news_limit.is_none() {
            self.news_limit = env_parse::<u32>(env::NEWS_LIMIT);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<InsightConfig> {
        let defaults = InsightConfig::default();

        let config = InsightConfig {
            base_url: self.base_url.unwrap_or(defaults.base_url),
            api_key: self.api_key,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            requests_per_minute: self.requests_per_minute,
            news_limit: self.news_limit.unwrap_or(defaults.news_limit),
        };

        config.validate()?;
        Ok(config)
    }
}
