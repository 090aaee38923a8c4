//! Outbound requests to the provider endpoint

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::config::InsightConfig;
use crate::error::{InsightError, ProviderError};

/// Provider `function` parameter values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFunction {
    GlobalQuote,
    NewsSentiment,
    TimeSeriesDaily,
}

impl ProviderFunction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GlobalQuote => "GLOBAL_QUOTE",
            Self::NewsSentiment => "NEWS_SENTIMENT",
            Self::TimeSeriesDaily => "TIME_SERIES_DAILY",
        }
    }

    /// News takes `tickers`, everything else `symbol`
    pub fn symbol_param(self) -> &'static str {
        match self {
            Self::NewsSentiment => "tickers",
            Self::GlobalQuote | Self::TimeSeriesDaily => "symbol",
        }
    }
}

/// One provider request, minus credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderQuery {
    pub function: ProviderFunction,
    pub symbol: String,
    pub limit: Option<u32>,
}

impl ProviderQuery {
    pub fn new(function: ProviderFunction, symbol: impl Into<String>) -> Self {
        Self {
            function,
            symbol: symbol.into(),
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Query-string pairs, without the API key
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("function", self.function.as_str().to_string()),
            (self.function.symbol_param(), self.symbol.clone()),
        ];
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params
    }
}

/// Fetches the raw JSON body for a provider query
///
/// Implementations convert every failure into a [`ProviderError`]; payload
/// interpretation (error signals, field parsing) is left to the client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataTransport: Send + Sync {
    async fn fetch(&self, query: &ProviderQuery) -> Result<Value, ProviderError>;
}

/// HTTP GET transport over `reqwest`
pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &InsightConfig) -> crate::error::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| InsightError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl MarketDataTransport for HttpTransport {
    async fn fetch(&self, query: &ProviderQuery) -> Result<Value, ProviderError> {
        let mut params = query.params();
        if let Some(key) = &self.api_key {
            params.push(("apikey", key.clone()));
        }

        tracing::debug!(
            function = query.function.as_str(),
            symbol = %query.symbol,
            "provider request"
        );

        let response = self.client.get(&self.base_url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http(status.as_u16()));
        }

        Ok(response.json::<Value>().await?)
    }
}
