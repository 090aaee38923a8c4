//! Alpha Vantage client
//!
//! Issues one request per operation and normalizes the response. Every
//! payload is checked for the provider's error and rate-limit signals before
//! anything else is read, and every parse failure becomes a
//! [`ProviderError`].

use chrono::NaiveDate;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::instrument;

use super::transport::{HttpTransport, MarketDataTransport, ProviderFunction, ProviderQuery};
use crate::config::InsightConfig;
use crate::error::{InsightError, ProviderError, Resource, Result};
use crate::models::{DailyBar, DailySeries, NewsArticle, NewsDigest, Quote};
use crate::sentiment::MAX_ARTICLES;

const ERROR_KEY: &str = "Error Message";
const NOTE_KEY: &str = "Note";
const INFORMATION_KEY: &str = "Information";

const QUOTE_KEY: &str = "Global Quote";
const FEED_KEY: &str = "feed";
const DAILY_KEY: &str = "Time Series (Daily)";

/// Summaries are cut to this many characters before `"..."` is appended
pub const SUMMARY_CHARS: usize = 200;

/// Alpha Vantage API client
#[derive(Clone)]
pub struct AlphaVantageClient {
    transport: Arc<dyn MarketDataTransport>,
    rate_limiter: Option<Arc<DefaultDirectRateLimiter>>,
    news_limit: u32,
}

impl AlphaVantageClient {
    /// Client over HTTP, configured from `config`
    pub fn new(config: &InsightConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Client over any transport
    pub fn with_transport(transport: Arc<dyn MarketDataTransport>, config: &InsightConfig) -> Self {
        let rate_limiter = config
            .requests_per_minute
            .map(|limit| Arc::new(RateLimiter::direct(Quota::per_minute(limit))));

        Self {
            transport,
            rate_limiter,
            news_limit: config.news_limit,
        }
    }

    async fn request(&self, query: &ProviderQuery) -> std::result::Result<Value, ProviderError> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let payload = self.transport.fetch(query).await?;
        check_signals(&payload)?;
        Ok(payload)
    }

    /// Current quote
    #[instrument(skip(self))]
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let query = ProviderQuery::new(ProviderFunction::GlobalQuote, symbol);
        self.request(&query)
            .await
            .and_then(|payload| parse_quote(symbol, &payload))
            .map_err(|source| {
                tracing::warn!(%source, "quote request failed");
                InsightError::provider(symbol, Resource::Quote, source)
            })
    }

    /// Latest news, keeping the first three articles
    #[instrument(skip(self))]
    pub async fn get_news(&self, symbol: &str) -> Result<NewsDigest> {
        let query = ProviderQuery::new(ProviderFunction::NewsSentiment, symbol)
            .with_limit(self.news_limit);
        self.request(&query)
            .await
            .and_then(|payload| parse_news(symbol, &payload))
            .map_err(|source| {
                tracing::warn!(%source, "news request failed");
                InsightError::provider(symbol, Resource::News, source)
            })
    }

    /// Daily OHLC series
    #[instrument(skip(self))]
    pub async fn get_daily_series(&self, symbol: &str) -> Result<DailySeries> {
        let query = ProviderQuery::new(ProviderFunction::TimeSeriesDaily, symbol);
        self.request(&query)
            .await
            .and_then(|payload| parse_daily_series(symbol, &payload))
            .map_err(|source| {
                tracing::warn!(%source, "daily series request failed");
                InsightError::provider(symbol, Resource::DailySeries, source)
            })
    }
}

/// Reject payloads carrying the provider's error or rate-limit keys
fn check_signals(payload: &Value) -> std::result::Result<(), ProviderError> {
    if !payload.is_object() {
        return Err(ProviderError::Malformed(
            "expected a JSON object at the top level".to_string(),
        ));
    }

    if let Some(message) = payload.get(ERROR_KEY) {
        return Err(ProviderError::Api(signal_text(message)));
    }

    for key in [NOTE_KEY, INFORMATION_KEY] {
        if let Some(note) = payload.get(key) {
            return Err(ProviderError::RateLimited(signal_text(note)));
        }
    }

    Ok(())
}

fn signal_text(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), str::to_string)
}

fn section<'a>(
    payload: &'a Value,
    key: &'static str,
) -> std::result::Result<&'a Value, ProviderError> {
    payload.get(key).ok_or(ProviderError::MissingPayload(key))
}

fn object<'a>(
    value: &'a Value,
    what: &str,
) -> std::result::Result<&'a Map<String, Value>, ProviderError> {
    value
        .as_object()
        .ok_or_else(|| ProviderError::Malformed(format!("{what} is not an object")))
}

/// Numeric field; the provider sends numbers as strings
fn number(fields: &Map<String, Value>, key: &str) -> std::result::Result<f64, ProviderError> {
    match fields.get(key) {
        Some(Value::String(raw)) => raw
            .trim()
            .parse()
            .map_err(|_| ProviderError::Malformed(format!("`{key}` is not a number: {raw:?}"))),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| ProviderError::Malformed(format!("`{key}` is out of range"))),
        Some(other) => Err(ProviderError::Malformed(format!(
            "`{key}` has unexpected value {other}"
        ))),
        None => Err(ProviderError::Malformed(format!("missing field `{key}`"))),
    }
}

fn text_or(fields: Option<&Map<String, Value>>, key: &str, default: &str) -> String {
    fields
        .and_then(|f| f.get(key))
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

pub(crate) fn parse_quote(
    symbol: &str,
    payload: &Value,
) -> std::result::Result<Quote, ProviderError> {
    let fields = object(section(payload, QUOTE_KEY)?, QUOTE_KEY)?;
    // Unknown symbols come back as an empty quote object.
    if fields.is_empty() {
        return Err(ProviderError::NoData);
    }

    Ok(Quote {
        symbol: symbol.to_string(),
        current_price: number(fields, "05. price")?,
        previous_close: number(fields, "08. previous close")?,
        change: number(fields, "09. change")?,
        change_percent: text_or(Some(fields), "10. change percent", "0%"),
        last_updated: text_or(Some(fields), "07. latest trading day", "Unknown"),
    })
}

pub(crate) fn parse_news(
    symbol: &str,
    payload: &Value,
) -> std::result::Result<NewsDigest, ProviderError> {
    let feed = section(payload, FEED_KEY)?
        .as_array()
        .ok_or_else(|| ProviderError::Malformed(format!("{FEED_KEY} is not a list")))?;

    if feed.is_empty() {
        return Err(ProviderError::NoData);
    }

    let articles = feed
        .iter()
        .take(MAX_ARTICLES)
        .map(|item| {
            let fields = item.as_object();
            NewsArticle {
                title: text_or(fields, "title", "No title"),
                summary: truncate_summary(&text_or(fields, "summary", "No summary available")),
                source: text_or(fields, "source", "Unknown"),
                time_published: text_or(fields, "time_published", "Unknown"),
                sentiment: text_or(fields, "overall_sentiment_label", "Neutral"),
            }
        })
        .collect();

    Ok(NewsDigest::new(symbol, articles))
}

pub(crate) fn parse_daily_series(
    symbol: &str,
    payload: &Value,
) -> std::result::Result<DailySeries, ProviderError> {
    let days = object(section(payload, DAILY_KEY)?, DAILY_KEY)?;

    let mut series = DailySeries::new(symbol);
    for (date, bar) in days {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| ProviderError::Malformed(format!("bad date {date:?}: {e}")))?;
        let fields = object(bar, "daily bar")?;

        series.insert(
            date,
            DailyBar {
                open: number(fields, "1. open").ok(),
                high: number(fields, "2. high").ok(),
                low: number(fields, "3. low").ok(),
                close: number(fields, "4. close")?,
                volume: fields
                    .get("5. volume")
                    .and_then(Value::as_str)
                    .and_then(|v| v.trim().parse().ok()),
            },
        );
    }

    tracing::debug!(symbol, days = series.len(), "parsed daily series");
    Ok(series)
}

/// First [`SUMMARY_CHARS`] characters followed by `"..."`
pub(crate) fn truncate_summary(text: &str) -> String {
    let mut summary: String = text.chars().take(SUMMARY_CHARS).collect();
    summary.push_str("...");
    summary
}
