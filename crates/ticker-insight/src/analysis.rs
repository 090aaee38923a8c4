//! Combines quote, price change and news into one analysis
//!
//! The quote is required: if it cannot be fetched the analysis fails with
//! that error. The price change and the news are best-effort and are left
//! out of the result when unavailable.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::AlphaVantageClient;
use crate::change::{PriceChange, Timeframe, compute_change};
use crate::error::{InsightError, Result};
use crate::models::{NewsArticle, NewsDigest, Quote};
use crate::resolver::title_case;
use crate::sentiment::{AggregateSentiment, MAX_ARTICLES, summarize};

/// Timeframes tried, in order, for the performance block
pub const CHANGE_ATTEMPTS: [Timeframe; 2] = [Timeframe::Week, Timeframe::Day];

/// Everything gathered for one symbol, plus the rendered text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "ticker")]
    pub symbol: String,
    #[serde(rename = "analysis")]
    pub summary: String,
    #[serde(rename = "price_data")]
    pub quote: Quote,
    #[serde(rename = "change_data")]
    pub change: Option<PriceChange>,
    #[serde(rename = "news_data")]
    pub news: Option<NewsDigest>,
    pub overall_sentiment: AggregateSentiment,
}

impl AnalysisResult {
    /// Articles behind the sentiment, empty when news was unavailable
    pub fn articles(&self) -> &[NewsArticle] {
        match &self.news {
            Some(news) => &news.articles,
            None => &[],
        }
    }
}

/// Orchestrates the provider calls behind an analysis
#[derive(Clone)]
pub struct AnalysisComposer {
    client: AlphaVantageClient,
}

impl AnalysisComposer {
    pub fn new(client: AlphaVantageClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AlphaVantageClient {
        &self.client
    }

    /// Fetch the daily series and compare over `timeframe`
    #[instrument(skip(self))]
    pub async fn price_change(&self, symbol: &str, timeframe: &str) -> Result<PriceChange> {
        let series = self.client.get_daily_series(symbol).await?;
        compute_change(&series, timeframe)
    }

    /// Try each of [`CHANGE_ATTEMPTS`]; the last failure is returned if none succeed
    async fn change_with_fallback(&self, symbol: &str) -> Result<PriceChange> {
        let mut last_error = None;

        for timeframe in CHANGE_ATTEMPTS {
            match self.price_change(symbol, timeframe.label()).await {
                Ok(change) => return Ok(change),
                Err(err) => {
                    tracing::debug!(timeframe = timeframe.label(), %err, "price change attempt failed");
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| InsightError::Insufficient {
            symbol: symbol.to_string(),
            available: 0,
        }))
    }

    /// Full analysis of one symbol
    #[instrument(skip(self))]
    pub async fn analyze(&self, symbol: &str) -> Result<AnalysisResult> {
        tracing::info!("starting analysis");

        let quote = self.client.get_quote(symbol).await?;

        let change = match self.change_with_fallback(symbol).await {
            Ok(change) => Some(change),
            Err(err) => {
                tracing::warn!(%err, "price change unavailable, continuing without it");
                None
            }
        };

        let news = match self.client.get_news(symbol).await {
            Ok(news) => Some(news),
            Err(err) => {
                tracing::warn!(%err, "news unavailable, continuing without it");
                None
            }
        };

        let overall_sentiment = news
            .as_ref()
            .map_or(AggregateSentiment::Mixed, |n| summarize(&n.articles));

        let summary = render_summary(
            symbol,
            &quote,
            change.as_ref(),
            overall_sentiment,
            news.as_ref(),
        );

        tracing::info!(sentiment = %overall_sentiment, "analysis complete");

        Ok(AnalysisResult {
            symbol: symbol.to_string(),
            summary,
            quote,
            change,
            news,
            overall_sentiment,
        })
    }
}

/// Render the human-readable analysis text
pub fn render_summary(
    symbol: &str,
    quote: &Quote,
    change: Option<&PriceChange>,
    sentiment: AggregateSentiment,
    news: Option<&NewsDigest>,
) -> String {
    let mut out = format!("Stock Analysis for {symbol}:\n\n");
    out.push_str(&format!("Current Price: ${:.2}\n", quote.current_price));
    out.push_str(&format!(
        "Change: ${:.2} ({})\n\n",
        quote.change, quote.change_percent
    ));

    if let Some(change) = change {
        out.push_str(&format!("{} Performance:\n", title_case(&change.timeframe)));
        out.push_str(&format!(
            "Price moved from ${:.2} to ${:.2}\n",
            change.comparison_price, change.current_price
        ));
        out.push_str(&format!(
            "Change: ${:.2} ({:.2}%)\n",
            change.delta, change.percent_delta
        ));
        out.push_str(&format!(
            "Trend: {}\n\n",
            change.trend.as_str().to_uppercase()
        ));
    }

    out.push_str(&format!("News Sentiment: {sentiment}\n"));

    if let Some(news) = news.filter(|n| !n.articles.is_empty()) {
        out.push_str("\nRecent News Headlines:\n");
        for (i, article) in news.articles.iter().take(MAX_ARTICLES).enumerate() {
            out.push_str(&format!(
                "{}. {} (Sentiment: {})\n",
                i + 1,
                article.title,
                article.sentiment
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockMarketDataTransport, ProviderFunction};
    use crate::config::InsightConfig;
    use crate::error::{ProviderError, Resource};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn quote_payload() -> Value {
        json!({
            "Global Quote": {
                "05. price": "251.30",
                "07. latest trading day": "2024-05-10",
                "08. previous close": "254.50",
                "09. change": "-3.20",
                "10. change percent": "-1.2574%"
            }
        })
    }

    fn series_payload() -> Value {
        let mut days = serde_json::Map::new();
        // 2024-05-01 .. 2024-05-10, closes 240.0 .. 249.0, then newest 251.30
        for day in 1..=9 {
            days.insert(
                format!("2024-05-{day:02}"),
                json!({"4. close": format!("{}", 239 + day)}),
            );
        }
        days.insert("2024-05-10".to_string(), json!({"4. close": "251.30"}));
        json!({"Time Series (Daily)": days})
    }

    fn news_payload() -> Value {
        json!({
            "feed": [
                {"title": "Deliveries beat estimates", "overall_sentiment_label": "Bullish"},
                {"title": "New factory opens", "overall_sentiment_label": "Somewhat-Bullish"},
                {"title": "Recall announced", "overall_sentiment_label": "Bearish"}
            ]
        })
    }

    fn composer(
        quote: std::result::Result<Value, ProviderError>,
        series: std::result::Result<Value, ProviderError>,
        news: std::result::Result<Value, ProviderError>,
    ) -> AnalysisComposer {
        let mut transport = MockMarketDataTransport::new();
        transport
            .expect_fetch()
            .withf(|q| q.function == ProviderFunction::GlobalQuote)
            .returning(move |_| quote.clone());
        transport
            .expect_fetch()
            .withf(|q| q.function == ProviderFunction::TimeSeriesDaily)
            .returning(move |_| series.clone());
        transport
            .expect_fetch()
            .withf(|q| q.function == ProviderFunction::NewsSentiment)
            .returning(move |_| news.clone());

        let client =
            AlphaVantageClient::with_transport(Arc::new(transport), &InsightConfig::default());
        AnalysisComposer::new(client)
    }

    #[tokio::test]
    async fn test_full_analysis() {
        let composer = composer(Ok(quote_payload()), Ok(series_payload()), Ok(news_payload()));
        let result = composer.analyze("TSLA").await.unwrap();

        assert_eq!(result.symbol, "TSLA");
        assert_eq!(result.overall_sentiment, AggregateSentiment::Positive);

        let change = result.change.as_ref().unwrap();
        assert_eq!(change.timeframe, "1week");
        assert_eq!(change.comparison_price, 242.0);
        assert_eq!(change.delta, 9.3);

        assert_eq!(result.articles().len(), 3);
        assert!(result.summary.starts_with("Stock Analysis for TSLA:\n\n"));
        assert!(result.summary.contains("Current Price: $251.30\n"));
        assert!(result.summary.contains("Change: $-3.20 (-1.2574%)\n"));
        assert!(result.summary.contains("1Week Performance:\n"));
        assert!(result.summary.contains("Price moved from $242.00 to $251.30\n"));
        assert!(result.summary.contains("Trend: UP\n"));
        assert!(result.summary.contains("News Sentiment: Positive\n"));
        assert!(
            result
                .summary
                .contains("1. Deliveries beat estimates (Sentiment: Bullish)\n")
        );
        assert!(result.summary.contains("3. Recall announced (Sentiment: Bearish)\n"));
    }

    #[tokio::test]
    async fn test_quote_failure_aborts() {
        let composer = composer(
            Err(ProviderError::Transport("timed out".to_string())),
            Ok(series_payload()),
            Ok(news_payload()),
        );
        let err = composer.analyze("TSLA").await.unwrap_err();
        assert_eq!(
            err,
            InsightError::provider(
                "TSLA",
                Resource::Quote,
                ProviderError::Transport("timed out".to_string())
            )
        );
    }

    #[tokio::test]
    async fn test_quote_rate_limited_aborts() {
        let composer = composer(
            Ok(json!({"Note": "slow down"})),
            Ok(series_payload()),
            Ok(news_payload()),
        );
        let err = composer.analyze("TSLA").await.unwrap_err();
        assert!(matches!(err.provider_error(), Some(ProviderError::RateLimited(_))));
    }

    #[tokio::test]
    async fn test_news_failure_is_tolerated() {
        let composer = composer(
            Ok(quote_payload()),
            Ok(series_payload()),
            Ok(json!({"Note": "rate limited"})),
        );
        let result = composer.analyze("TSLA").await.unwrap();

        assert!(result.news.is_none());
        assert!(result.articles().is_empty());
        assert_eq!(result.overall_sentiment, AggregateSentiment::Mixed);
        assert!(result.summary.contains("News Sentiment: Mixed\n"));
        assert!(!result.summary.contains("Recent News Headlines"));
    }

    #[tokio::test]
    async fn test_change_failure_is_tolerated() {
        let composer = composer(
            Ok(quote_payload()),
            Ok(json!({"Error Message": "Invalid API call"})),
            Ok(news_payload()),
        );
        let result = composer.analyze("TSLA").await.unwrap();

        assert!(result.change.is_none());
        assert!(!result.summary.contains("Performance:"));
        assert_eq!(result.overall_sentiment, AggregateSentiment::Positive);
    }

    #[tokio::test]
    async fn test_week_falls_back_to_day() {
        let mut transport = MockMarketDataTransport::new();
        let mut series_calls = 0;
        transport
            .expect_fetch()
            .withf(|q| q.function == ProviderFunction::TimeSeriesDaily)
            .times(2)
            .returning(move |_| {
                series_calls += 1;
                if series_calls == 1 {
                    Err(ProviderError::Transport("reset by peer".to_string()))
                } else {
                    Ok(json!({"Time Series (Daily)": {
                        "2024-05-09": {"4. close": "100.0"},
                        "2024-05-10": {"4. close": "99.0"}
                    }}))
                }
            });
        transport
            .expect_fetch()
            .withf(|q| q.function == ProviderFunction::GlobalQuote)
            .returning(|_| Ok(quote_payload()));
        transport
            .expect_fetch()
            .withf(|q| q.function == ProviderFunction::NewsSentiment)
            .returning(|_| Ok(json!({"feed": []})));

        let client =
            AlphaVantageClient::with_transport(Arc::new(transport), &InsightConfig::default());
        let result = AnalysisComposer::new(client).analyze("TSLA").await.unwrap();

        let change = result.change.unwrap();
        assert_eq!(change.timeframe, "1day");
        assert_eq!(change.delta, -1.0);
        assert!(result.summary.contains("1Day Performance:\n"));
        assert!(result.summary.contains("Trend: DOWN\n"));
    }

    #[tokio::test]
    async fn test_price_change_passes_timeframe_through() {
        let composer = composer(Ok(quote_payload()), Ok(series_payload()), Ok(news_payload()));
        let change = composer.price_change("TSLA", "1month").await.unwrap();
        assert_eq!(change.timeframe, "1month");
        // ten dates: lookback of 30 falls back to the oldest
        assert_eq!(change.comparison_price, 240.0);
    }

    #[test]
    fn test_render_without_optional_blocks() {
        let quote = Quote {
            symbol: "UBER".to_string(),
            current_price: 70.0,
            previous_close: 70.0,
            change: 0.0,
            change_percent: "0.0000%".to_string(),
            last_updated: "2024-05-10".to_string(),
        };
        let text = render_summary("UBER", &quote, None, AggregateSentiment::Mixed, None);
        assert_eq!(
            text,
            "Stock Analysis for UBER:\n\nCurrent Price: $70.00\nChange: $0.00 (0.0000%)\n\nNews Sentiment: Mixed\n"
        );
    }

    #[test]
    fn test_result_serializes_with_tool_keys() {
        let quote = Quote {
            symbol: "UBER".to_string(),
            current_price: 70.0,
            previous_close: 69.0,
            change: 1.0,
            change_percent: "1.4493%".to_string(),
            last_updated: "2024-05-10".to_string(),
        };
        let result = AnalysisResult {
            symbol: "UBER".to_string(),
            summary: "text".to_string(),
            quote,
            change: None,
            news: None,
            overall_sentiment: AggregateSentiment::Mixed,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["ticker"], "UBER");
        assert_eq!(value["analysis"], "text");
        assert_eq!(value["price_data"]["current_price"], 70.0);
        assert!(value["change_data"].is_null());
        assert!(value["news_data"].is_null());
        assert_eq!(value["overall_sentiment"], "Mixed");
    }
}
