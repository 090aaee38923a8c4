//! Natural-language stock queries over Alpha Vantage
//!
//! A free-text question about a company is turned into a ticker, the
//! provider is asked for the quote, daily closes and news, and the pieces
//! are combined into a readable summary with a sentiment label.
//!
//! - [`resolver`]: ticker identification from free text
//! - [`api`]: provider client and transport
//! - [`change`]: price change over a lookback window
//! - [`sentiment`]: aggregate news sentiment
//! - [`analysis`]: the composed analysis
//! - [`tools`]: the five callable tools an agent uses
//!
//! # Example
//!
//! ```rust,ignore
//! use ticker_insight::{InsightConfig, tools::tool_registry_from_config};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = tool_registry_from_config(&InsightConfig::from_env()?)?;
//!
//!     let found = registry
//!         .execute("identify_ticker", json!({"query": "Why did Tesla stock drop today?"}))
//!         .await?;
//!     let analysis = registry
//!         .execute("ticker_analysis", json!({"ticker": found["ticker"]}))
//!         .await?;
//!     println!("{}", analysis["analysis"]);
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod api;
pub mod change;
pub mod config;
pub mod error;
pub mod models;
pub mod resolver;
pub mod sentiment;
pub mod tools;

pub use analysis::{AnalysisComposer, AnalysisResult};
pub use api::AlphaVantageClient;
pub use change::{PriceChange, Timeframe, Trend, compute_change};
pub use config::InsightConfig;
pub use error::{InsightError, ProviderError, Resource, Result};
pub use models::{DailyBar, DailySeries, NewsArticle, NewsDigest, Quote};
pub use resolver::{Confidence, Resolution, TICKER_MAPPINGS, TickerResolver};
pub use sentiment::{AggregateSentiment, SentimentLabel, summarize};
