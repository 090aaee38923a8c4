//! Market data types returned by the provider client

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::sentiment::SentimentLabel;

/// Snapshot of current and previous price data for one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "ticker")]
    pub symbol: String,
    pub current_price: f64,
    pub previous_close: f64,
    pub change: f64,
    /// Provider-formatted, e.g. `"-1.2600%"`
    pub change_percent: String,
    /// Latest trading day as reported by the provider
    pub last_updated: String,
}

/// One news item with the provider's sentiment label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub summary: String,
    pub source: String,
    pub time_published: String,
    /// Raw provider label, e.g. `"Bullish"` or `"Neutral"`
    pub sentiment: String,
}

impl NewsArticle {
    /// The provider label classified into the closed set
    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::classify(&self.sentiment)
    }
}

/// The articles kept from one news request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsDigest {
    #[serde(rename = "ticker")]
    pub symbol: String,
    pub news_count: usize,
    pub articles: Vec<NewsArticle>,
}

impl NewsDigest {
    pub fn new(symbol: impl Into<String>, articles: Vec<NewsArticle>) -> Self {
        Self {
            symbol: symbol.into(),
            news_count: articles.len(),
            articles,
        }
    }
}

/// One day of OHLC data; only `close` is used by the pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<u64>,
}

impl DailyBar {
    /// A bar with only a closing price
    pub fn close_only(close: f64) -> Self {
        Self {
            open: None,
            high: None,
            low: None,
            close,
            volume: None,
        }
    }
}

/// Date-indexed daily bars for one symbol
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailySeries {
    pub symbol: String,
    bars: BTreeMap<NaiveDate, DailyBar>,
}

impl DailySeries {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bars: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, date: NaiveDate, bar: DailyBar) {
        self.bars.insert(date, bar);
    }

    pub fn get(&self, date: NaiveDate) -> Option<&DailyBar> {
        self.bars.get(&date)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Bars newest first
    pub fn newest_first(&self) -> impl Iterator<Item = (NaiveDate, &DailyBar)> {
        self.bars.iter().rev().map(|(date, bar)| (*date, bar))
    }
}

impl FromIterator<(NaiveDate, f64)> for DailySeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        let mut series = Self::default();
        for (date, close) in iter {
            series.insert(date, DailyBar::close_only(close));
        }
        series
    }
}
