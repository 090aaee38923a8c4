//! News sentiment tally

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::NewsArticle;

/// At most this many articles contribute to the aggregate
pub const MAX_ARTICLES: usize = 3;

/// Per-article label, classified from the provider's text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Classify a provider label, case-insensitively
    ///
    /// The provider's graded labels fold into the closed set:
    /// `Bullish`/`Somewhat-Bullish` are positive, `Bearish`/`Somewhat-Bearish`
    /// negative. Anything unrecognised is neutral.
    pub fn classify(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "positive" | "bullish" | "somewhat-bullish" | "somewhat_bullish" => Self::Positive,
            "negative" | "bearish" | "somewhat-bearish" | "somewhat_bearish" => Self::Negative,
            _ => Self::Neutral,
        }
    }
}

/// Aggregate label over a set of articles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AggregateSentiment {
    Positive,
    Negative,
    Neutral,
    /// No news was available at all
    Mixed,
}

impl fmt::Display for AggregateSentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Mixed => "Mixed",
        };
        f.write_str(text)
    }
}

/// Tally positive against negative labels over the first [`MAX_ARTICLES`]
///
/// No articles gives `Mixed`; a tie between positive and negative counts
/// (including all-neutral news) gives `Neutral`.
pub fn summarize(articles: &[NewsArticle]) -> AggregateSentiment {
    if articles.is_empty() {
        return AggregateSentiment::Mixed;
    }

    let (positive, negative) = articles
        .iter()
        .take(MAX_ARTICLES)
        .fold((0usize, 0usize), |(pos, neg), article| match article.label() {
            SentimentLabel::Positive => (pos + 1, neg),
            SentimentLabel::Negative => (pos, neg + 1),
            SentimentLabel::Neutral => (pos, neg),
        });

    tracing::debug!(positive, negative, "sentiment tally");

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => AggregateSentiment::Positive,
        std::cmp::Ordering::Less => AggregateSentiment::Negative,
        std::cmp::Ordering::Equal => AggregateSentiment::Neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(sentiment: &str) -> NewsArticle {
        NewsArticle {
            title: "headline".to_string(),
            summary: "summary...".to_string(),
            source: "Wire".to_string(),
            time_published: "20240503T120000".to_string(),
            sentiment: sentiment.to_string(),
        }
    }

    fn articles(labels: &[&str]) -> Vec<NewsArticle> {
        labels.iter().map(|l| article(l)).collect()
    }

    #[test]
    fn test_majority_positive() {
        assert_eq!(
            summarize(&articles(&["Positive", "Positive", "Negative"])),
            AggregateSentiment::Positive
        );
    }

    #[test]
    fn test_majority_negative() {
        assert_eq!(
            summarize(&articles(&["Negative", "Neutral", "Negative"])),
            AggregateSentiment::Negative
        );
    }

    #[test]
    fn test_tie_is_neutral() {
        assert_eq!(
            summarize(&articles(&["Positive", "Negative"])),
            AggregateSentiment::Neutral
        );
        assert_eq!(
            summarize(&articles(&["Neutral", "Neutral"])),
            AggregateSentiment::Neutral
        );
    }

    #[test]
    fn test_no_news_is_mixed() {
        assert_eq!(summarize(&[]), AggregateSentiment::Mixed);
    }

    #[test]
    fn test_only_first_three_count() {
        assert_eq!(
            summarize(&articles(&["Positive", "Negative", "Neutral", "Negative"])),
            AggregateSentiment::Neutral
        );
    }

    #[test]
    fn test_graded_provider_labels() {
        assert_eq!(SentimentLabel::classify("Somewhat-Bullish"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::classify("bearish"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::classify("Neutral"), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::classify("???"), SentimentLabel::Neutral);
        assert_eq!(
            summarize(&articles(&["Bullish", "Somewhat-Bullish", "Bearish"])),
            AggregateSentiment::Positive
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(AggregateSentiment::Mixed.to_string(), "Mixed");
        assert_eq!(
            serde_json::to_value(AggregateSentiment::Positive).unwrap(),
            "Positive"
        );
    }
}
