//! Ticker identification from free-text queries
//!
//! Resolution runs two strategies in order, first match wins:
//!
//! 1. An explicit symbol: the first word-bounded run of 2-5 uppercase ASCII
//!    letters in the raw query (`"Why did TSLA drop?"`).
//! 2. A company name: the first entry of the mapping table, in table order,
//!    whose name is a substring of the lowercased query.
//!
//! Name matching is a plain substring test, so short names match inside
//! unrelated words: `"meta"` resolves `"heavy metal prices"` to `META`.
//! Callers that need precision should pass an explicit symbol. For the same
//! reason the built-in table has no one-letter names (`"x"` would match
//! almost any sentence).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::{InsightError, Result};

/// Company and brand names mapped to their symbols, in match order
pub const TICKER_MAPPINGS: &[(&str, &str)] = &[
    ("tesla", "TSLA"),
    ("apple", "AAPL"),
    ("microsoft", "MSFT"),
    ("google", "GOOGL"),
    ("alphabet", "GOOGL"),
    ("amazon", "AMZN"),
    ("nvidia", "NVDA"),
    ("palantir", "PLTR"),
    ("meta", "META"),
    ("facebook", "META"),
    ("netflix", "NFLX"),
    ("spotify", "SPOT"),
    ("uber", "UBER"),
    ("airbnb", "ABNB"),
    ("twitter", "TWTR"),
];

static SYMBOL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"\b[A-Z]{2,5}\b").unwrap()
});

/// How the symbol was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Explicit uppercase symbol in the query
    High,
    /// Company name from the mapping table
    Medium,
}

/// A resolved ticker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    #[serde(rename = "ticker")]
    pub symbol: String,
    /// Title-cased company name, or a placeholder for explicit symbols
    #[serde(rename = "company")]
    pub display_name: String,
    pub confidence: Confidence,
}

/// Maps free text to a ticker symbol
#[derive(Debug, Clone, Copy)]
pub struct TickerResolver {
    mappings: &'static [(&'static str, &'static str)],
}

impl Default for TickerResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TickerResolver {
    /// Resolver over the built-in [`TICKER_MAPPINGS`]
    pub fn new() -> Self {
        Self {
            mappings: TICKER_MAPPINGS,
        }
    }

    /// Resolver over a custom table; names must be lowercase
    pub fn with_mappings(mappings: &'static [(&'static str, &'static str)]) -> Self {
        Self { mappings }
    }

    /// Identify the ticker a query is about
    pub fn resolve(&self, query: &str) -> Result<Resolution> {
        if let Some(found) = SYMBOL_PATTERN.find(query) {
            let symbol = found.as_str().to_string();
            tracing::debug!(%symbol, "explicit symbol in query");
            return Ok(Resolution {
                display_name: format!("Company with ticker {symbol}"),
                symbol,
                confidence: Confidence::High,
            });
        }

        let lowered = query.to_lowercase();
        self.mappings
            .iter()
            .find(|(name, _)| lowered.contains(name))
            .map(|(name, symbol)| {
                tracing::debug!(name, symbol, "company name in query");
                Resolution {
                    symbol: (*symbol).to_string(),
                    display_name: title_case(name),
                    confidence: Confidence::Medium,
                }
            })
            .ok_or_else(|| InsightError::NotFound {
                query: query.to_string(),
            })
    }
}

/// Uppercase the first letter of every alphabetic run: `"1week"` -> `"1Week"`
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
