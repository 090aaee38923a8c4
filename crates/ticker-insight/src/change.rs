//! Price change between the latest close and a lookback close

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{InsightError, ProviderError, Resource, Result};
use crate::models::DailySeries;

/// Comparison window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    #[default]
    Day,
    Week,
    Month,
}

impl Timeframe {
    /// Parse a caller-supplied label
    ///
    /// Unrecognised labels fall back to [`Timeframe::Day`].
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "week" | "1week" | "7days" => Self::Week,
            "month" | "1month" | "30days" => Self::Month,
            _ => Self::Day,
        }
    }

    /// Canonical label, as used by the analysis composer
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "1day",
            Self::Week => "1week",
            Self::Month => "1month",
        }
    }

    /// How many series entries back the comparison close sits
    pub fn lookback_days(self) -> usize {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }
}

/// Direction of the move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    fn of(delta: f64) -> Self {
        if delta > 0.0 {
            Self::Up
        } else if delta < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "flat",
        }
    }
}

/// Result of comparing two closes of a daily series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceChange {
    #[serde(rename = "ticker")]
    pub symbol: String,
    /// The label the caller asked for, echoed back
    pub timeframe: String,
    pub current_price: f64,
    pub comparison_price: f64,
    #[serde(rename = "price_change")]
    pub delta: f64,
    #[serde(rename = "percent_change")]
    pub percent_delta: f64,
    pub current_date: NaiveDate,
    pub comparison_date: NaiveDate,
    pub trend: Trend,
}

/// Compare the newest close against the one `lookback_days` entries older
///
/// A series shorter than the lookback compares against its oldest date. Fewer
/// than two dates is [`InsightError::Insufficient`]. A comparison close of
/// zero is rejected as malformed provider data rather than producing an
/// infinite percentage.
pub fn compute_change(series: &DailySeries, timeframe_label: &str) -> Result<PriceChange> {
    let timeframe = Timeframe::from_label(timeframe_label);
    let dates: Vec<_> = series.newest_first().collect();

    if dates.len() < 2 {
        return Err(InsightError::Insufficient {
            symbol: series.symbol.clone(),
            available: dates.len(),
        });
    }

    let (current_date, current) = dates[0];
    let (comparison_date, comparison) = dates[timeframe.lookback_days().min(dates.len() - 1)];

    if comparison.close.abs() < f64::EPSILON {
        return Err(InsightError::provider(
            series.symbol.clone(),
            Resource::DailySeries,
            ProviderError::Malformed(format!("closing price of 0 on {comparison_date}")),
        ));
    }

    let raw_delta = current.close - comparison.close;
    let raw_percent = raw_delta / comparison.close * 100.0;

    Ok(PriceChange {
        symbol: series.symbol.clone(),
        timeframe: timeframe_label.to_string(),
        current_price: current.close,
        comparison_price: comparison.close,
        delta: round2(raw_delta),
        percent_delta: round2(raw_percent),
        current_date,
        comparison_date,
        trend: Trend::of(raw_delta),
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn series(closes_oldest_first: &[f64]) -> DailySeries {
        let start = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let mut series: DailySeries = closes_oldest_first
            .iter()
            .enumerate()
            .map(|(i, close)| (start + Days::new(i as u64), *close))
            .collect();
        series.symbol = "TSLA".to_string();
        series
    }

    #[test]
    fn test_day_over_day() {
        let change = compute_change(&series(&[100.0, 104.0, 110.0]), "1day").unwrap();
        assert_eq!(change.current_price, 110.0);
        assert_eq!(change.comparison_price, 104.0);
        assert_eq!(change.delta, 6.0);
        assert_eq!(change.percent_delta, 5.77);
        assert_eq!(change.trend, Trend::Up);
        assert_eq!(change.current_date, NaiveDate::from_ymd_opt(2024, 4, 3).unwrap());
        assert_eq!(change.comparison_date, NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
        assert_eq!(change.timeframe, "1day");
    }

    #[test]
    fn test_week_lookback() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + f64::from(i)).collect();
        let change = compute_change(&series(&closes), "1week").unwrap();
        // newest is index 9 (109.0); seven entries back is index 2 (102.0)
        assert_eq!(change.comparison_price, 102.0);
        assert_eq!(change.delta, 7.0);
    }

    #[test]
    fn test_month_on_short_series_uses_oldest() {
        let closes: Vec<f64> = (0..10).map(|i| 50.0 - f64::from(i)).collect();
        let change = compute_change(&series(&closes), "month").unwrap();
        assert_eq!(change.comparison_date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(change.comparison_price, 50.0);
        assert_eq!(change.delta, -9.0);
        assert_eq!(change.percent_delta, -18.0);
        assert_eq!(change.trend, Trend::Down);
    }

    #[test]
    fn test_single_date_is_insufficient() {
        let err = compute_change(&series(&[100.0]), "1day").unwrap_err();
        assert_eq!(
            err,
            InsightError::Insufficient {
                symbol: "TSLA".to_string(),
                available: 1,
            }
        );
        assert!(compute_change(&series(&[]), "1day").is_err());
    }

    #[test]
    fn test_flat() {
        let change = compute_change(&series(&[42.0, 42.0]), "1day").unwrap();
        assert_eq!(change.trend, Trend::Flat);
        assert_eq!(change.delta, 0.0);
    }

    #[test]
    fn test_unknown_timeframe_falls_back_to_day() {
        assert_eq!(Timeframe::from_label("fortnight"), Timeframe::Day);
        let change = compute_change(&series(&[10.0, 20.0, 30.0]), "fortnight").unwrap();
        assert_eq!(change.comparison_price, 20.0);
        assert_eq!(change.timeframe, "fortnight");
    }

    #[test]
    fn test_timeframe_labels() {
        for label in ["today", "1day", "daily", "day"] {
            assert_eq!(Timeframe::from_label(label), Timeframe::Day);
        }
        for label in ["week", "1WEEK", "7days"] {
            assert_eq!(Timeframe::from_label(label), Timeframe::Week);
        }
        for label in ["month", "1month", "30Days"] {
            assert_eq!(Timeframe::from_label(label), Timeframe::Month);
        }
        assert_eq!(Timeframe::Month.lookback_days(), 30);
        assert_eq!(Timeframe::Week.label(), "1week");
    }

    #[test]
    fn test_zero_comparison_close_is_rejected() {
        let err = compute_change(&series(&[0.0, 5.0]), "1day").unwrap_err();
        assert!(matches!(
            err.provider_error(),
            Some(ProviderError::Malformed(msg)) if msg.contains("closing price of 0")
        ));
    }

    #[test]
    fn test_serialized_field_names() {
        let change = compute_change(&series(&[100.0, 101.0]), "1day").unwrap();
        let value = serde_json::to_value(&change).unwrap();
        assert_eq!(value["ticker"], "TSLA");
        assert_eq!(value["price_change"], 1.0);
        assert_eq!(value["percent_change"], 1.0);
        assert_eq!(value["trend"], "up");
        assert_eq!(value["current_date"], "2024-04-02");
    }
}
