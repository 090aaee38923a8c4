//! Tool for computing price change over a timeframe

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use ticker_tools::{Result, Tool, ToolResponse, parse_params};

use super::normalize_symbol;
use crate::analysis::AnalysisComposer;
use crate::change::PriceChange;

/// Compares the latest close with an earlier one
pub struct TickerPriceChangeTool {
    composer: Arc<AnalysisComposer>,
}

#[derive(Debug, Deserialize)]
struct PriceChangeParams {
    ticker: String,
    #[serde(default = "default_timeframe")]
    timeframe: String,
}

fn default_timeframe() -> String {
    "1day".to_string()
}

impl TickerPriceChangeTool {
    pub fn new(composer: Arc<AnalysisComposer>) -> Self {
        Self { composer }
    }

    async fn compute(&self, params: PriceChangeParams) -> ToolResponse<PriceChange> {
        let symbol = match normalize_symbol(&params.ticker) {
            Ok(symbol) => symbol,
            Err(message) => return ToolResponse::error(message),
        };
        self.composer
            .price_change(&symbol, &params.timeframe)
            .await
            .into()
    }
}

#[async_trait]
impl Tool for TickerPriceChangeTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: PriceChangeParams = parse_params(self.name(), params)?;
        self.compute(params).await.into_value()
    }

    fn name(&self) -> &'static str {
        "ticker_price_change"
    }

    fn description(&self) -> &'static str {
        "Calculate how a stock's closing price changed over a timeframe, using daily \
         closes. Returns both prices and dates, the absolute and percent change, and the trend."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "ticker": {
                    "type": "string",
                    "description": "Stock ticker symbol"
                },
                "timeframe": {
                    "type": "string",
                    "description": "Comparison window; unrecognised values mean one day",
                    "enum": ["1day", "1week", "1month"],
                    "default": "1day"
                }
            },
            "required": ["ticker"]
        })
    }
}
