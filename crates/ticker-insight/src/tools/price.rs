//! Tool for fetching the current quote

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use ticker_tools::{Result, Tool, ToolResponse, parse_params};

use super::{normalize_symbol, ticker_schema};
use crate::analysis::AnalysisComposer;
use crate::models::Quote;

/// Fetches the current price of a stock
pub struct TickerPriceTool {
    composer: Arc<AnalysisComposer>,
}

#[derive(Debug, Deserialize)]
struct PriceParams {
    ticker: String,
}

impl TickerPriceTool {
    pub fn new(composer: Arc<AnalysisComposer>) -> Self {
        Self { composer }
    }

    async fn fetch(&self, params: PriceParams) -> ToolResponse<Quote> {
        let symbol = match normalize_symbol(&params.ticker) {
            Ok(symbol) => symbol,
            Err(message) => return ToolResponse::error(message),
        };
        self.composer.client().get_quote(&symbol).await.into()
    }
}

#[async_trait]
impl Tool for TickerPriceTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: PriceParams = parse_params(self.name(), params)?;
        self.fetch(params).await.into_value()
    }

    fn name(&self) -> &'static str {
        "ticker_price"
    }

    fn description(&self) -> &'static str {
        "Fetch the current price of a stock: price, previous close, absolute and \
         percent change, and the latest trading day."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{composer_returning, composer_unreachable};
    use serde_json::json;

    #[tokio::test]
    async fn test_price_success() {
        let tool = TickerPriceTool::new(composer_returning(json!({
            "Global Quote": {
                "05. price": "128.5000",
                "07. latest trading day": "2024-05-10",
                "08. previous close": "130.0000",
                "09. change": "-1.5000",
                "10. change percent": "-1.1538%"
            }
        })));

        let value = tool.execute(json!({"ticker": "nflx"})).await.unwrap();
        assert_eq!(
            value,
            json!({
                "status": "success",
                "ticker": "NFLX",
                "current_price": 128.5,
                "previous_close": 130.0,
                "change": -1.5,
                "change_percent": "-1.1538%",
                "last_updated": "2024-05-10"
            })
        );
    }

    #[tokio::test]
    async fn test_price_provider_error() {
        let tool = TickerPriceTool::new(composer_returning(json!({"Error Message": "bad symbol"})));
        let value = tool.execute(json!({"ticker": "XXXX"})).await.unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(
            value["error_message"],
            "Error retrieving price for XXXX: API error: bad symbol"
        );
    }

    #[tokio::test]
    async fn test_price_bad_symbol_never_calls_provider() {
        let tool = TickerPriceTool::new(composer_unreachable());
        let value = tool.execute(json!({"ticker": "   "})).await.unwrap();
        assert_eq!(value["status"], "error");
    }
}
