//! Tool for fetching recent news about a stock

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use ticker_tools::{Result, Tool, ToolResponse, parse_params};

use super::{normalize_symbol, ticker_schema};
use crate::analysis::AnalysisComposer;
use crate::models::NewsDigest;

/// Retrieves the latest headlines with provider sentiment
pub struct TickerNewsTool {
    composer: Arc<AnalysisComposer>,
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    ticker: String,
}

impl TickerNewsTool {
    pub fn new(composer: Arc<AnalysisComposer>) -> Self {
        Self { composer }
    }

    async fn fetch(&self, params: NewsParams) -> ToolResponse<NewsDigest> {
        let symbol = match normalize_symbol(&params.ticker) {
            Ok(symbol) => symbol,
            Err(message) => return ToolResponse::error(message),
        };
        self.composer.client().get_news(&symbol).await.into()
    }
}

#[async_trait]
impl Tool for TickerNewsTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: NewsParams = parse_params(self.name(), params)?;
        self.fetch(params).await.into_value()
    }

    fn name(&self) -> &'static str {
        "ticker_news"
    }

    fn description(&self) -> &'static str {
        "Retrieve the most recent news about a stock: up to three articles with title, \
         shortened summary, source, publish time and sentiment label."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}
