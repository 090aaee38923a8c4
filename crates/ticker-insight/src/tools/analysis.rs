//! Tool for the combined price and news analysis

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use ticker_tools::{Result, Tool, ToolResponse, parse_params};

use super::{normalize_symbol, ticker_schema};
use crate::analysis::{AnalysisComposer, AnalysisResult};

/// Explains recent price movement using price history and news sentiment
pub struct TickerAnalysisTool {
    composer: Arc<AnalysisComposer>,
}

#[derive(Debug, Deserialize)]
struct AnalysisParams {
    ticker: String,
}

impl TickerAnalysisTool {
    pub fn new(composer: Arc<AnalysisComposer>) -> Self {
        Self { composer }
    }

    async fn run(&self, params: AnalysisParams) -> ToolResponse<AnalysisResult> {
        let symbol = match normalize_symbol(&params.ticker) {
            Ok(symbol) => symbol,
            Err(message) => return ToolResponse::error(message),
        };
        self.composer.analyze(&symbol).await.into()
    }
}

#[async_trait]
impl Tool for TickerAnalysisTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: AnalysisParams = parse_params(self.name(), params)?;
        self.run(params).await.into_value()
    }

    fn name(&self) -> &'static str {
        "ticker_analysis"
    }

    fn description(&self) -> &'static str {
        "Analyze and summarize the reasons behind a stock's recent price movement by \
         combining the current quote, week-over-week change and news sentiment. Returns \
         a readable summary plus the underlying data."
    }

    fn input_schema(&self) -> Value {
        ticker_schema()
    }
}
