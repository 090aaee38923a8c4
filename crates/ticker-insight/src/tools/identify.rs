//! Tool for identifying a ticker in a free-text query

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use ticker_tools::{Result, Tool, ToolResponse, parse_params};

use crate::resolver::TickerResolver;

/// Finds the ticker a question is about
pub struct IdentifyTickerTool {
    resolver: TickerResolver,
}

#[derive(Debug, Deserialize)]
struct IdentifyParams {
    query: String,
}

impl IdentifyTickerTool {
    pub fn new(resolver: TickerResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl Tool for IdentifyTickerTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: IdentifyParams = parse_params(self.name(), params)?;
        ToolResponse::from(self.resolver.resolve(&params.query)).into_value()
    }

    fn name(&self) -> &'static str {
        "identify_ticker"
    }

    fn description(&self) -> &'static str {
        "Parse a natural-language question about a stock and identify its ticker symbol. \
         Returns the ticker, a company name, and a confidence of 'high' (explicit symbol) \
         or 'medium' (company name)."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The user's question, e.g. 'Why did Tesla stock drop today?'"
                }
            },
            "required": ["query"]
        })
    }
}
