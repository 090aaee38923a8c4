//! Callable tools exposing the pipeline to an agent
//!
//! Every tool answers with a status-tagged JSON object. Pipeline failures
//! become `{"status": "error", "error_message": ...}`; only malformed
//! arguments surface as a [`ToolError`](ticker_tools::ToolError).

pub mod analysis;
pub mod identify;
pub mod news;
pub mod price;
pub mod price_change;

pub use analysis::TickerAnalysisTool;
pub use identify::IdentifyTickerTool;
pub use news::TickerNewsTool;
pub use price::TickerPriceTool;
pub use price_change::TickerPriceChangeTool;

use serde_json::{Value, json};
use std::sync::Arc;
use ticker_tools::ToolRegistry;

use crate::analysis::AnalysisComposer;
use crate::api::AlphaVantageClient;
use crate::config::InsightConfig;
use crate::resolver::TickerResolver;

/// Register all five tools
pub fn register_tools(registry: &ToolRegistry, composer: &Arc<AnalysisComposer>) {
    registry.register(Arc::new(IdentifyTickerTool::new(TickerResolver::new())));
    registry.register(Arc::new(TickerPriceTool::new(Arc::clone(composer))));
    registry.register(Arc::new(TickerPriceChangeTool::new(Arc::clone(composer))));
    registry.register(Arc::new(TickerNewsTool::new(Arc::clone(composer))));
    registry.register(Arc::new(TickerAnalysisTool::new(Arc::clone(composer))));
}

/// A registry holding all five tools
pub fn tool_registry(composer: &Arc<AnalysisComposer>) -> ToolRegistry {
    let registry = ToolRegistry::new();
    register_tools(&registry, composer);
    registry
}

/// A registry wired to the HTTP provider described by `config`
pub fn tool_registry_from_config(config: &InsightConfig) -> crate::Result<ToolRegistry> {
    let client = AlphaVantageClient::new(config)?;
    Ok(tool_registry(&Arc::new(AnalysisComposer::new(client))))
}

/// Trim and uppercase a caller-supplied symbol, rejecting obviously bad shapes
pub(crate) fn normalize_symbol(raw: &str) -> Result<String, String> {
    let symbol = raw.trim().to_uppercase();
    let shaped = (1..=10).contains(&symbol.len())
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

    if shaped {
        Ok(symbol)
    } else {
        Err(format!("Invalid ticker symbol: {raw:?}"))
    }
}

/// Input schema shared by the single-`ticker` tools
pub(crate) fn ticker_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "ticker": {
                "type": "string",
                "description": "Stock ticker symbol (e.g., 'TSLA', 'AAPL')"
            }
        },
        "required": ["ticker"]
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::api::{AlphaVantageClient, MockMarketDataTransport};
    use crate::config::InsightConfig;

    /// A composer whose transport answers every request with `payload`
    pub fn composer_returning(payload: Value) -> Arc<AnalysisComposer> {
        let mut transport = MockMarketDataTransport::new();
        transport
            .expect_fetch()
            .returning(move |_| Ok(payload.clone()));
        let client =
            AlphaVantageClient::with_transport(Arc::new(transport), &InsightConfig::default());
        Arc::new(AnalysisComposer::new(client))
    }

    /// A composer that must never reach the provider
    pub fn composer_unreachable() -> Arc<AnalysisComposer> {
        let mut transport = MockMarketDataTransport::new();
        transport.expect_fetch().never();
        let client =
            AlphaVantageClient::with_transport(Arc::new(transport), &InsightConfig::default());
        Arc::new(AnalysisComposer::new(client))
    }
}
