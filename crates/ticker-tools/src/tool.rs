//! Tool trait definition

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Result, ToolError};

/// Trait for tools that an agent can execute
///
/// Each tool provides a name, a description the caller uses to decide when to
/// call it, and a JSON schema for its input. The output is a JSON object
/// carrying a `status` discriminator (see [`ToolResponse`](crate::ToolResponse)).
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// An `Err` means the call itself was unusable (bad arguments). Failures
    /// of the underlying operation come back as `Ok` with `status = "error"`.
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a [`ToolRegistry`](crate::ToolRegistry)
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "ticker": { "type": "string" }
    ///     },
    ///     "required": ["ticker"]
    /// });
    /// assert_eq!(schema["required"][0], "ticker");
    /// ```
    fn input_schema(&self) -> Value;
}

/// Deserialize tool arguments, attributing failures to the named tool
pub fn parse_params<T: DeserializeOwned>(tool: &str, params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| ToolError::InvalidParameters {
        tool: tool.to_string(),
        reason: e.to_string(),
    })
}
