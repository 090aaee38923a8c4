//! Error types for tool invocation

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Failures of the tool plumbing itself
///
/// Domain failures (unknown ticker, provider errors) are not represented
/// here; tools report those inside a [`ToolResponse`](crate::ToolResponse)
/// with `status = "error"`.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The arguments did not match the tool's input schema
    #[error("Invalid parameters for {tool}: {reason}")]
    InvalidParameters { tool: String, reason: String },

    /// No tool is registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Output could not be serialized to JSON
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The tool failed in a way it could not express as a response
    #[error("Tool execution failed: {0}")]
    Execution(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ToolError::InvalidParameters {
            tool: "ticker_price".to_string(),
            reason: "missing field `ticker`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid parameters for ticker_price: missing field `ticker`"
        );

        let err = ToolError::UnknownTool("nope".to_string());
        assert_eq!(err.to_string(), "Unknown tool: nope");
    }
}
