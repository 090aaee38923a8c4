//! Status-tagged tool output

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// The `status` discriminator carried by every tool output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

/// Tool output: either the payload fields or an `error_message`, never both
///
/// Serialized internally tagged, so a success flattens the payload next to
/// `"status": "success"` and an error is `{"status": "error", "error_message": ...}`.
/// The payload type must serialize as a JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolResponse<T> {
    Success(T),
    Error { error_message: String },
}

impl<T> ToolResponse<T> {
    /// Build an error response from anything displayable
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self::Error {
            error_message: message.to_string(),
        }
    }

    pub fn status(&self) -> ToolStatus {
        match self {
            Self::Success(_) => ToolStatus::Success,
            Self::Error { .. } => ToolStatus::Error,
        }
    }
}

impl<T: Serialize> ToolResponse<T> {
    /// Serialize into the JSON value handed back to the caller
    pub fn into_value(self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<T, E: std::fmt::Display> From<std::result::Result<T, E>> for ToolResponse<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(err) => Self::error(err),
        }
    }
}

/// Read the `status` field of a serialized tool output
pub fn status_of(value: &Value) -> Option<ToolStatus> {
    value
        .get("status")
        .and_then(|s| serde_json::from_value(s.clone()).ok())
}
