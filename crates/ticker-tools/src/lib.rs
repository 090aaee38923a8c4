//! Tool framework for ticker-insight
//!
//! Tools are the callable surface an external agent (or the CLI) uses to
//! reach the analysis pipeline. Each tool takes JSON arguments and produces a
//! JSON value tagged with a `status` field.

pub mod error;
pub mod registry;
pub mod response;
pub mod tool;

pub use error::{Result, ToolError};
pub use registry::ToolRegistry;
pub use response::{ToolResponse, ToolStatus, status_of};
pub use tool::{Tool, parse_params};
