//! Shared utilities for ticker-insight
//!
//! This crate provides the pieces every binary and library in the workspace
//! needs: tracing setup and environment-variable helpers.

pub mod config;
pub mod logging;

pub use config::{env_or, env_parse, env_var};
pub use logging::{LogFormat, init_tracing};
