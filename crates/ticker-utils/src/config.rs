//! Environment-variable helpers shared by configuration loaders

use std::fmt::Display;
use std::str::FromStr;

/// Read an environment variable, treating unset and blank values alike
pub fn env_var(key: &str) -> Option<String> {
    normalize(std::env::var(key).ok())
}

/// Read an environment variable or fall back to `default`
pub fn env_or(key: &str, default: &str) -> String {
    env_var(key).unwrap_or_else(|| default.to_string())
}

/// Read and parse an environment variable
///
/// Returns `None` when the variable is unset. A value that fails to parse is
/// logged at warn level and also yields `None`, so callers keep their default.
pub fn env_parse<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    env_var(key).and_then(|raw| parse_value(key, &raw))
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_value<T>(key: &str, raw: &str) -> Option<T>
where
    T: FromStr,
    T::Err: Display,
{
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("ignoring {key}={raw:?}: {err}");
            None
        }
    }
}
