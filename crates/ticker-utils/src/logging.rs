//! Logging and tracing utilities

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines on stderr
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Build the filter, letting `RUST_LOG` override the given default directives
fn build_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Initialize the global tracing subscriber
///
/// `default_directives` is used when `RUST_LOG` is unset, e.g.
/// `"warn,ticker_insight=info"`. Calling this twice is harmless: the second
/// registration is ignored.
pub fn init_tracing(default_directives: &str, format: LogFormat) {
    let registry = tracing_subscriber::registry().with(build_filter(default_directives));

    let result = match format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if let Err(err) = result {
        tracing::debug!("tracing already initialized: {err}");
    }
}
