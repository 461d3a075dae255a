/*!
 * Structured Tracing
 * Subscriber setup for the tracing events emitted by the signal layer
 *
 * Nothing here runs in signal context: handlers never log.
 */

use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Environment variable enabling JSON output
pub const TRACE_JSON_ENV: &str = "SIGNALS_TRACE_JSON";

/// Filter used when RUST_LOG is unset or invalid
pub const DEFAULT_FILTER: &str = "info";

/// Tracing subscriber configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Emit JSON lines instead of compact human-readable output
    pub json: bool,
    /// Filter directive applied when RUST_LOG does not parse
    pub default_filter: String,
}

impl TracingConfig {
    /// Read configuration from the environment
    ///
    /// - RUST_LOG: log level (default: info)
    /// - SIGNALS_TRACE_JSON: `1` or `true` for JSON output
    pub fn from_env() -> Self {
        let json = std::env::var(TRACE_JSON_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self {
            json,
            ..Self::default()
        }
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            json: false,
            default_filter: DEFAULT_FILTER.to_string(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true" | "TRUE" | "True")
}

/// Initialize structured tracing from the environment
///
/// Returns false if a global subscriber was already installed.
pub fn init_tracing() -> bool {
    init_tracing_with(&TracingConfig::from_env())
}

/// Initialize structured tracing with explicit configuration
pub fn init_tracing_with(config: &TracingConfig) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = if config.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .try_init()
            .is_ok()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_span_events(FmtSpan::CLOSE)
                    .compact(),
            )
            .try_init()
            .is_ok()
    };

    if installed {
        info!(json = config.json, "Structured tracing initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("true"));
        assert!(parse_flag(" TRUE "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("yes"));
    }

    #[test]
    fn test_config_builder() {
        let config = TracingConfig::default()
            .with_json(true)
            .with_default_filter("posix_signals=debug");
        assert!(config.json);
        assert_eq!(config.default_filter, "posix_signals=debug");
    }
}
