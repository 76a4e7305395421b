//! Diagnostic logging to stderr. Stdout carries only command output.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILTER_ENV: &str = "ABSENTEE_LOG";
pub const LOG_FORMAT_ENV: &str = "ABSENTEE_LOG_FORMAT";
const DEFAULT_FILTER: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

fn log_format(value: Option<&str>) -> LogFormat {
    match value.map(str::trim) {
        Some(raw) if raw.eq_ignore_ascii_case("json") => LogFormat::Json,
        _ => LogFormat::Text,
    }
}

fn env_filter(value: Option<&str>) -> EnvFilter {
    value
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging() {
    let filter = env_filter(std::env::var(LOG_FILTER_ENV).ok().as_deref());
    let format = log_format(std::env::var(LOG_FORMAT_ENV).ok().as_deref());
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(false),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_ansi(false),
            )
            .try_init(),
    };
    if installed.is_err() {
        tracing::debug!("logging already initialized");
    }
}
