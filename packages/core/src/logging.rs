use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter variable checked before `RUST_LOG`.
pub const LOG_ENV_VAR: &str = "HYPE_LOG";

fn build_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global tracing subscriber. Call once, from `main`.
///
/// Output goes to stderr; stdout carries the JSON report.
pub fn init_logging() {
    fmt()
        .with_env_filter(build_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    debug!("Logging initialized (filter from {} or RUST_LOG)", LOG_ENV_VAR);
}
