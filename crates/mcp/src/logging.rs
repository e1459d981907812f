#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;

pub(crate) const LOG_ENV: &str = "WF_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr subscriber. stdout is reserved for JSON results and JSON-RPC frames.
pub(crate) fn init() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
