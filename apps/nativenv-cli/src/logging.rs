//! Diagnostic logging setup.
//!
//! Logs go to stderr so that `env` output on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Variable holding the log filter directive.
pub const LOG_ENV: &str = "NATIVENV_LOG";

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "debug";

/// Builds the filter: `--verbose` wins, then `NATIVENV_LOG`, then `warn`.
fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new(VERBOSE_FILTER);
    }
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .ok();
}
