//! Diagnostic output for the `frontdesk` binary.
//!
//! Log lines go to stderr so that plain and JSON command output on stdout stay
//! machine readable.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Environment variable holding the filter directives, e.g. `debug` or
/// `frontdesk_suggest=trace`.
pub const LOG_ENV: &str = "FRONTDESK_LOG";

const DEFAULT_DIRECTIVES: &str = "warn";

/// Build the filter from `FRONTDESK_LOG`, falling back to `warn` when it is
/// unset or unparsable.
#[must_use]
pub fn filter_from_env() -> EnvFilter {
	EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Install the global subscriber. Calling this more than once is harmless.
pub fn initialize() {
	let _ = fmt()
		.with_env_filter(filter_from_env())
		.with_target(false)
		.with_writer(std::io::stderr)
		.try_init();
}
