use serde::Deserialize;

use crate::cli::CliArgs;

/// `[search]` table: suggestion timing and size.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) debounce_ms: Option<u64>,
	pub(super) min_query_len: Option<usize>,
	pub(super) suggestion_limit: Option<usize>,
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(value) = cli.debounce_ms {
			self.debounce_ms = Some(value);
		}
		if let Some(value) = cli.min_query_len {
			self.min_query_len = Some(value);
		}
		if let Some(value) = cli.suggestion_limit {
			self.suggestion_limit = Some(value);
		}
	}
}
