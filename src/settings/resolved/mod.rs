use std::path::PathBuf;
use std::time::Duration;

use frontdesk::model::Role;
use frontdesk_suggest::ControllerConfig;

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Suggestion behaviour shared by every member search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
	pub debounce: Duration,
	pub min_query_len: usize,
	pub suggestion_limit: usize,
}

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
	pub search: SearchSettings,
	pub venue_name: String,
	pub data_file: PathBuf,
	pub role: Role,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), ConfigError> {
		validation::validate(self, sources)
	}

	#[must_use]
	pub fn controller_config(&self) -> ControllerConfig {
		ControllerConfig {
			debounce: self.search.debounce,
			min_query_len: self.search.min_query_len,
		}
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		summary::print_summary(self);
	}
}
