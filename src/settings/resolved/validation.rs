use std::time::Duration;

use super::{ConfigError, ConfigSources, ResolvedConfig};

/// Longest quiet period accepted before a lookup runs.
pub(super) const MAX_DEBOUNCE: Duration = Duration::from_secs(10);

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), ConfigError> {
	let search = &config.search;

	if search.debounce > MAX_DEBOUNCE {
		return Err(ConfigError::invalid(
			"search.debounce_ms",
			search.debounce.as_millis().to_string(),
			sources.source_for_debounce(),
			format!("must be at most {}", MAX_DEBOUNCE.as_millis()),
		));
	}

	if search.min_query_len == 0 {
		return Err(ConfigError::invalid(
			"search.min_query_len",
			"0",
			sources.source_for_min_query_len(),
			"must be at least 1",
		));
	}

	if search.suggestion_limit == 0 {
		return Err(ConfigError::invalid(
			"search.suggestion_limit",
			"0",
			sources.source_for_suggestion_limit(),
			"must be greater than zero",
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use frontdesk::model::Role;

	use super::super::{SearchSettings, SettingSource};
	use super::*;

	fn config(search: SearchSettings) -> ResolvedConfig {
		ResolvedConfig {
			search,
			venue_name: "Venue".into(),
			data_file: PathBuf::from("/tmp/venue.json"),
			role: Role::Reception,
		}
	}

	fn defaults() -> SearchSettings {
		SearchSettings {
			debounce: Duration::from_millis(300),
			min_query_len: 2,
			suggestion_limit: 5,
		}
	}

	#[test]
	fn defaults_are_valid() {
		assert!(validate(&config(defaults()), &ConfigSources::default()).is_ok());
	}

	#[test]
	fn validation_rejects_zero_suggestion_limit() {
		let search = SearchSettings {
			suggestion_limit: 0,
			..defaults()
		};
		let sources = ConfigSources {
			suggestion_limit: Some(SettingSource::Environment(
				"FRONTDESK__SEARCH__SUGGESTION_LIMIT",
			)),
			..ConfigSources::default()
		};

		let err = validate(&config(search), &sources).unwrap_err();
		assert_eq!(err.key, "search.suggestion_limit");
		let message = err.to_string();
		assert!(message.contains("value: 0"));
		assert!(message.contains("environment variable"));
	}

	#[test]
	fn validation_rejects_long_debounce() {
		let search = SearchSettings {
			debounce: Duration::from_secs(60),
			..defaults()
		};

		let err = validate(&config(search), &ConfigSources::default()).unwrap_err();
		assert_eq!(err.key, "search.debounce_ms");
		assert_eq!(err.origin, SettingSource::ConfigKey("search.debounce_ms"));
		assert!(err.to_string().contains("value: 60000"));
	}
}
