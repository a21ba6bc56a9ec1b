use std::time::Duration;

use anyhow::{Error, Result};
use config::Map;
use frontdesk::app_dirs;
use frontdesk::model::Role;
use frontdesk::search::DEFAULT_SUGGESTION_LIMIT;
use frontdesk_suggest::{DEFAULT_DEBOUNCE, DEFAULT_MIN_QUERY_LEN};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigError, ConfigSources, ResolvedConfig, SearchSettings, SettingSource};

mod search;
mod venue;

use search::SearchSection;
use venue::{SessionSection, VenueSection};

const DEFAULT_VENUE_NAME: &str = "Venue";

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	search: SearchSection,
	venue: VenueSection,
	session: SessionSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.search.apply_cli_overrides(cli);
		self.venue.apply_cli_overrides(cli);
		self.session.apply_cli_overrides(cli);
	}

	/// Fill defaults, parse the role and validate the result. `env_vars` are
	/// the environment overrides that were merged, used to name the source of
	/// a rejected value.
	pub(super) fn resolve(
		self,
		cli: &CliArgs,
		env_vars: &Map<String, String>,
	) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			debounce_ms: detect_source(
				cli.debounce_ms.is_some(),
				self.search.debounce_ms.is_some(),
				env_vars,
				"FRONTDESK__SEARCH__DEBOUNCE_MS",
				"--debounce-ms",
				"search.debounce_ms",
			),
			min_query_len: detect_source(
				cli.min_query_len.is_some(),
				self.search.min_query_len.is_some(),
				env_vars,
				"FRONTDESK__SEARCH__MIN_QUERY_LEN",
				"--min-query-len",
				"search.min_query_len",
			),
			suggestion_limit: detect_source(
				cli.suggestion_limit.is_some(),
				self.search.suggestion_limit.is_some(),
				env_vars,
				"FRONTDESK__SEARCH__SUGGESTION_LIMIT",
				"--suggestion-limit",
				"search.suggestion_limit",
			),
			role: detect_source(
				cli.role.is_some(),
				self.session.role.is_some(),
				env_vars,
				"FRONTDESK__SESSION__ROLE",
				"--role",
				"session.role",
			),
		};

		let role = match self.session.role {
			Some(value) => value.parse::<Role>().map_err(|err| {
				ConfigError::invalid("session.role", value.clone(), sources.source_for_role(), err.to_string())
			})?,
			None => Role::Reception,
		};

		let data_file = match self.venue.data_file {
			Some(path) => path,
			None => app_dirs::default_data_file()?,
		};

		let search = SearchSettings {
			debounce: self
				.search
				.debounce_ms
				.map_or(DEFAULT_DEBOUNCE, Duration::from_millis),
			min_query_len: self.search.min_query_len.unwrap_or(DEFAULT_MIN_QUERY_LEN),
			suggestion_limit: self
				.search
				.suggestion_limit
				.unwrap_or(DEFAULT_SUGGESTION_LIMIT),
		};

		let config = ResolvedConfig {
			search,
			venue_name: self
				.venue
				.name
				.filter(|name| !name.trim().is_empty())
				.unwrap_or_else(|| DEFAULT_VENUE_NAME.to_string()),
			data_file,
			role,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_vars: &Map<String, String>,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env_vars.contains_key(env_var) {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}
