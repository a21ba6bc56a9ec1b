use std::fmt;

/// Where a configuration value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
		}
	}
}

/// Origins of the values that validation can reject. `None` means the default
/// was used.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) debounce_ms: Option<SettingSource>,
	pub(crate) min_query_len: Option<SettingSource>,
	pub(crate) suggestion_limit: Option<SettingSource>,
	pub(crate) role: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_debounce(&self) -> SettingSource {
		self.debounce_ms
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.debounce_ms"))
	}

	pub(crate) fn source_for_min_query_len(&self) -> SettingSource {
		self.min_query_len
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.min_query_len"))
	}

	pub(crate) fn source_for_suggestion_limit(&self) -> SettingSource {
		self.suggestion_limit
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.suggestion_limit"))
	}

	pub(crate) fn source_for_role(&self) -> SettingSource {
		self.role
			.clone()
			.unwrap_or(SettingSource::ConfigKey("session.role"))
	}
}
