use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, Environment, File, Map};
use frontdesk::app_dirs;

use crate::cli::CliArgs;

/// Prefix of `FRONTDESK__SECTION__KEY` environment overrides.
const ENV_PREFIX: &str = "frontdesk";

/// Snapshot of the `FRONTDESK__*` variables. Merging and source reporting
/// both read this one copy.
pub(super) fn environment_overrides() -> Map<String, String> {
	let prefix = format!("{ENV_PREFIX}__");
	env::vars_os()
		.filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
		.filter(|(key, _)| key.to_lowercase().starts_with(&prefix))
		.collect()
}

/// Merge default files, `--config` files and environment overrides, later
/// sources winning.
pub(super) fn build_config(cli: &CliArgs, env_vars: &Map<String, String>) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		Environment::with_prefix(ENV_PREFIX)
			.prefix_separator("__")
			.separator("__")
			.try_parsing(true)
			.source(Some(env_vars.clone())),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

/// User config directory first, then the working directory.
pub(super) fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".frontdesk.toml"));
		files.push(current_dir.join("frontdesk.toml"));
	}

	files
}
