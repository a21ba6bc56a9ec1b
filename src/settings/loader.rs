use anyhow::{Context, Result};
use config::Map;

use super::raw::RawConfig;
use super::resolved::ResolvedConfig;
use super::sources::{build_config, environment_overrides};
use crate::cli::CliArgs;

/// Load configuration by combining CLI arguments, config files and environment
/// variables.
pub fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	load_with_env(cli, &environment_overrides())
}

fn load_with_env(cli: &CliArgs, env_vars: &Map<String, String>) -> Result<ResolvedConfig> {
	let builder = build_config(cli, env_vars)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.context("failed to deserialize configuration")?;
	raw.apply_cli_overrides(cli);
	raw.resolve(cli, env_vars)
}

#[cfg(test)]
mod tests {
	use std::ffi::OsString;
	use std::fs;
	use std::path::Path;

	use clap::Parser;

	use super::*;

	const LIMIT_VAR: &str = "FRONTDESK__SEARCH__SUGGESTION_LIMIT";

	fn cli_with_file(path: &Path, extra: &[&str]) -> CliArgs {
		let mut args = vec![
			OsString::from("frontdesk"),
			OsString::from("--no-config"),
			OsString::from("--data-file"),
			OsString::from("/tmp/venue.json"),
			OsString::from("--config"),
			path.as_os_str().to_owned(),
		];
		args.extend(extra.iter().map(OsString::from));
		CliArgs::parse_from(args)
	}

	fn limit_env(value: &str) -> Map<String, String> {
		Map::from_iter([(LIMIT_VAR.to_string(), value.to_string())])
	}

	#[test]
	fn flag_beats_environment_which_beats_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("desk.toml");
		fs::write(&path, "[search]\nsuggestion_limit = 9\n").unwrap();

		let from_file = load_with_env(&cli_with_file(&path, &[]), &Map::new()).unwrap();
		assert_eq!(from_file.search.suggestion_limit, 9);

		let from_env = load_with_env(&cli_with_file(&path, &[]), &limit_env("7")).unwrap();
		assert_eq!(from_env.search.suggestion_limit, 7);

		let cli = cli_with_file(&path, &["--suggestion-limit", "3"]);
		let from_flag = load_with_env(&cli, &limit_env("7")).unwrap();
		assert_eq!(from_flag.search.suggestion_limit, 3);
	}

	#[test]
	fn invalid_environment_value_names_the_variable() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("desk.toml");
		fs::write(&path, "[search]\nsuggestion_limit = 9\n").unwrap();

		let message = load_with_env(&cli_with_file(&path, &[]), &limit_env("0"))
			.unwrap_err()
			.to_string();
		assert!(message.contains("search.suggestion_limit"));
		assert!(message.contains("environment variable `FRONTDESK__SEARCH__SUGGESTION_LIMIT`"));
	}

	#[test]
	fn file_value_is_reported_by_key() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("desk.toml");
		fs::write(&path, "[search]\nsuggestion_limit = 0\n").unwrap();

		let message = load_with_env(&cli_with_file(&path, &[]), &Map::new())
			.unwrap_err()
			.to_string();
		assert!(message.contains("configuration key `search.suggestion_limit`"));
	}
}
