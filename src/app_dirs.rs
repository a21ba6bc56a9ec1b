//! Resolve configuration and data directories for `frontdesk`.
//!
//! Each lookup honours an environment override first and otherwise asks the
//! `directories` crate for the platform location.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "albo";
const APPLICATION: &str = "frontdesk";

const CONFIG_DIR_ENV: &str = "FRONTDESK_CONFIG_DIR";
const DATA_DIR_ENV: &str = "FRONTDESK_DATA_DIR";

/// File name of the venue data store inside the data directory.
pub const VENUE_FILE: &str = "venue.json";

fn project_dirs() -> Result<ProjectDirs> {
	ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
		.ok_or_else(|| anyhow!("unable to determine project directories for frontdesk"))
}

/// An empty value counts as unset.
fn non_empty_dir(value: Option<OsString>) -> Option<PathBuf> {
	value.filter(|value| !value.is_empty()).map(PathBuf::from)
}

fn dir_from_env(name: &str) -> Option<PathBuf> {
	non_empty_dir(env::var_os(name))
}

/// Directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.config_local_dir().to_path_buf())
}

/// Directory holding the venue data file.
pub fn get_data_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Default location of the venue data file.
pub fn default_data_file() -> Result<PathBuf> {
	Ok(get_data_dir()?.join(VENUE_FILE))
}
