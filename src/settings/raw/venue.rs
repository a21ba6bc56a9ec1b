use std::path::PathBuf;

use serde::Deserialize;

use crate::cli::CliArgs;

/// `[venue]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct VenueSection {
	pub(super) name: Option<String>,
	pub(super) data_file: Option<PathBuf>,
}

impl VenueSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(path) = cli.data_file.clone() {
			self.data_file = Some(path);
		}
	}
}

/// `[session]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SessionSection {
	pub(super) role: Option<String>,
}

impl SessionSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(role) = cli.role {
			self.role = Some(role.as_str().to_string());
		}
	}
}
