use clap::ValueEnum;
use frontdesk::model::{MembershipStatus, Role};

/// Staff roles selectable on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum RoleArg {
	Reception,
	Manager,
	Admin,
}

impl RoleArg {
	/// Return the string representation consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		Role::from(self).as_str()
	}
}

impl From<RoleArg> for Role {
	fn from(arg: RoleArg) -> Self {
		match arg {
			RoleArg::Reception => Role::Reception,
			RoleArg::Manager => Role::Manager,
			RoleArg::Admin => Role::Admin,
		}
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum StatusArg {
	Active,
	Inactive,
}

impl From<StatusArg> for MembershipStatus {
	fn from(arg: StatusArg) -> Self {
		match arg {
			StatusArg::Active => MembershipStatus::Active,
			StatusArg::Inactive => MembershipStatus::Inactive,
		}
	}
}

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}
