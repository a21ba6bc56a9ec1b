//! Authenticated staff sessions and role dispatch.

use std::fmt;

use crate::model::{Profile, Role};

/// Signed-in staff member, tagged by role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Session {
	Reception(Profile),
	Manager(Profile),
	Admin(Profile),
}

/// Home screen selected for a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Workspace {
	ReceptionHome,
	ManagerHome,
	AdminHome,
}

impl Workspace {
	#[must_use]
	pub fn title(self) -> &'static str {
		match self {
			Workspace::ReceptionHome => "Reception",
			Workspace::ManagerHome => "Manager",
			Workspace::AdminHome => "Admin",
		}
	}
}

/// Operations that are gated by role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
	SearchMembers,
	AddMember,
	EditMember,
	CheckIn,
	ViewOccupancy,
	ViewDailyCheckIns,
	ViewGuestlists,
	CreateGuestlist,
	ToggleGuestCheckIn,
}

impl fmt::Display for Action {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let text = match self {
			Action::SearchMembers => "search members",
			Action::AddMember => "add members",
			Action::EditMember => "edit members",
			Action::CheckIn => "check visitors in",
			Action::ViewOccupancy => "view occupancy",
			Action::ViewDailyCheckIns => "view daily check-ins",
			Action::ViewGuestlists => "view guestlists",
			Action::CreateGuestlist => "create guestlists",
			Action::ToggleGuestCheckIn => "check guests in",
		};
		f.write_str(text)
	}
}

impl Session {
	#[must_use]
	pub fn from_profile(profile: Profile) -> Self {
		match profile.role {
			Role::Reception => Session::Reception(profile),
			Role::Manager => Session::Manager(profile),
			Role::Admin => Session::Admin(profile),
		}
	}

	#[must_use]
	pub fn profile(&self) -> &Profile {
		match self {
			Session::Reception(profile) | Session::Manager(profile) | Session::Admin(profile) => {
				profile
			}
		}
	}

	#[must_use]
	pub fn role(&self) -> Role {
		self.profile().role
	}

	/// The one place that decides which home screen a role lands on.
	#[must_use]
	pub fn workspace(&self) -> Workspace {
		match self {
			Session::Reception(_) => Workspace::ReceptionHome,
			Session::Manager(_) => Workspace::ManagerHome,
			Session::Admin(_) => Workspace::AdminHome,
		}
	}

	/// The one place that decides what a role may do.
	#[must_use]
	pub fn permits(&self, action: Action) -> bool {
		match self {
			Session::Admin(_) | Session::Manager(_) => true,
			Session::Reception(_) => !matches!(action, Action::ViewDailyCheckIns),
		}
	}
}
