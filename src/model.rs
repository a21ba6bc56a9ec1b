//! Canonical venue records.
//!
//! Every flow that touches guests or guestlists uses these shapes, whether the
//! guest came from the member registry or was typed in at the door.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mint a fresh record identifier.
#[must_use]
pub fn new_id() -> String {
	Uuid::new_v4().to_string()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
	#[default]
	Active,
	Inactive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
	pub id: String,
	pub created_at: DateTime<Utc>,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub phone: String,
	#[serde(default)]
	pub membership_status: MembershipStatus,
	#[serde(default)]
	pub inactive_since: Option<DateTime<Utc>>,
	#[serde(default)]
	pub last_visit: Option<DateTime<Utc>>,
	#[serde(default)]
	pub notes: Option<String>,
	#[serde(default)]
	pub mailing_list: bool,
	#[serde(default)]
	pub photo_url: Option<String>,
}

impl Member {
	#[must_use]
	pub fn full_name(&self) -> String {
		format!("{} {}", self.first_name, self.last_name)
	}
}

/// Fields supplied when registering a member.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewMember {
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub phone: String,
	pub notes: Option<String>,
	pub membership_status: MembershipStatus,
	pub mailing_list: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestlistStatus {
	#[default]
	Active,
	Completed,
	Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guestlist {
	pub id: String,
	pub created_at: DateTime<Utc>,
	pub date: NaiveDate,
	pub name: String,
	#[serde(default)]
	pub notes: Option<String>,
	#[serde(default)]
	pub status: GuestlistStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewGuestlist {
	pub date: NaiveDate,
	pub name: String,
	pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guest {
	pub id: String,
	pub created_at: DateTime<Utc>,
	pub guestlist_id: String,
	#[serde(default)]
	pub member_id: Option<String>,
	pub first_name: String,
	pub last_name: String,
	#[serde(default)]
	pub email: Option<String>,
	#[serde(default)]
	pub phone: Option<String>,
	#[serde(default)]
	pub checked_in: bool,
	#[serde(default)]
	pub checked_in_time: Option<DateTime<Utc>>,
	#[serde(default)]
	pub mailing_list: bool,
}

impl Guest {
	#[must_use]
	pub fn full_name(&self) -> String {
		format!("{} {}", self.first_name, self.last_name)
	}
}

/// Guest entry before it is attached to a stored guestlist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewGuest {
	pub member_id: Option<String>,
	pub first_name: String,
	pub last_name: String,
	pub email: Option<String>,
	pub phone: Option<String>,
	pub mailing_list: bool,
}

impl NewGuest {
	/// Guest entry copied from a registered member.
	#[must_use]
	pub fn from_member(member: &Member) -> Self {
		Self {
			member_id: Some(member.id.clone()),
			first_name: member.first_name.clone(),
			last_name: member.last_name.clone(),
			email: non_empty(&member.email),
			phone: non_empty(&member.phone),
			mailing_list: member.mailing_list,
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckIn {
	pub id: String,
	pub created_at: DateTime<Utc>,
	pub member_id: String,
	#[serde(default)]
	pub guestlist_id: Option<String>,
	pub check_in_time: DateTime<Utc>,
	#[serde(default)]
	pub check_out_time: Option<DateTime<Utc>>,
}

/// Check-in joined with the member's display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CheckInEntry {
	pub id: String,
	pub member_id: String,
	pub first_name: String,
	pub last_name: String,
	pub check_in_time: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	Reception,
	Manager,
	Admin,
}

impl Role {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Role::Reception => "reception",
			Role::Manager => "manager",
			Role::Admin => "admin",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected reception, manager or admin)")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
	type Err = UnknownRole;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		match value.trim().to_ascii_lowercase().as_str() {
			"reception" => Ok(Role::Reception),
			"manager" => Ok(Role::Manager),
			"admin" => Ok(Role::Admin),
			_ => Err(UnknownRole(value.to_string())),
		}
	}
}

/// Staff account as stored in the profiles table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
	pub id: String,
	pub email: String,
	pub role: Role,
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
	let trimmed = value.trim();
	(!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn guest_from_member_drops_blank_contact_fields() {
		let member = Member {
			id: "m1".into(),
			created_at: Utc::now(),
			first_name: "Ada".into(),
			last_name: "Lovelace".into(),
			email: "  ".into(),
			phone: "555-0100".into(),
			membership_status: MembershipStatus::Active,
			inactive_since: None,
			last_visit: None,
			notes: None,
			mailing_list: true,
			photo_url: None,
		};

		let guest = NewGuest::from_member(&member);
		assert_eq!(guest.member_id.as_deref(), Some("m1"));
		assert_eq!(guest.email, None);
		assert_eq!(guest.phone.as_deref(), Some("555-0100"));
		assert!(guest.mailing_list);
	}

	#[test]
	fn records_use_lowercase_enum_tags() {
		let json = serde_json::to_string(&GuestlistStatus::Cancelled).unwrap();
		assert_eq!(json, "\"cancelled\"");
		let role: Role = serde_json::from_str("\"manager\"").unwrap();
		assert_eq!(role, Role::Manager);
	}

	#[test]
	fn roles_parse_case_insensitively() {
		assert_eq!(" Admin ".parse::<Role>(), Ok(Role::Admin));
		assert_eq!(
			"owner".parse::<Role>(),
			Err(UnknownRole("owner".to_string()))
		);
	}
}
