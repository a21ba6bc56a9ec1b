use chrono::NaiveDate;
use clap::builder::BoolishValueParser;
use clap::{Args, Subcommand};

use super::options::StatusArg;

/// Desk operations. Without a subcommand the binary reports the session's
/// workspace.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
	/// Type TEXT into the member search box and print the settled suggestions.
	Suggest {
		#[arg(value_name = "TEXT")]
		text: String,
	},
	/// Search members by name, email or phone.
	Search {
		#[arg(value_name = "TERM")]
		term: String,
	},
	/// Register a new member.
	AddMember(AddMemberArgs),
	/// Change details of an existing member.
	EditMember(EditMemberArgs),
	/// Check a member in.
	CheckIn {
		#[arg(value_name = "MEMBER_ID")]
		member_id: String,
	},
	/// Record a check-out for an earlier check-in.
	CheckOut {
		#[arg(value_name = "CHECK_IN_ID")]
		check_in_id: String,
	},
	/// Admit a walk-in guest by full name and check them in.
	WalkIn {
		#[arg(value_name = "NAME")]
		name: String,
	},
	/// Show how many visitors are in the venue right now.
	Occupancy,
	/// List today's check-ins.
	CheckIns,
	/// List guestlists, optionally for a single date.
	Guestlists {
		#[arg(long, value_name = "DATE")]
		date: Option<NaiveDate>,
	},
	/// Show a guestlist with its guests.
	Guestlist {
		#[arg(value_name = "ID")]
		id: String,
	},
	/// Create a guestlist from members and new guests.
	CreateGuestlist(CreateGuestlistArgs),
	/// Flip a guest's checked-in flag on a guestlist.
	ToggleGuest {
		#[arg(value_name = "GUESTLIST_ID")]
		guestlist_id: String,
		#[arg(value_name = "GUEST_ID")]
		guest_id: String,
	},
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct AddMemberArgs {
	#[arg(long = "first-name", value_name = "NAME")]
	pub(crate) first_name: String,
	#[arg(long = "last-name", value_name = "NAME")]
	pub(crate) last_name: String,
	#[arg(long, value_name = "EMAIL", default_value = "")]
	pub(crate) email: String,
	#[arg(long, value_name = "PHONE", default_value = "")]
	pub(crate) phone: String,
	#[arg(long, value_name = "TEXT", default_value = "")]
	pub(crate) notes: String,
	#[arg(long = "mailing-list")]
	pub(crate) mailing_list: bool,
	#[arg(
		long = "guestlist-date",
		value_name = "DATE",
		help = "Also add the member to the guestlist for DATE (YYYY-MM-DD)"
	)]
	pub(crate) guestlist_date: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct CreateGuestlistArgs {
	#[arg(long, value_name = "NAME")]
	pub(crate) name: String,
	#[arg(long, value_name = "DATE")]
	pub(crate) date: NaiveDate,
	#[arg(long, value_name = "TEXT", default_value = "")]
	pub(crate) notes: String,
	#[arg(long = "member", value_name = "MEMBER_ID")]
	pub(crate) members: Vec<String>,
	#[arg(long = "guest", value_name = "FIRST LAST")]
	pub(crate) guests: Vec<String>,
}

/// Fields left out keep their stored value.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub(crate) struct EditMemberArgs {
	#[arg(value_name = "MEMBER_ID")]
	pub(crate) member_id: String,
	#[arg(long = "first-name", value_name = "NAME")]
	pub(crate) first_name: Option<String>,
	#[arg(long = "last-name", value_name = "NAME")]
	pub(crate) last_name: Option<String>,
	#[arg(long, value_name = "EMAIL")]
	pub(crate) email: Option<String>,
	#[arg(long, value_name = "PHONE")]
	pub(crate) phone: Option<String>,
	#[arg(long, value_name = "TEXT")]
	pub(crate) notes: Option<String>,
	#[arg(long, value_enum)]
	pub(crate) status: Option<StatusArg>,
	#[arg(
		long = "mailing-list",
		value_name = "BOOL",
		value_parser = BoolishValueParser::new()
	)]
	pub(crate) mailing_list: Option<bool>,
}
