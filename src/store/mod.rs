//! Data access for venue records.
//!
//! [`VenueStore`] is the seam between the front-of-house flows and whatever
//! holds the tables. [`MemoryStore`] keeps everything in memory and can
//! mirror it to a JSON file.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::model::{
	CheckIn, CheckInEntry, Guest, Guestlist, Member, NewGuest, NewGuestlist, NewMember,
};

mod memory;

pub use memory::{MemoryStore, Snapshot};

/// Tables a change notification or lookup error can refer to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Table {
	Members,
	Guestlists,
	Guests,
	CheckIns,
}

impl fmt::Display for Table {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Table::Members => "members",
			Table::Guestlists => "guestlists",
			Table::Guests => "guests",
			Table::CheckIns => "check_ins",
		})
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
	Insert,
	Update,
}

/// Row-change notification broadcast to subscribers after every mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
	pub table: Table,
	pub kind: ChangeKind,
}

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("{table} record '{id}' not found")]
	NotFound { table: Table, id: String },

	#[error("conflicting update: {0}")]
	Conflict(String),

	#[error("failed to access data file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("invalid data file {path}: {source}")]
	Serialization {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

impl StoreError {
	pub fn not_found(table: Table, id: impl Into<String>) -> Self {
		Self::NotFound {
			table,
			id: id.into(),
		}
	}
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Operations the front desk performs against the venue tables.
pub trait VenueStore: Send + Sync {
	/// Name matches for the suggestion dropdown, ordered by last name.
	fn suggest_members(&self, term: &str, limit: usize) -> StoreResult<Vec<Member>>;

	/// Name, email or phone matches, most recent visitors first.
	fn search_members(&self, term: &str) -> StoreResult<Vec<Member>>;

	fn member(&self, id: &str) -> StoreResult<Member>;

	fn insert_member(&self, member: NewMember, at: DateTime<Utc>) -> StoreResult<Member>;

	fn update_member(&self, member: Member) -> StoreResult<Member>;

	/// Record a visit and stamp the member's `last_visit`.
	fn check_in_member(&self, member_id: &str, at: DateTime<Utc>) -> StoreResult<CheckIn>;

	fn check_out(&self, check_in_id: &str, at: DateTime<Utc>) -> StoreResult<CheckIn>;

	/// Visitors checked in at or after `since` who have not checked out.
	fn count_in_venue(&self, since: DateTime<Utc>) -> StoreResult<u64>;

	/// Check-ins at or after `since`, newest first.
	fn check_ins_since(&self, since: DateTime<Utc>) -> StoreResult<Vec<CheckInEntry>>;

	/// All guestlists, newest date first.
	fn guestlists(&self) -> StoreResult<Vec<Guestlist>>;

	fn guestlists_on(&self, date: NaiveDate) -> StoreResult<Vec<Guestlist>>;

	fn active_guestlist_on(&self, date: NaiveDate) -> StoreResult<Option<Guestlist>>;

	fn guestlist(&self, id: &str) -> StoreResult<Guestlist>;

	fn insert_guestlist(&self, guestlist: NewGuestlist, at: DateTime<Utc>)
	-> StoreResult<Guestlist>;

	fn insert_guests(
		&self,
		guestlist_id: &str,
		guests: Vec<NewGuest>,
		at: DateTime<Utc>,
	) -> StoreResult<Vec<Guest>>;

	fn guests_for(&self, guestlist_id: &str) -> StoreResult<Vec<Guest>>;

	fn set_guest_checked_in(
		&self,
		guest_id: &str,
		checked_in: bool,
		at: DateTime<Utc>,
	) -> StoreResult<Guest>;

	/// Receive a [`ChangeEvent`] for every subsequent mutation.
	fn subscribe(&self) -> Receiver<ChangeEvent>;
}
