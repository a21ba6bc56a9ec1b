use std::cmp::Reverse;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ChangeEvent, ChangeKind, StoreError, StoreResult, Table, VenueStore};
use crate::model::{
	CheckIn, CheckInEntry, Guest, Guestlist, GuestlistStatus, Member, NewGuest, NewGuestlist,
	NewMember, new_id,
};

/// Serialized form of every table, as written to the data file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
	pub members: Vec<Member>,
	pub guestlists: Vec<Guestlist>,
	pub guests: Vec<Guest>,
	pub check_ins: Vec<CheckIn>,
}

/// In-memory [`VenueStore`], optionally mirrored to a JSON file after every
/// mutation.
pub struct MemoryStore {
	tables: RwLock<Snapshot>,
	subscribers: Mutex<Vec<Sender<ChangeEvent>>>,
	path: Option<PathBuf>,
}

impl MemoryStore {
	#[must_use]
	pub fn new() -> Self {
		Self::from_snapshot(Snapshot::default())
	}

	#[must_use]
	pub fn from_snapshot(snapshot: Snapshot) -> Self {
		Self {
			tables: RwLock::new(snapshot),
			subscribers: Mutex::new(Vec::new()),
			path: None,
		}
	}

	/// Load tables from `path`, starting empty when the file does not exist
	/// yet. Mutations are written back to the same file.
	pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
		let path = path.into();
		let snapshot = match fs::read_to_string(&path) {
			Ok(contents) => {
				serde_json::from_str(&contents).map_err(|source| StoreError::Serialization {
					path: path.clone(),
					source,
				})?
			}
			Err(err) if err.kind() == ErrorKind::NotFound => {
				debug!(path = %path.display(), "data file missing, starting empty");
				Snapshot::default()
			}
			Err(source) => return Err(StoreError::Io { path, source }),
		};

		Ok(Self {
			path: Some(path),
			..Self::from_snapshot(snapshot)
		})
	}

	#[must_use]
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	#[must_use]
	pub fn snapshot(&self) -> Snapshot {
		self.tables.read().clone()
	}

	fn read<R>(&self, f: impl FnOnce(&Snapshot) -> StoreResult<R>) -> StoreResult<R> {
		f(&self.tables.read())
	}

	/// Apply `f` to a copy of the tables; the copy replaces the live tables
	/// only once it has been written to the data file.
	fn mutate<R>(
		&self,
		table: Table,
		kind: ChangeKind,
		f: impl FnOnce(&mut Snapshot) -> StoreResult<R>,
	) -> StoreResult<R> {
		let result = {
			let mut tables = self.tables.write();
			let mut staged = tables.clone();
			let result = f(&mut staged)?;
			if let Some(path) = &self.path {
				persist(path, &staged)?;
			}
			*tables = staged;
			result
		};
		self.notify(ChangeEvent { table, kind });
		Ok(result)
	}

	fn notify(&self, event: ChangeEvent) {
		self.subscribers
			.lock()
			.retain(|subscriber| subscriber.send(event).is_ok());
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

fn persist(path: &Path, snapshot: &Snapshot) -> StoreResult<()> {
	let contents =
		serde_json::to_string_pretty(snapshot).map_err(|source| StoreError::Serialization {
			path: path.to_path_buf(),
			source,
		})?;
	if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
		fs::create_dir_all(parent).map_err(|source| StoreError::Io {
			path: parent.to_path_buf(),
			source,
		})?;
	}
	let staging = path.with_extension("json.tmp");
	fs::write(&staging, contents)
		.and_then(|()| fs::rename(&staging, path))
		.map_err(|source| StoreError::Io {
			path: path.to_path_buf(),
			source,
		})
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(needle)
}

fn name_matches(member: &Member, needle: &str) -> bool {
	contains_ci(&member.first_name, needle) || contains_ci(&member.last_name, needle)
}

fn find_member<'a>(tables: &'a Snapshot, id: &str) -> StoreResult<&'a Member> {
	tables
		.members
		.iter()
		.find(|member| member.id == id)
		.ok_or_else(|| StoreError::not_found(Table::Members, id))
}

impl VenueStore for MemoryStore {
	fn suggest_members(&self, term: &str, limit: usize) -> StoreResult<Vec<Member>> {
		let needle = term.trim().to_lowercase();
		self.read(|tables| {
			let mut matches: Vec<Member> = tables
				.members
				.iter()
				.filter(|member| name_matches(member, &needle))
				.cloned()
				.collect();
			matches.sort_by(|a, b| {
				a.last_name
					.to_lowercase()
					.cmp(&b.last_name.to_lowercase())
					.then_with(|| a.first_name.to_lowercase().cmp(&b.first_name.to_lowercase()))
			});
			matches.truncate(limit);
			Ok(matches)
		})
	}

	fn search_members(&self, term: &str) -> StoreResult<Vec<Member>> {
		let needle = term.trim().to_lowercase();
		self.read(|tables| {
			let mut matches: Vec<Member> = tables
				.members
				.iter()
				.filter(|member| {
					name_matches(member, &needle)
						|| contains_ci(&member.email, &needle)
						|| contains_ci(&member.phone, &needle)
				})
				.cloned()
				.collect();
			// `None` sorts below `Some`, so members who never visited land last.
			matches.sort_by_key(|member| Reverse(member.last_visit));
			Ok(matches)
		})
	}

	fn member(&self, id: &str) -> StoreResult<Member> {
		self.read(|tables| find_member(tables, id).cloned())
	}

	fn insert_member(&self, member: NewMember, at: DateTime<Utc>) -> StoreResult<Member> {
		self.mutate(Table::Members, ChangeKind::Insert, |tables| {
			let record = Member {
				id: new_id(),
				created_at: at,
				first_name: member.first_name,
				last_name: member.last_name,
				email: member.email,
				phone: member.phone,
				membership_status: member.membership_status,
				inactive_since: None,
				last_visit: Some(at),
				notes: member.notes,
				mailing_list: member.mailing_list,
				photo_url: None,
			};
			info!(member = %record.id, "registered member");
			tables.members.push(record.clone());
			Ok(record)
		})
	}

	fn update_member(&self, member: Member) -> StoreResult<Member> {
		self.mutate(Table::Members, ChangeKind::Update, |tables| {
			let slot = tables
				.members
				.iter_mut()
				.find(|existing| existing.id == member.id)
				.ok_or_else(|| StoreError::not_found(Table::Members, member.id.clone()))?;
			*slot = member.clone();
			Ok(member)
		})
	}

	fn check_in_member(&self, member_id: &str, at: DateTime<Utc>) -> StoreResult<CheckIn> {
		self.mutate(Table::CheckIns, ChangeKind::Insert, |tables| {
			let member = tables
				.members
				.iter_mut()
				.find(|member| member.id == member_id)
				.ok_or_else(|| StoreError::not_found(Table::Members, member_id))?;
			member.last_visit = Some(at);

			let record = CheckIn {
				id: new_id(),
				created_at: at,
				member_id: member_id.to_string(),
				guestlist_id: None,
				check_in_time: at,
				check_out_time: None,
			};
			info!(member = member_id, check_in = %record.id, "checked in member");
			tables.check_ins.push(record.clone());
			Ok(record)
		})
	}

	fn check_out(&self, check_in_id: &str, at: DateTime<Utc>) -> StoreResult<CheckIn> {
		self.mutate(Table::CheckIns, ChangeKind::Update, |tables| {
			let record = tables
				.check_ins
				.iter_mut()
				.find(|record| record.id == check_in_id)
				.ok_or_else(|| StoreError::not_found(Table::CheckIns, check_in_id))?;
			if record.check_out_time.is_some() {
				return Err(StoreError::Conflict(format!(
					"check-in '{check_in_id}' is already checked out"
				)));
			}
			record.check_out_time = Some(at);
			Ok(record.clone())
		})
	}

	fn count_in_venue(&self, since: DateTime<Utc>) -> StoreResult<u64> {
		self.read(|tables| {
			let count = tables
				.check_ins
				.iter()
				.filter(|record| record.check_in_time >= since && record.check_out_time.is_none())
				.count();
			Ok(count as u64)
		})
	}

	fn check_ins_since(&self, since: DateTime<Utc>) -> StoreResult<Vec<CheckInEntry>> {
		self.read(|tables| {
			let mut entries = Vec::new();
			for record in tables
				.check_ins
				.iter()
				.filter(|record| record.check_in_time >= since)
			{
				let member = find_member(tables, &record.member_id)?;
				entries.push(CheckInEntry {
					id: record.id.clone(),
					member_id: member.id.clone(),
					first_name: member.first_name.clone(),
					last_name: member.last_name.clone(),
					check_in_time: record.check_in_time,
				});
			}
			entries.sort_by_key(|entry| Reverse(entry.check_in_time));
			Ok(entries)
		})
	}

	fn guestlists(&self) -> StoreResult<Vec<Guestlist>> {
		self.read(|tables| {
			let mut lists = tables.guestlists.clone();
			lists.sort_by_key(|list| Reverse(list.date));
			Ok(lists)
		})
	}

	fn guestlists_on(&self, date: NaiveDate) -> StoreResult<Vec<Guestlist>> {
		self.read(|tables| {
			Ok(tables
				.guestlists
				.iter()
				.filter(|list| list.date == date)
				.cloned()
				.collect())
		})
	}

	fn active_guestlist_on(&self, date: NaiveDate) -> StoreResult<Option<Guestlist>> {
		self.read(|tables| {
			Ok(tables
				.guestlists
				.iter()
				.find(|list| list.date == date && list.status == GuestlistStatus::Active)
				.cloned())
		})
	}

	fn guestlist(&self, id: &str) -> StoreResult<Guestlist> {
		self.read(|tables| {
			tables
				.guestlists
				.iter()
				.find(|list| list.id == id)
				.cloned()
				.ok_or_else(|| StoreError::not_found(Table::Guestlists, id))
		})
	}

	fn insert_guestlist(
		&self,
		guestlist: NewGuestlist,
		at: DateTime<Utc>,
	) -> StoreResult<Guestlist> {
		self.mutate(Table::Guestlists, ChangeKind::Insert, |tables| {
			let record = Guestlist {
				id: new_id(),
				created_at: at,
				date: guestlist.date,
				name: guestlist.name,
				notes: guestlist.notes,
				status: GuestlistStatus::Active,
			};
			info!(guestlist = %record.id, date = %record.date, "created guestlist");
			tables.guestlists.push(record.clone());
			Ok(record)
		})
	}

	fn insert_guests(
		&self,
		guestlist_id: &str,
		guests: Vec<NewGuest>,
		at: DateTime<Utc>,
	) -> StoreResult<Vec<Guest>> {
		self.mutate(Table::Guests, ChangeKind::Insert, |tables| {
			if !tables.guestlists.iter().any(|list| list.id == guestlist_id) {
				return Err(StoreError::not_found(Table::Guestlists, guestlist_id));
			}
			let records: Vec<Guest> = guests
				.into_iter()
				.map(|guest| Guest {
					id: new_id(),
					created_at: at,
					guestlist_id: guestlist_id.to_string(),
					member_id: guest.member_id,
					first_name: guest.first_name,
					last_name: guest.last_name,
					email: guest.email,
					phone: guest.phone,
					checked_in: false,
					checked_in_time: None,
					mailing_list: guest.mailing_list,
				})
				.collect();
			tables.guests.extend(records.iter().cloned());
			Ok(records)
		})
	}

	fn guests_for(&self, guestlist_id: &str) -> StoreResult<Vec<Guest>> {
		self.read(|tables| {
			Ok(tables
				.guests
				.iter()
				.filter(|guest| guest.guestlist_id == guestlist_id)
				.cloned()
				.collect())
		})
	}

	fn set_guest_checked_in(
		&self,
		guest_id: &str,
		checked_in: bool,
		at: DateTime<Utc>,
	) -> StoreResult<Guest> {
		self.mutate(Table::Guests, ChangeKind::Update, |tables| {
			let guest = tables
				.guests
				.iter_mut()
				.find(|guest| guest.id == guest_id)
				.ok_or_else(|| StoreError::not_found(Table::Guests, guest_id))?;
			guest.checked_in = checked_in;
			guest.checked_in_time = checked_in.then_some(at);
			Ok(guest.clone())
		})
	}

	fn subscribe(&self) -> Receiver<ChangeEvent> {
		let (tx, rx) = mpsc::channel();
		self.subscribers.lock().push(tx);
		rx
	}
}

#[cfg(test)]
mod tests;
