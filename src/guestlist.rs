//! Guestlist creation, walk-ins and the guestlist detail view.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use frontdesk_suggest::LatestLoader;
use tracing::{info, warn};

use crate::forms::{FormError, SubmitError, require};
use crate::model::{Guest, Guestlist, Member, NewGuest, NewGuestlist, non_empty};
use crate::store::{StoreError, StoreResult, Table, VenueStore};

/// Name given to a guestlist when staff do not choose one.
#[must_use]
pub fn default_name(date: NaiveDate) -> String {
	format!("Guestlist for {}", date.format("%B %-d, %Y"))
}

/// Guest typed in by hand, e.g. `"Mary Jane Watson"` becomes first name
/// `Mary`, last name `Jane Watson`. Names without a last part are rejected.
#[must_use]
pub fn guest_from_name(full_name: &str) -> Option<NewGuest> {
	let (first, last) = full_name.trim().split_once(char::is_whitespace)?;
	let last = last.trim();
	if last.is_empty() {
		return None;
	}
	Some(NewGuest {
		first_name: first.to_string(),
		last_name: last.to_string(),
		..NewGuest::default()
	})
}

/// Return the active guestlist for `date`, creating one when none exists.
pub fn ensure_guestlist_for(
	store: &dyn VenueStore,
	date: NaiveDate,
	at: DateTime<Utc>,
) -> StoreResult<Guestlist> {
	if let Some(existing) = store.active_guestlist_on(date)? {
		return Ok(existing);
	}
	store.insert_guestlist(
		NewGuestlist {
			date,
			name: default_name(date),
			notes: None,
		},
		at,
	)
}

/// Put a walk-in on the guestlist for `now`'s calendar day in its own time
/// zone and mark them checked in.
pub fn admit_walk_in<Tz: TimeZone>(
	store: &dyn VenueStore,
	guest: NewGuest,
	now: DateTime<Tz>,
) -> Result<Guest, SubmitError> {
	let first_name = require(&guest.first_name, "first name")?;
	let last_name = require(&guest.last_name, "last name")?;
	let at = now.with_timezone(&Utc);
	let list = ensure_guestlist_for(store, now.date_naive(), at)?;
	let guest = NewGuest {
		first_name,
		last_name,
		..guest
	};
	let stored = store
		.insert_guests(&list.id, vec![guest], at)?
		.pop()
		.ok_or_else(|| StoreError::Conflict("walk-in was not stored".into()))?;
	Ok(store.set_guest_checked_in(&stored.id, true, at)?)
}

/// Guestlist being assembled before it is saved.
#[derive(Debug, Clone)]
pub struct GuestlistDraft {
	pub name: String,
	pub date: Option<NaiveDate>,
	pub notes: String,
	members: Vec<Member>,
	guests: Vec<NewGuest>,
}

/// Stored guestlist together with the guests written alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestlistDetail {
	pub guestlist: Guestlist,
	pub guests: Vec<Guest>,
}

impl GuestlistDraft {
	#[must_use]
	pub fn new(date: NaiveDate) -> Self {
		Self {
			name: default_name(date),
			date: Some(date),
			notes: String::new(),
			members: Vec::new(),
			guests: Vec::new(),
		}
	}

	/// Add a registered member. Returns `false` if they are already listed.
	pub fn add_member(&mut self, member: Member) -> bool {
		if self.members.iter().any(|existing| existing.id == member.id) {
			return false;
		}
		self.members.push(member);
		true
	}

	pub fn remove_member(&mut self, member_id: &str) {
		self.members.retain(|member| member.id != member_id);
	}

	pub fn add_guest(&mut self, guest: NewGuest) {
		self.guests.push(guest);
	}

	pub fn remove_guest(&mut self, index: usize) -> Option<NewGuest> {
		(index < self.guests.len()).then(|| self.guests.remove(index))
	}

	#[must_use]
	pub fn members(&self) -> &[Member] {
		&self.members
	}

	#[must_use]
	pub fn guests(&self) -> &[NewGuest] {
		&self.guests
	}

	pub fn validate(&self) -> Result<NaiveDate, FormError> {
		require(&self.name, "name")?;
		self.date.ok_or(FormError::Missing("date"))
	}

	/// Save the guestlist, its member guests and every new guest with both
	/// names filled in.
	pub fn submit(
		self,
		store: &dyn VenueStore,
		at: DateTime<Utc>,
	) -> Result<GuestlistDetail, SubmitError> {
		let date = self.validate()?;
		let guestlist = store.insert_guestlist(
			NewGuestlist {
				date,
				name: self.name.trim().to_string(),
				notes: non_empty(&self.notes),
			},
			at,
		)?;

		let mut entries: Vec<NewGuest> = self.members.iter().map(NewGuest::from_member).collect();
		let before = self.guests.len();
		entries.extend(self.guests.into_iter().filter_map(|guest| {
			let first_name = guest.first_name.trim().to_string();
			let last_name = guest.last_name.trim().to_string();
			if first_name.is_empty() || last_name.is_empty() {
				return None;
			}
			Some(NewGuest {
				first_name,
				last_name,
				email: guest.email.as_deref().and_then(non_empty),
				phone: guest.phone.as_deref().and_then(non_empty),
				..guest
			})
		}));
		let skipped = before + self.members.len() - entries.len();
		if skipped > 0 {
			warn!(skipped, "dropped guests without a full name");
		}

		let guests = if entries.is_empty() {
			Vec::new()
		} else {
			store.insert_guests(&guestlist.id, entries, at)?
		};
		info!(guestlist = %guestlist.id, guests = guests.len(), "saved guestlist");
		Ok(GuestlistDetail { guestlist, guests })
	}
}

/// Detail screen for one guestlist.
///
/// Loads run in the background; opening another guestlist before the first
/// finishes discards the earlier load.
pub struct GuestlistViewer {
	store: Arc<dyn VenueStore>,
	loader: LatestLoader<GuestlistDetail, StoreError>,
	detail: Option<GuestlistDetail>,
	error: Option<StoreError>,
}

impl GuestlistViewer {
	pub fn new(store: Arc<dyn VenueStore>) -> Self {
		Self {
			store,
			loader: LatestLoader::new("guestlist"),
			detail: None,
			error: None,
		}
	}

	pub fn open(&mut self, guestlist_id: &str) {
		let store = Arc::clone(&self.store);
		let id = guestlist_id.to_string();
		self.loader.dispatch(move || {
			let guestlist = store.guestlist(&id)?;
			let guests = store.guests_for(&id)?;
			Ok(GuestlistDetail { guestlist, guests })
		});
	}

	#[must_use]
	pub fn detail(&self) -> Option<&GuestlistDetail> {
		self.detail.as_ref()
	}

	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.loader.is_loading()
	}

	/// Error from the latest load, if it failed.
	#[must_use]
	pub fn error(&self) -> Option<&StoreError> {
		self.error.as_ref()
	}

	pub fn pump(&mut self) -> bool {
		let mut changed = false;
		while let Some(outcome) = self.loader.try_next() {
			self.apply(outcome.result);
			changed = true;
		}
		changed
	}

	pub fn wait(&mut self, timeout: Duration) -> bool {
		match self.loader.wait_next(timeout) {
			Some(outcome) => {
				self.apply(outcome.result);
				true
			}
			None => false,
		}
	}

	fn apply(&mut self, result: Result<GuestlistDetail, StoreError>) {
		match result {
			Ok(detail) => {
				self.detail = Some(detail);
				self.error = None;
			}
			Err(error) => {
				warn!(%error, "failed to load guestlist");
				self.detail = None;
				self.error = Some(error);
			}
		}
	}

	/// Flip a guest's checked-in flag and update the loaded detail in place.
	pub fn toggle_guest(&mut self, guest_id: &str, at: DateTime<Utc>) -> StoreResult<Guest> {
		let currently = self
			.detail
			.as_ref()
			.and_then(|detail| detail.guests.iter().find(|guest| guest.id == guest_id))
			.map(|guest| guest.checked_in)
			.ok_or_else(|| StoreError::not_found(Table::Guests, guest_id))?;
		let updated = self.store.set_guest_checked_in(guest_id, !currently, at)?;
		if let Some(slot) = self
			.detail
			.as_mut()
			.and_then(|detail| detail.guests.iter_mut().find(|guest| guest.id == guest_id))
		{
			*slot = updated.clone();
		}
		Ok(updated)
	}
}

#[cfg(test)]
mod tests {
	use chrono::FixedOffset;

	use super::*;
	use crate::model::NewMember;
	use crate::occupancy::start_of_day;
	use crate::store::MemoryStore;

	const WAIT: Duration = Duration::from_secs(5);

	fn at(day: u32, hour: u32) -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
	}

	fn member(store: &MemoryStore, first: &str, last: &str) -> Member {
		store
			.insert_member(
				NewMember {
					first_name: first.into(),
					last_name: last.into(),
					email: format!("{}@example.com", first.to_lowercase()),
					..NewMember::default()
				},
				at(1, 9),
			)
			.unwrap()
	}

	#[test]
	fn default_name_spells_out_the_date() {
		let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
		assert_eq!(default_name(date), "Guestlist for March 7, 2026");
	}

	#[test]
	fn guest_names_split_on_first_space() {
		let guest = guest_from_name(" Mary Jane  Watson ").unwrap();
		assert_eq!(guest.first_name, "Mary");
		assert_eq!(guest.last_name, "Jane  Watson");
		assert!(guest_from_name("Cher").is_none());
	}

	#[test]
	fn draft_requires_name_and_date() {
		let mut draft = GuestlistDraft::new(at(1, 0).date_naive());
		draft.name = "  ".into();
		assert_eq!(draft.validate(), Err(FormError::Missing("name")));

		draft.name = "Launch".into();
		draft.date = None;
		assert_eq!(draft.validate(), Err(FormError::Missing("date")));
	}

	#[test]
	fn submit_dedupes_members_and_drops_blank_guests() {
		let store = MemoryStore::new();
		let ada = member(&store, "Ada", "Byron");
		let mut draft = GuestlistDraft::new(at(7, 0).date_naive());
		assert!(draft.add_member(ada.clone()));
		assert!(!draft.add_member(ada.clone()));
		draft.add_guest(NewGuest {
			first_name: "Walk".into(),
			last_name: "In".into(),
			email: Some("  ".into()),
			..NewGuest::default()
		});
		draft.add_guest(NewGuest {
			first_name: "Nameless".into(),
			..NewGuest::default()
		});

		let detail = draft.submit(&store, at(7, 12)).unwrap();
		assert_eq!(detail.guests.len(), 2);
		assert_eq!(detail.guests[0].member_id.as_deref(), Some(ada.id.as_str()));
		assert_eq!(detail.guests[1].email, None);
		assert_eq!(store.guests_for(&detail.guestlist.id).unwrap(), detail.guests);
	}

	#[test]
	fn walk_ins_reuse_the_days_active_guestlist() {
		let store = MemoryStore::new();
		let first = admit_walk_in(&store, guest_from_name("Ann Lee").unwrap(), at(9, 21)).unwrap();
		let second = admit_walk_in(&store, guest_from_name("Bo Diddley").unwrap(), at(9, 22)).unwrap();

		assert!(first.checked_in && second.checked_in);
		assert_eq!(first.guestlist_id, second.guestlist_id);
		assert_eq!(store.guestlists().unwrap().len(), 1);

		let err = admit_walk_in(&store, NewGuest::default(), at(9, 23)).unwrap_err();
		assert!(matches!(err, SubmitError::Invalid(FormError::Missing("first name"))));
	}

	#[test]
	fn late_walk_ins_land_on_the_local_day() {
		let store = MemoryStore::new();
		let eastern = FixedOffset::west_opt(5 * 3600).unwrap();
		let late = eastern.with_ymd_and_hms(2026, 3, 8, 21, 0, 0).unwrap();
		assert_eq!(late.with_timezone(&Utc).date_naive(), at(9, 0).date_naive());

		let guest = admit_walk_in(&store, guest_from_name("Lou Reed").unwrap(), late).unwrap();
		let list = store.guestlist(&guest.guestlist_id).unwrap();
		assert_eq!(list.date, NaiveDate::from_ymd_opt(2026, 3, 8).unwrap());
		assert_eq!(list.name, "Guestlist for March 8, 2026");
		assert_eq!(start_of_day(late), Utc.with_ymd_and_hms(2026, 3, 8, 5, 0, 0).unwrap());
		assert_eq!(guest.checked_in_time, Some(at(9, 2)));
	}

	#[test]
	fn viewer_shows_latest_opened_guestlist() {
		let store = Arc::new(MemoryStore::new());
		let friday = GuestlistDraft::new(at(6, 0).date_naive())
			.submit(store.as_ref(), at(5, 12))
			.unwrap();
		let mut saturday = GuestlistDraft::new(at(7, 0).date_naive());
		saturday.add_guest(guest_from_name("Cy Twombly").unwrap());
		let saturday = saturday.submit(store.as_ref(), at(5, 13)).unwrap();

		let mut viewer = GuestlistViewer::new(store.clone());
		viewer.open(&friday.guestlist.id);
		viewer.open(&saturday.guestlist.id);
		assert!(viewer.wait(WAIT));
		assert_eq!(viewer.detail(), Some(&saturday));

		let guest_id = saturday.guests[0].id.clone();
		let toggled = viewer.toggle_guest(&guest_id, at(7, 22)).unwrap();
		assert!(toggled.checked_in);
		assert!(viewer.detail().unwrap().guests[0].checked_in);
		let back = viewer.toggle_guest(&guest_id, at(7, 23)).unwrap();
		assert!(!back.checked_in);
	}

	#[test]
	fn viewer_reports_missing_guestlist() {
		let store = Arc::new(MemoryStore::new());
		let mut viewer = GuestlistViewer::new(store);
		viewer.open("missing");
		assert!(viewer.wait(WAIT));
		assert!(viewer.detail().is_none());
		assert!(matches!(viewer.error(), Some(StoreError::NotFound { .. })));
	}
}
