//! Member registration and visits.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use crate::forms::{SubmitError, check_email, require};
use crate::guestlist::ensure_guestlist_for;
use crate::model::{CheckIn, Guest, Member, MembershipStatus, NewGuest, NewMember, non_empty};
use crate::store::{StoreError, VenueStore};

/// Fields of the add-member form.
#[derive(Debug, Clone, Default)]
pub struct MemberForm {
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub phone: String,
	pub notes: String,
	pub membership_status: MembershipStatus,
	pub mailing_list: bool,
	/// Also put the new member on the active guestlist for this date.
	pub guestlist_date: Option<NaiveDate>,
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
	pub member: Member,
	pub guest: Option<Guest>,
}

impl MemberForm {
	/// Form pre-filled for editing an existing member.
	#[must_use]
	pub fn from_member(member: &Member) -> Self {
		Self {
			first_name: member.first_name.clone(),
			last_name: member.last_name.clone(),
			email: member.email.clone(),
			phone: member.phone.clone(),
			notes: member.notes.clone().unwrap_or_default(),
			membership_status: member.membership_status,
			mailing_list: member.mailing_list,
			guestlist_date: None,
		}
	}

	pub fn validate(&self) -> Result<NewMember, SubmitError> {
		Ok(NewMember {
			first_name: require(&self.first_name, "first name")?,
			last_name: require(&self.last_name, "last name")?,
			email: check_email(&self.email)?,
			phone: self.phone.trim().to_string(),
			notes: non_empty(&self.notes),
			membership_status: self.membership_status,
			mailing_list: self.mailing_list,
		})
	}

	pub fn submit(
		&self,
		store: &dyn VenueStore,
		at: DateTime<Utc>,
	) -> Result<Registration, SubmitError> {
		let member = store.insert_member(self.validate()?, at)?;

		let guest = match self.guestlist_date {
			Some(date) => {
				let list = ensure_guestlist_for(store, date, at)?;
				let mut added = store.insert_guests(&list.id, vec![NewGuest::from_member(&member)], at)?;
				info!(member = %member.id, guestlist = %list.id, "added new member to guestlist");
				added.pop()
			}
			None => None,
		};

		Ok(Registration { member, guest })
	}

	/// Write the form back over `member_id`. Deactivating stamps
	/// `inactive_since`; reactivating clears it.
	pub fn save_edit(
		&self,
		store: &dyn VenueStore,
		member_id: &str,
		at: DateTime<Utc>,
	) -> Result<Member, SubmitError> {
		let fields = self.validate()?;
		let current = store.member(member_id)?;
		let inactive_since = match fields.membership_status {
			MembershipStatus::Active => None,
			MembershipStatus::Inactive => current.inactive_since.or(Some(at)),
		};
		let updated = Member {
			first_name: fields.first_name,
			last_name: fields.last_name,
			email: fields.email,
			phone: fields.phone,
			notes: fields.notes,
			membership_status: fields.membership_status,
			mailing_list: fields.mailing_list,
			inactive_since,
			..current
		};
		let saved = store.update_member(updated)?;
		info!(member = %saved.id, "updated member");
		Ok(saved)
	}
}

/// Check a member in, refusing inactive memberships.
pub fn check_in(
	store: &dyn VenueStore,
	member_id: &str,
	at: DateTime<Utc>,
) -> Result<CheckIn, SubmitError> {
	let member = store.member(member_id)?;
	if member.membership_status == MembershipStatus::Inactive {
		return Err(StoreError::Conflict(format!(
			"{} has an inactive membership",
			member.full_name()
		))
		.into());
	}
	Ok(store.check_in_member(member_id, at)?)
}

#[cfg(test)]
mod tests {
	use chrono::TimeZone;

	use super::*;
	use crate::forms::FormError;
	use crate::store::MemoryStore;

	fn at(day: u32) -> DateTime<Utc> {
		Utc.with_ymd_and_hms(2026, 4, day, 18, 0, 0).unwrap()
	}

	fn form(first: &str, last: &str) -> MemberForm {
		MemberForm {
			first_name: first.into(),
			last_name: last.into(),
			email: format!("{}@example.com", first.to_lowercase()),
			..MemberForm::default()
		}
	}

	#[test]
	fn registration_requires_names_and_valid_email() {
		let store = MemoryStore::new();
		let err = form("", "Smith").submit(&store, at(1)).unwrap_err();
		assert!(matches!(err, SubmitError::Invalid(FormError::Missing("first name"))));

		let mut bad_email = form("Jo", "Smith");
		bad_email.email = "jo-at-example".into();
		assert!(matches!(
			bad_email.submit(&store, at(1)),
			Err(SubmitError::Invalid(FormError::InvalidEmail(_)))
		));
		assert!(store.snapshot().members.is_empty());
	}

	#[test]
	fn registration_joins_existing_or_new_guestlist() {
		let store = MemoryStore::new();
		let date = at(3).date_naive();
		let mut first = form("Kim", "Gordon");
		first.guestlist_date = Some(date);
		let mut second = form("Thurston", "Moore");
		second.guestlist_date = Some(date);

		let a = first.submit(&store, at(1)).unwrap();
		let b = second.submit(&store, at(2)).unwrap();

		let a_guest = a.guest.expect("guest entry");
		let b_guest = b.guest.expect("guest entry");
		assert_eq!(a_guest.guestlist_id, b_guest.guestlist_id);
		assert_eq!(a_guest.member_id.as_deref(), Some(a.member.id.as_str()));
		assert_eq!(store.guestlists_on(date).unwrap().len(), 1);
		assert_eq!(a.member.last_visit, Some(at(1)));
	}

	#[test]
	fn inactive_members_cannot_check_in() {
		let store = MemoryStore::new();
		let mut inactive = form("Lou", "Reed");
		inactive.membership_status = MembershipStatus::Inactive;
		let member = inactive.submit(&store, at(1)).unwrap().member;

		let err = check_in(&store, &member.id, at(2)).unwrap_err();
		assert!(matches!(err, SubmitError::Store(StoreError::Conflict(_))));

		let active = form("Moe", "Tucker").submit(&store, at(1)).unwrap().member;
		let visit = check_in(&store, &active.id, at(2)).unwrap();
		assert_eq!(visit.member_id, active.id);
	}

	#[test]
	fn deactivating_stamps_inactive_since_once() {
		let store = MemoryStore::new();
		let member = form("Patti", "Smith").submit(&store, at(1)).unwrap().member;

		let mut edit = MemberForm::from_member(&member);
		edit.membership_status = MembershipStatus::Inactive;
		edit.phone = " 555-0199 ".into();
		let saved = edit.save_edit(&store, &member.id, at(2)).unwrap();
		assert_eq!(saved.inactive_since, Some(at(2)));
		assert_eq!(saved.phone, "555-0199");
		assert_eq!(saved.created_at, member.created_at);

		let again = edit.save_edit(&store, &member.id, at(3)).unwrap();
		assert_eq!(again.inactive_since, Some(at(2)));

		edit.membership_status = MembershipStatus::Active;
		let reactivated = edit.save_edit(&store, &member.id, at(4)).unwrap();
		assert_eq!(reactivated.inactive_since, None);
	}
}
