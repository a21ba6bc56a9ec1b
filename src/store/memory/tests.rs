use chrono::{Duration, TimeZone};
use tempfile::tempdir;

use super::*;
use crate::model::MembershipStatus;

fn at(hour: u32) -> DateTime<Utc> {
	Utc.with_ymd_and_hms(2026, 3, 14, hour, 0, 0).unwrap()
}

fn new_member(first: &str, last: &str, email: &str) -> NewMember {
	NewMember {
		first_name: first.into(),
		last_name: last.into(),
		email: email.into(),
		phone: String::new(),
		notes: None,
		membership_status: MembershipStatus::Active,
		mailing_list: false,
	}
}

fn seeded() -> MemoryStore {
	let store = MemoryStore::new();
	store
		.insert_member(new_member("Alison", "Zimmer", "az@example.com"), at(9))
		.unwrap();
	store
		.insert_member(new_member("Alice", "Archer", "aa@example.com"), at(10))
		.unwrap();
	store
		.insert_member(new_member("Bob", "Malice", "bob@example.com"), at(11))
		.unwrap();
	store
}

#[test]
fn suggestions_match_names_case_insensitively_in_last_name_order() {
	let store = seeded();
	let names: Vec<String> = store
		.suggest_members("ALI", 5)
		.unwrap()
		.iter()
		.map(Member::full_name)
		.collect();
	assert_eq!(names, vec!["Alice Archer", "Bob Malice", "Alison Zimmer"]);

	let capped = store.suggest_members("ali", 2).unwrap();
	assert_eq!(capped.len(), 2);
	assert!(store.suggest_members("zzz", 5).unwrap().is_empty());
}

#[test]
fn full_search_covers_contact_fields_and_orders_by_last_visit() {
	let store = seeded();
	let bob = store.search_members("bob@").unwrap();
	assert_eq!(bob.len(), 1);

	let everyone = store.search_members("example.com").unwrap();
	let firsts: Vec<&str> = everyone.iter().map(|m| m.first_name.as_str()).collect();
	assert_eq!(firsts, vec!["Bob", "Alice", "Alison"]);
}

#[test]
fn check_in_updates_last_visit_and_occupancy() {
	let store = seeded();
	let member = store.search_members("bob").unwrap().remove(0);

	let visit = store.check_in_member(&member.id, at(20)).unwrap();
	assert_eq!(store.member(&member.id).unwrap().last_visit, Some(at(20)));
	assert_eq!(store.count_in_venue(at(0)).unwrap(), 1);
	assert_eq!(store.count_in_venue(at(21)).unwrap(), 0);

	store.check_out(&visit.id, at(23)).unwrap();
	assert_eq!(store.count_in_venue(at(0)).unwrap(), 0);
	assert!(matches!(
		store.check_out(&visit.id, at(23)),
		Err(StoreError::Conflict(_))
	));
}

#[test]
fn unknown_member_check_in_is_not_found() {
	let store = MemoryStore::new();
	let err = store.check_in_member("missing", at(1)).unwrap_err();
	assert!(matches!(
		err,
		StoreError::NotFound {
			table: Table::Members,
			..
		}
	));
	assert_eq!(err.to_string(), "members record 'missing' not found");
}

#[test]
fn check_ins_since_lists_newest_first() {
	let store = seeded();
	let members = store.search_members("example").unwrap();
	store.check_in_member(&members[0].id, at(18)).unwrap();
	store.check_in_member(&members[1].id, at(19)).unwrap();
	store
		.check_in_member(&members[2].id, at(19) - Duration::days(1))
		.unwrap();

	let entries = store.check_ins_since(at(0)).unwrap();
	assert_eq!(entries.len(), 2);
	assert_eq!(entries[0].check_in_time, at(19));
}

#[test]
fn mutations_notify_subscribers() {
	let store = MemoryStore::new();
	let events = store.subscribe();
	store
		.insert_member(new_member("Cy", "Young", "cy@example.com"), at(1))
		.unwrap();

	let event = events.try_recv().unwrap();
	assert_eq!(event.table, Table::Members);
	assert_eq!(event.kind, ChangeKind::Insert);

	drop(events);
	store
		.insert_member(new_member("Di", "Young", "di@example.com"), at(2))
		.unwrap();
	assert!(store.subscribers.lock().is_empty());
}

#[test]
fn guests_attach_to_existing_guestlists_only() {
	let store = MemoryStore::new();
	let date = at(0).date_naive();
	let list = store
		.insert_guestlist(
			NewGuestlist {
				date,
				name: "Friday".into(),
				notes: None,
			},
			at(1),
		)
		.unwrap();
	let guest = NewGuest {
		first_name: "Eve".into(),
		last_name: "Adams".into(),
		..NewGuest::default()
	};

	let stored = store.insert_guests(&list.id, vec![guest.clone()], at(2)).unwrap();
	assert_eq!(store.guests_for(&list.id).unwrap(), stored);
	assert!(store.insert_guests("nope", vec![guest], at(2)).is_err());
	assert_eq!(store.active_guestlist_on(date).unwrap(), Some(list));

	let toggled = store.set_guest_checked_in(&stored[0].id, true, at(3)).unwrap();
	assert!(toggled.checked_in);
	assert_eq!(toggled.checked_in_time, Some(at(3)));
}

#[test]
fn data_file_round_trips_through_open() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("nested").join("venue.json");

	let store = MemoryStore::open(&path).unwrap();
	assert!(store.snapshot().members.is_empty());
	store
		.insert_member(new_member("Fay", "Wray", "fay@example.com"), at(5))
		.unwrap();

	let reopened = MemoryStore::open(&path).unwrap();
	assert_eq!(reopened.snapshot(), store.snapshot());
	assert_eq!(reopened.path(), Some(path.as_path()));
}

#[test]
fn corrupt_data_file_reports_path() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("venue.json");
	fs::write(&path, "{not json").unwrap();

	let err = MemoryStore::open(&path).err().expect("open should fail");
	assert!(matches!(err, StoreError::Serialization { .. }));
	assert!(err.to_string().contains("venue.json"));
}

#[test]
fn failed_write_leaves_tables_and_subscribers_untouched() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("venue.json");
	let store = MemoryStore::open(&path).unwrap();
	let events = store.subscribe();

	// A directory in the staging file's place makes the write fail.
	fs::create_dir(path.with_extension("json.tmp")).unwrap();
	let err = store
		.insert_member(new_member("Nico", "Paffgen", "nico@example.com"), at(8))
		.unwrap_err();
	assert!(matches!(err, StoreError::Io { .. }));
	assert!(store.snapshot().members.is_empty());
	assert!(store.suggest_members("nico", 5).unwrap().is_empty());
	assert!(events.try_recv().is_err());

	fs::remove_dir(path.with_extension("json.tmp")).unwrap();
	store
		.insert_member(new_member("Moe", "Tucker", "moe@example.com"), at(9))
		.unwrap();
	let on_disk = MemoryStore::open(&path).unwrap().snapshot();
	let names: Vec<String> = on_disk.members.iter().map(Member::full_name).collect();
	assert_eq!(names, vec!["Moe Tucker"]);
	assert!(events.try_recv().is_ok());
}
