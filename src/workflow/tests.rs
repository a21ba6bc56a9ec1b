use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, Utc};
use frontdesk::model::{NewMember, Role};
use frontdesk::store::{MemoryStore, VenueStore};

use super::{DeskWorkflow, Report};
use crate::cli::{AddMemberArgs, Command, CreateGuestlistArgs};
use crate::settings::{ResolvedConfig, SearchSettings};

fn config(role: Role) -> ResolvedConfig {
	ResolvedConfig {
		search: SearchSettings {
			debounce: Duration::from_millis(300),
			min_query_len: 2,
			suggestion_limit: 5,
		},
		venue_name: "The Lantern".into(),
		data_file: PathBuf::from("/unused/venue.json"),
		role,
	}
}

fn seeded_store() -> Arc<MemoryStore> {
	let store = Arc::new(MemoryStore::new());
	for (first, last) in [("Alice", "Archer"), ("Alison", "Baker"), ("Bob", "Stone")] {
		store
			.insert_member(
				NewMember {
					first_name: first.into(),
					last_name: last.into(),
					..NewMember::default()
				},
				Utc::now(),
			)
			.unwrap();
	}
	store
}

fn workflow(store: &Arc<MemoryStore>, role: Role) -> DeskWorkflow {
	DeskWorkflow::with_store(store.clone(), config(role))
}

#[test]
fn no_command_reports_role_workspace() {
	let store = seeded_store();
	let report = workflow(&store, Role::Manager).run(None).unwrap();
	match report {
		Report::Workspace {
			venue,
			role,
			workspace,
		} => {
			assert_eq!(venue, "The Lantern");
			assert_eq!(role, Role::Manager);
			assert_eq!(workspace, "Manager");
		}
		other => panic!("unexpected report {other:?}"),
	}
}

#[test]
fn suggest_replays_typing_and_settles() {
	let store = seeded_store();
	let report = workflow(&store, Role::Reception)
		.run(Some(Command::Suggest { text: "ali".into() }))
		.unwrap();
	let Report::Suggestions {
		query,
		members,
		notices,
	} = report
	else {
		panic!("expected suggestions");
	};
	assert_eq!(query, "ali");
	let names: Vec<_> = members.iter().map(|m| m.first_name.as_str()).collect();
	assert_eq!(names, ["Alice", "Alison"]);
	assert!(notices.is_empty());
}

#[test]
fn suggest_below_threshold_is_empty() {
	let store = seeded_store();
	let report = workflow(&store, Role::Reception)
		.run(Some(Command::Suggest { text: "a".into() }))
		.unwrap();
	assert!(matches!(report, Report::Suggestions { members, .. } if members.is_empty()));
}

#[test]
fn reception_cannot_list_daily_check_ins() {
	let store = seeded_store();
	let err = workflow(&store, Role::Reception)
		.run(Some(Command::CheckIns))
		.unwrap_err();
	assert!(err.to_string().contains("view daily check-ins"));

	let report = workflow(&store, Role::Admin)
		.run(Some(Command::CheckIns))
		.unwrap();
	assert!(matches!(report, Report::CheckIns { .. }));
}

#[test]
fn check_in_updates_occupancy() {
	let store = seeded_store();
	let member_id = store.suggest_members("bob", 1).unwrap()[0].id.clone();
	let mut desk = workflow(&store, Role::Reception);

	let report = desk.run(Some(Command::CheckIn { member_id })).unwrap();
	assert!(matches!(report, Report::CheckedIn { ref member, .. } if member.first_name == "Bob"));

	let report = desk.run(Some(Command::Occupancy)).unwrap();
	assert!(matches!(report, Report::Occupancy { count: 1, .. }));
}

#[test]
fn add_member_with_guestlist_date_and_toggle_guest() {
	let store = seeded_store();
	let date = Utc::now().date_naive().checked_add_days(Days::new(2)).unwrap();
	let mut desk = workflow(&store, Role::Reception);

	let report = desk
		.run(Some(Command::AddMember(AddMemberArgs {
			first_name: "Nina".into(),
			last_name: "Simone".into(),
			email: String::new(),
			phone: String::new(),
			notes: String::new(),
			mailing_list: true,
			guestlist_date: Some(date),
		})))
		.unwrap();
	let Report::Registered {
		guest: Some(guest), ..
	} = report
	else {
		panic!("expected a guestlist entry");
	};

	let report = desk
		.run(Some(Command::ToggleGuest {
			guestlist_id: guest.guestlist_id.clone(),
			guest_id: guest.id.clone(),
		}))
		.unwrap();
	assert!(matches!(report, Report::Guest { guest } if guest.checked_in));
}

#[test]
fn create_guestlist_combines_members_and_new_guests() {
	let store = seeded_store();
	let alice = store.suggest_members("alice", 1).unwrap()[0].id.clone();
	let date = Utc::now().date_naive();

	let report = workflow(&store, Role::Manager)
		.run(Some(Command::CreateGuestlist(CreateGuestlistArgs {
			name: "Late show".into(),
			date,
			notes: String::new(),
			members: vec![alice.clone(), alice],
			guests: vec!["Sun Ra".into()],
		})))
		.unwrap();
	let Report::Guestlist { guestlist, guests } = report else {
		panic!("expected guestlist");
	};
	assert_eq!(guestlist.name, "Late show");
	assert_eq!(guests.len(), 2);
}

#[test]
fn walk_in_needs_two_names() {
	let store = seeded_store();
	let mut desk = workflow(&store, Role::Reception);
	assert!(desk.run(Some(Command::WalkIn { name: "Prince".into() })).is_err());

	let report = desk
		.run(Some(Command::WalkIn {
			name: "Grace Jones".into(),
		}))
		.unwrap();
	assert!(matches!(report, Report::Guest { guest } if guest.checked_in));
}
