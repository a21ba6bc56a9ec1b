use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow, bail, ensure};
use chrono::{Local, Utc};
use frontdesk::context::AppContext;
use frontdesk::guestlist::{GuestlistDraft, GuestlistViewer, admit_walk_in, guest_from_name};
use frontdesk::members::{MemberForm, check_in};
use frontdesk::model::{CheckIn, CheckInEntry, Guest, Guestlist, Member, Profile, Role};
use frontdesk::occupancy::{OccupancyCounter, start_of_today};
use frontdesk::search::member_suggestions;
use frontdesk::session::{Action, Session};
use frontdesk::store::{MemoryStore, VenueStore};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{AddMemberArgs, Command, CreateGuestlistArgs, EditMemberArgs};
use crate::settings::ResolvedConfig;

/// Simulated gap between keystrokes when replaying `suggest` input.
const KEYSTROKE_INTERVAL: Duration = Duration::from_millis(80);
/// Longest wait for a background lookup before giving up.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of one desk operation, ready for plain or JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum Report {
	Workspace {
		venue: String,
		role: Role,
		workspace: &'static str,
	},
	Suggestions {
		query: String,
		members: Vec<Member>,
		notices: Vec<String>,
	},
	Members {
		members: Vec<Member>,
	},
	Registered {
		member: Member,
		guest: Option<Guest>,
	},
	MemberUpdated {
		member: Member,
	},
	CheckedIn {
		member: Member,
		check_in: CheckIn,
	},
	CheckedOut {
		check_in: CheckIn,
	},
	Guest {
		guest: Guest,
	},
	Occupancy {
		venue: String,
		count: u64,
	},
	CheckIns {
		check_ins: Vec<CheckInEntry>,
	},
	Guestlists {
		guestlists: Vec<Guestlist>,
	},
	Guestlist {
		guestlist: Guestlist,
		guests: Vec<Guest>,
	},
}

/// Runs desk commands for one staff session against the venue store.
pub(crate) struct DeskWorkflow {
	context: AppContext,
	config: ResolvedConfig,
}

impl DeskWorkflow {
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let store = MemoryStore::open(&config.data_file)
			.with_context(|| format!("failed to open venue data at {}", config.data_file.display()))?;
		Ok(Self::with_store(Arc::new(store), config))
	}

	pub(crate) fn with_store(store: Arc<dyn VenueStore>, config: ResolvedConfig) -> Self {
		let session = Session::from_profile(Profile {
			id: "local".into(),
			email: format!("{}@frontdesk.local", config.role.as_str()),
			role: config.role,
		});
		Self {
			context: AppContext::new(store, session),
			config,
		}
	}

	pub(crate) fn run(&mut self, command: Option<Command>) -> Result<Report> {
		let Some(command) = command else {
			return Ok(self.workspace());
		};
		debug!(?command, role = self.context.session().role().as_str(), "running command");

		match command {
			Command::Suggest { text } => self.suggest(&text),
			Command::Search { term } => {
				self.require(Action::SearchMembers)?;
				let members = self.store().search_members(term.trim())?;
				Ok(Report::Members { members })
			}
			Command::AddMember(args) => self.add_member(args),
			Command::EditMember(args) => self.edit_member(args),
			Command::CheckIn { member_id } => self.check_in(&member_id),
			Command::CheckOut { check_in_id } => {
				self.require(Action::CheckIn)?;
				let check_in = self.store().check_out(&check_in_id, Utc::now())?;
				info!(check_in = %check_in.id, "checked out");
				Ok(Report::CheckedOut { check_in })
			}
			Command::WalkIn { name } => {
				self.require(Action::CheckIn)?;
				let guest = guest_from_name(&name)
					.ok_or_else(|| anyhow!("walk-in needs a first and last name, got '{name}'"))?;
				let guest = admit_walk_in(self.store().as_ref(), guest, Local::now())?;
				Ok(Report::Guest { guest })
			}
			Command::Occupancy => self.occupancy(),
			Command::CheckIns => {
				self.require(Action::ViewDailyCheckIns)?;
				let check_ins = self.store().check_ins_since(start_of_today())?;
				Ok(Report::CheckIns { check_ins })
			}
			Command::Guestlists { date } => {
				self.require(Action::ViewGuestlists)?;
				let guestlists = match date {
					Some(date) => self.store().guestlists_on(date)?,
					None => self.store().guestlists()?,
				};
				Ok(Report::Guestlists { guestlists })
			}
			Command::Guestlist { id } => {
				self.require(Action::ViewGuestlists)?;
				let viewer = self.open_guestlist(&id)?;
				let detail = viewer
					.detail()
					.cloned()
					.context("guestlist finished loading without data")?;
				Ok(Report::Guestlist {
					guestlist: detail.guestlist,
					guests: detail.guests,
				})
			}
			Command::CreateGuestlist(args) => self.create_guestlist(args),
			Command::ToggleGuest {
				guestlist_id,
				guest_id,
			} => {
				self.require(Action::ToggleGuestCheckIn)?;
				let mut viewer = self.open_guestlist(&guestlist_id)?;
				let guest = viewer.toggle_guest(&guest_id, Utc::now())?;
				info!(guest = %guest.id, checked_in = guest.checked_in, "toggled guest check-in");
				Ok(Report::Guest { guest })
			}
		}
	}

	fn store(&self) -> &Arc<dyn VenueStore> {
		self.context.store()
	}

	fn require(&self, action: Action) -> Result<()> {
		let session = self.context.session();
		ensure!(
			session.permits(action),
			"the {} role cannot {action}",
			session.role().as_str()
		);
		Ok(())
	}

	fn workspace(&self) -> Report {
		let session = self.context.session();
		Report::Workspace {
			venue: self.config.venue_name.clone(),
			role: session.role(),
			workspace: session.workspace().title(),
		}
	}

	/// Type `text` one character at a time, then let the debounced lookup
	/// settle.
	fn suggest(&mut self, text: &str) -> Result<Report> {
		self.require(Action::SearchMembers)?;
		let mut controller = member_suggestions(
			Arc::clone(self.store()),
			self.config.search.suggestion_limit,
			self.config.controller_config(),
		);

		let mut now = Instant::now();
		let mut typed = String::new();
		for ch in text.chars() {
			typed.push(ch);
			controller.on_input_change(typed.as_str(), now);
			controller.tick(now);
			controller.pump();
			now += KEYSTROKE_INTERVAL;
		}
		if let Some(deadline) = controller.next_deadline() {
			controller.tick(deadline.max(now));
		}
		while controller.is_loading() {
			if !controller.wait_for_outcome(LOOKUP_TIMEOUT) {
				bail!("member lookup did not finish within {}s", LOOKUP_TIMEOUT.as_secs());
			}
		}

		let notices = controller
			.take_notices()
			.into_iter()
			.map(|notice| format!("lookup for '{}' failed: {}", notice.term, notice.error))
			.collect();
		let report = Report::Suggestions {
			query: controller.query().to_string(),
			members: controller.suggestions().to_vec(),
			notices,
		};
		controller.teardown();
		Ok(report)
	}

	fn add_member(&mut self, args: AddMemberArgs) -> Result<Report> {
		self.require(Action::AddMember)?;
		let form = MemberForm {
			first_name: args.first_name,
			last_name: args.last_name,
			email: args.email,
			phone: args.phone,
			notes: args.notes,
			mailing_list: args.mailing_list,
			guestlist_date: args.guestlist_date,
			..MemberForm::default()
		};
		let registration = form.submit(self.store().as_ref(), Utc::now())?;
		self.context.select_member(Some(registration.member.clone()));
		Ok(Report::Registered {
			member: registration.member,
			guest: registration.guest,
		})
	}

	fn edit_member(&mut self, args: EditMemberArgs) -> Result<Report> {
		self.require(Action::EditMember)?;
		let current = self.store().member(&args.member_id)?;
		let mut form = MemberForm::from_member(&current);
		if let Some(value) = args.first_name {
			form.first_name = value;
		}
		if let Some(value) = args.last_name {
			form.last_name = value;
		}
		if let Some(value) = args.email {
			form.email = value;
		}
		if let Some(value) = args.phone {
			form.phone = value;
		}
		if let Some(value) = args.notes {
			form.notes = value;
		}
		if let Some(status) = args.status {
			form.membership_status = status.into();
		}
		if let Some(value) = args.mailing_list {
			form.mailing_list = value;
		}
		let member = form.save_edit(self.store().as_ref(), &current.id, Utc::now())?;
		self.context.select_member(Some(member.clone()));
		Ok(Report::MemberUpdated { member })
	}

	fn check_in(&mut self, member_id: &str) -> Result<Report> {
		self.require(Action::CheckIn)?;
		let check_in = check_in(self.store().as_ref(), member_id, Utc::now())?;
		let member = self.store().member(member_id)?;
		self.context.select_member(Some(member.clone()));
		Ok(Report::CheckedIn { member, check_in })
	}

	fn occupancy(&mut self) -> Result<Report> {
		self.require(Action::ViewOccupancy)?;
		let mut counter = OccupancyCounter::new(Arc::clone(self.store()));
		counter.refresh(start_of_today());
		ensure!(
			counter.wait(LOOKUP_TIMEOUT),
			"occupancy count did not finish within {}s",
			LOOKUP_TIMEOUT.as_secs()
		);
		if let Some(error) = counter.error() {
			bail!("could not count visitors in the venue: {error}");
		}
		let count = counter
			.count()
			.context("occupancy count finished without a value")?;
		counter.teardown();
		Ok(Report::Occupancy {
			venue: self.config.venue_name.clone(),
			count,
		})
	}

	fn open_guestlist(&mut self, id: &str) -> Result<GuestlistViewer> {
		let mut viewer = GuestlistViewer::new(Arc::clone(self.store()));
		viewer.open(id);
		ensure!(
			viewer.wait(LOOKUP_TIMEOUT),
			"guestlist {id} did not load within {}s",
			LOOKUP_TIMEOUT.as_secs()
		);
		if let Some(error) = viewer.error() {
			bail!("failed to load guestlist: {error}");
		}
		self.context
			.select_guestlist(viewer.detail().map(|detail| detail.guestlist.clone()));
		Ok(viewer)
	}

	fn create_guestlist(&mut self, args: CreateGuestlistArgs) -> Result<Report> {
		self.require(Action::CreateGuestlist)?;
		let mut draft = GuestlistDraft::new(args.date);
		draft.name = args.name;
		draft.notes = args.notes;
		for member_id in &args.members {
			let member = self.store().member(member_id)?;
			draft.add_member(member);
		}
		for name in &args.guests {
			let guest = guest_from_name(name)
				.ok_or_else(|| anyhow!("guest needs a first and last name, got '{name}'"))?;
			draft.add_guest(guest);
		}

		let detail = draft.submit(self.store().as_ref(), Utc::now())?;
		self.context.select_guestlist(Some(detail.guestlist.clone()));
		Ok(Report::Guestlist {
			guestlist: detail.guestlist,
			guests: detail.guests,
		})
	}
}

#[cfg(test)]
mod tests;
