use std::sync::Arc;

use crate::model::{Guestlist, Member};
use crate::session::Session;
use crate::store::VenueStore;

/// Application state shared between screens.
///
/// Owned by the top-level shell and handed to screens by reference, so the
/// selected member or guestlist travels explicitly from one screen to the
/// next.
pub struct AppContext {
	store: Arc<dyn VenueStore>,
	session: Session,
	selected_member: Option<Member>,
	selected_guestlist: Option<Guestlist>,
}

impl AppContext {
	pub fn new(store: Arc<dyn VenueStore>, session: Session) -> Self {
		Self {
			store,
			session,
			selected_member: None,
			selected_guestlist: None,
		}
	}

	#[must_use]
	pub fn store(&self) -> &Arc<dyn VenueStore> {
		&self.store
	}

	#[must_use]
	pub fn session(&self) -> &Session {
		&self.session
	}

	pub fn select_member(&mut self, member: Option<Member>) {
		self.selected_member = member;
	}

	#[must_use]
	pub fn selected_member(&self) -> Option<&Member> {
		self.selected_member.as_ref()
	}

	pub fn select_guestlist(&mut self, guestlist: Option<Guestlist>) {
		self.selected_guestlist = guestlist;
	}

	#[must_use]
	pub fn selected_guestlist(&self) -> Option<&Guestlist> {
		self.selected_guestlist.as_ref()
	}
}
