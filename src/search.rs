//! Member lookup wiring for the suggestion dropdowns.

use std::sync::Arc;

use frontdesk_suggest::{ControllerConfig, Lookup, LookupError, SuggestionController};

use crate::model::Member;
use crate::store::{StoreError, VenueStore};

pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

/// Suggestion source backed by the member table.
pub struct MemberLookup {
	store: Arc<dyn VenueStore>,
	limit: usize,
}

impl MemberLookup {
	pub fn new(store: Arc<dyn VenueStore>, limit: usize) -> Self {
		Self { store, limit }
	}
}

impl Lookup for MemberLookup {
	type Item = Member;

	fn search(&self, term: &str) -> Result<Vec<Member>, LookupError> {
		self.store
			.suggest_members(term, self.limit)
			.map_err(lookup_error)
	}
}

fn lookup_error(err: StoreError) -> LookupError {
	match err {
		StoreError::Io { .. } => LookupError::Unavailable(err.to_string()),
		other => LookupError::Failed(other.to_string()),
	}
}

pub type MemberSuggestions = SuggestionController<MemberLookup>;

/// Build the member suggestion controller used by search, check-in and
/// guestlist screens.
pub fn member_suggestions(
	store: Arc<dyn VenueStore>,
	limit: usize,
	config: ControllerConfig,
) -> MemberSuggestions {
	SuggestionController::new(MemberLookup::new(store, limit), config)
}
