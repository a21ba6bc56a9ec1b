use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::debounce::Debouncer;
use crate::loader::{LatestLoader, Outcome};
use crate::lookup::{Lookup, LookupError};
use crate::token::RequestToken;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Timing and gating policy for a [`SuggestionController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControllerConfig {
	/// Quiet period after the last keystroke before a lookup is dispatched.
	pub debounce: Duration,
	/// Minimum number of characters (after trimming) that triggers a lookup.
	pub min_query_len: usize,
}

impl Default for ControllerConfig {
	fn default() -> Self {
		Self {
			debounce: DEFAULT_DEBOUNCE,
			min_query_len: DEFAULT_MIN_QUERY_LEN,
		}
	}
}

/// Soft error surfaced to the UI when the latest lookup fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub term: String,
	pub error: LookupError,
}

/// Read-only view of the controller state for rendering.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionState<'a, T> {
	pub query: &'a str,
	pub suggestions: &'a [T],
	pub is_loading: bool,
}

/// Drives an incremental-search field under variable lookup latency.
///
/// Keystrokes go through [`on_input_change`](Self::on_input_change); the
/// owner's event loop calls [`tick`](Self::tick) to fire due lookups and
/// [`pump`](Self::pump) to apply finished ones. Only the response to the most
/// recently dispatched lookup ever reaches `suggestions`.
pub struct SuggestionController<L: Lookup> {
	lookup: Arc<L>,
	config: ControllerConfig,
	query: String,
	suggestions: Vec<L::Item>,
	dispatcher: Debouncer<String>,
	loader: LatestLoader<Vec<L::Item>, LookupError>,
	in_flight_term: Option<String>,
	notices: Vec<Notice>,
	torn_down: bool,
}

impl<L: Lookup> SuggestionController<L> {
	pub fn new(lookup: L, config: ControllerConfig) -> Self {
		Self::with_shared(Arc::new(lookup), config)
	}

	pub fn with_shared(lookup: Arc<L>, config: ControllerConfig) -> Self {
		Self {
			lookup,
			config,
			query: String::new(),
			suggestions: Vec::new(),
			dispatcher: Debouncer::new(config.debounce),
			loader: LatestLoader::new("suggestions"),
			in_flight_term: None,
			notices: Vec::new(),
			torn_down: false,
		}
	}

	#[must_use]
	pub fn config(&self) -> ControllerConfig {
		self.config
	}

	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	#[must_use]
	pub fn suggestions(&self) -> &[L::Item] {
		&self.suggestions
	}

	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.loader.is_loading()
	}

	#[must_use]
	pub fn latest_token(&self) -> Option<RequestToken> {
		self.loader.latest()
	}

	#[must_use]
	pub fn snapshot(&self) -> SuggestionState<'_, L::Item> {
		SuggestionState {
			query: &self.query,
			suggestions: &self.suggestions,
			is_loading: self.is_loading(),
		}
	}

	/// Deadline of the pending debounced dispatch, if one is scheduled.
	#[must_use]
	pub fn next_deadline(&self) -> Option<Instant> {
		self.dispatcher.next_deadline()
	}

	/// Record new input text and schedule or suppress the lookup.
	pub fn on_input_change(&mut self, text: impl Into<String>, now: Instant) {
		if self.torn_down {
			return;
		}
		self.query = text.into();
		let term = self.query.trim();
		if term.chars().count() < self.config.min_query_len {
			self.clear_pending();
			return;
		}
		self.dispatcher.call(term.to_string(), now);
	}

	/// Fire the debounced lookup if it is due.
	pub fn tick(&mut self, now: Instant) -> Option<RequestToken> {
		if self.torn_down {
			return None;
		}
		let term = self.dispatcher.poll(now)?;
		Some(self.dispatch(term))
	}

	fn dispatch(&mut self, term: String) -> RequestToken {
		let lookup = Arc::clone(&self.lookup);
		let job_term = term.clone();
		let token = self.loader.dispatch(move || lookup.search(&job_term));
		debug!(%token, term = %term, "dispatched suggestion lookup");
		self.in_flight_term = Some(term);
		token
	}

	/// Apply any finished lookups without blocking. Returns whether the
	/// visible state changed.
	pub fn pump(&mut self) -> bool {
		if self.torn_down {
			return false;
		}
		let mut changed = false;
		while let Some(outcome) = self.loader.try_next() {
			self.apply(outcome);
			changed = true;
		}
		changed
	}

	/// Block for at most `timeout` until the latest lookup settles.
	pub fn wait_for_outcome(&mut self, timeout: Duration) -> bool {
		if self.torn_down {
			return false;
		}
		match self.loader.wait_next(timeout) {
			Some(outcome) => {
				self.apply(outcome);
				true
			}
			None => false,
		}
	}

	fn apply(&mut self, outcome: Outcome<Vec<L::Item>, LookupError>) {
		let term = self.in_flight_term.take().unwrap_or_default();
		match outcome.result {
			Ok(items) => {
				debug!(token = %outcome.token, count = items.len(), "applied suggestions");
				self.suggestions = items;
			}
			Err(error) => {
				warn!(token = %outcome.token, term = %term, %error, "suggestion lookup failed");
				self.suggestions.clear();
				self.notices.push(Notice { term, error });
			}
		}
	}

	/// Choose the suggestion at `index`, clearing query and suggestions.
	pub fn select(&mut self, index: usize) -> Option<L::Item> {
		if self.torn_down {
			return None;
		}
		let item = self.suggestions.get(index).cloned()?;
		self.query.clear();
		self.clear_pending();
		Some(item)
	}

	/// Drain soft errors raised since the last call.
	pub fn take_notices(&mut self) -> Vec<Notice> {
		std::mem::take(&mut self.notices)
	}

	/// Stop the controller. Pending dispatches are cancelled and in-flight
	/// lookups can no longer change any state.
	pub fn teardown(&mut self) {
		if self.torn_down {
			return;
		}
		self.clear_pending();
		self.torn_down = true;
	}

	#[must_use]
	pub fn is_torn_down(&self) -> bool {
		self.torn_down
	}

	fn clear_pending(&mut self) {
		self.suggestions.clear();
		self.dispatcher.cancel();
		if self.loader.is_loading() {
			self.loader.retire();
		}
		self.in_flight_term = None;
	}
}
