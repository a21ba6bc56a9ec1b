//! Live count of visitors currently in the venue.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;

use chrono::{DateTime, Local, NaiveTime, TimeZone, Utc};
use frontdesk_suggest::LatestLoader;
use tracing::{debug, warn};

use crate::store::{ChangeEvent, StoreError, Table, VenueStore};

/// Start of the current local day, expressed in UTC.
#[must_use]
pub fn start_of_today() -> DateTime<Utc> {
	start_of_day(Local::now())
}

/// Midnight of `now`'s local day. Falls back to `now` when local midnight does
/// not exist (DST gaps).
#[must_use]
pub fn start_of_day<Tz: TimeZone>(now: DateTime<Tz>) -> DateTime<Utc> {
	let midnight = now.date_naive().and_time(NaiveTime::MIN);
	now.timezone()
		.from_local_datetime(&midnight)
		.earliest()
		.map_or_else(|| now.with_timezone(&Utc), |start| start.with_timezone(&Utc))
}

/// Keeps the in-venue count current by recounting on every check-in change.
///
/// Recounts run on worker threads; when several are in flight only the most
/// recent one is allowed to update the displayed count.
pub struct OccupancyCounter {
	store: Arc<dyn VenueStore>,
	changes: Option<Receiver<ChangeEvent>>,
	loader: LatestLoader<u64, StoreError>,
	count: Option<u64>,
	error: Option<StoreError>,
}

impl OccupancyCounter {
	/// Subscribe to store changes. No count is requested until
	/// [`refresh`](Self::refresh) or [`pump`](Self::pump) runs.
	pub fn new(store: Arc<dyn VenueStore>) -> Self {
		let changes = Some(store.subscribe());
		Self {
			store,
			changes,
			loader: LatestLoader::new("occupancy"),
			count: None,
			error: None,
		}
	}

	/// Last applied count, `None` before the first successful recount.
	#[must_use]
	pub fn count(&self) -> Option<u64> {
		self.count
	}

	/// Error from the latest recount, cleared by the next successful one.
	/// The previous count stays on display meanwhile.
	#[must_use]
	pub fn error(&self) -> Option<&StoreError> {
		self.error.as_ref()
	}

	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.loader.is_loading()
	}

	/// Dispatch a recount of visitors checked in since `since`.
	pub fn refresh(&mut self, since: DateTime<Utc>) {
		if self.changes.is_none() {
			return;
		}
		let store = Arc::clone(&self.store);
		let token = self.loader.dispatch(move || store.count_in_venue(since));
		debug!(%token, "dispatched occupancy recount");
	}

	/// Recount if check-ins changed, then apply any finished recount.
	/// Returns whether the displayed count changed.
	pub fn pump(&mut self, since: DateTime<Utc>) -> bool {
		if self.drain_changes() {
			self.refresh(since);
		}
		let mut changed = false;
		while let Some(outcome) = self.loader.try_next() {
			changed |= self.apply(outcome.result);
		}
		changed
	}

	/// Block for at most `timeout` for the latest recount. Returns whether it
	/// arrived, successful or not.
	pub fn wait(&mut self, timeout: Duration) -> bool {
		match self.loader.wait_next(timeout) {
			Some(outcome) => {
				self.apply(outcome.result);
				true
			}
			None => false,
		}
	}

	fn apply(&mut self, result: Result<u64, StoreError>) -> bool {
		match result {
			Ok(count) => {
				self.error = None;
				let changed = self.count != Some(count);
				self.count = Some(count);
				changed
			}
			Err(error) => {
				warn!(%error, "failed to count visitors in venue");
				self.error = Some(error);
				false
			}
		}
	}

	fn drain_changes(&mut self) -> bool {
		let Some(changes) = &self.changes else {
			return false;
		};
		let mut relevant = false;
		loop {
			match changes.try_recv() {
				Ok(event) => relevant |= event.table == Table::CheckIns,
				Err(TryRecvError::Empty) => break,
				Err(TryRecvError::Disconnected) => {
					self.changes = None;
					break;
				}
			}
		}
		relevant
	}

	/// Unsubscribe and ignore recounts that are still running.
	pub fn teardown(&mut self) {
		self.changes = None;
		self.loader.retire();
	}
}
