use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::trace;

use crate::token::{RequestToken, RequestTracker};

/// Result of a background job, tagged with the token it was dispatched under.
#[derive(Debug)]
pub struct Outcome<T, E> {
	pub token: RequestToken,
	pub result: Result<T, E>,
}

/// Runs fetch jobs on worker threads and hands back only the latest result.
///
/// Every [`LatestLoader::dispatch`] supersedes the previous one. Outcomes of
/// superseded jobs are drained and dropped when the owner pumps the loader,
/// so a slow early response can never overwrite a fast later one.
pub struct LatestLoader<T, E> {
	tx: Sender<Outcome<T, E>>,
	rx: Receiver<Outcome<T, E>>,
	tracker: RequestTracker,
	label: &'static str,
}

impl<T, E> LatestLoader<T, E>
where
	T: Send + 'static,
	E: Send + 'static,
{
	/// Create a loader. `label` only appears in log output.
	#[must_use]
	pub fn new(label: &'static str) -> Self {
		let (tx, rx) = mpsc::channel();
		Self {
			tx,
			rx,
			tracker: RequestTracker::new(),
			label,
		}
	}

	/// Run `job` on a worker thread under a freshly minted token.
	pub fn dispatch<F>(&mut self, job: F) -> RequestToken
	where
		F: FnOnce() -> Result<T, E> + Send + 'static,
	{
		let token = self.tracker.issue();
		let tx = self.tx.clone();
		trace!(loader = self.label, %token, "dispatching job");
		thread::spawn(move || {
			let result = job();
			// The owner may be gone by now; nobody is left to care.
			let _ = tx.send(Outcome { token, result });
		});
		token
	}

	/// Return the latest outcome if it has arrived, dropping stale ones.
	pub fn try_next(&mut self) -> Option<Outcome<T, E>> {
		loop {
			match self.rx.try_recv() {
				Ok(outcome) => {
					if let Some(outcome) = self.accept(outcome) {
						return Some(outcome);
					}
				}
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => return None,
			}
		}
	}

	/// Block for at most `timeout` waiting for the latest outcome.
	pub fn wait_next(&mut self, timeout: Duration) -> Option<Outcome<T, E>> {
		let deadline = Instant::now() + timeout;
		loop {
			let remaining = deadline.saturating_duration_since(Instant::now());
			match self.rx.recv_timeout(remaining) {
				Ok(outcome) => {
					if let Some(outcome) = self.accept(outcome) {
						return Some(outcome);
					}
				}
				Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
			}
		}
	}

	fn accept(&mut self, outcome: Outcome<T, E>) -> Option<Outcome<T, E>> {
		if self.tracker.complete(outcome.token) {
			Some(outcome)
		} else {
			trace!(loader = self.label, token = %outcome.token, "dropping stale outcome");
			None
		}
	}

	/// Invalidate the outstanding job without dispatching a new one.
	pub fn retire(&mut self) {
		self.tracker.retire();
	}

	/// Whether the latest dispatched job is still outstanding.
	#[must_use]
	pub fn is_loading(&self) -> bool {
		self.tracker.is_in_flight()
	}

	#[must_use]
	pub fn latest(&self) -> Option<RequestToken> {
		self.tracker.latest()
	}
}
