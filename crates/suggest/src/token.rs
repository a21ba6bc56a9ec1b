use std::fmt;

/// Identifier minted for every dispatched request.
///
/// Tokens increase monotonically per tracker, so comparing a response's token
/// against the tracker's latest one is enough to tell whether it is stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
	#[must_use]
	pub fn get(self) -> u64 {
		self.0
	}
}

impl fmt::Display for RequestToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Tracks which request is the latest and whether it is still outstanding.
#[derive(Debug, Default)]
pub struct RequestTracker {
	next: u64,
	latest: Option<RequestToken>,
	in_flight: bool,
}

impl RequestTracker {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Mint a token for a new request and mark it outstanding.
	pub fn issue(&mut self) -> RequestToken {
		self.next = self.next.saturating_add(1);
		let token = RequestToken(self.next);
		self.latest = Some(token);
		self.in_flight = true;
		token
	}

	/// Invalidate the outstanding request without issuing a new one.
	///
	/// Any response carrying an earlier token is treated as stale afterwards.
	pub fn retire(&mut self) {
		self.next = self.next.saturating_add(1);
		self.latest = Some(RequestToken(self.next));
		self.in_flight = false;
	}

	#[must_use]
	pub fn is_latest(&self, token: RequestToken) -> bool {
		self.latest == Some(token)
	}

	/// Mark `token` as answered. Returns `false` for stale tokens, leaving the
	/// in-flight flag owned by the newer request untouched.
	pub fn complete(&mut self, token: RequestToken) -> bool {
		if !self.is_latest(token) {
			return false;
		}
		self.in_flight = false;
		true
	}

	#[must_use]
	pub fn latest(&self) -> Option<RequestToken> {
		self.latest
	}

	#[must_use]
	pub fn has_issued(&self) -> bool {
		self.next > 0
	}

	#[must_use]
	pub fn is_in_flight(&self) -> bool {
		self.in_flight
	}
}
