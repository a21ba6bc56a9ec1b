use std::time::{Duration, Instant};

/// Collapses bursts of calls into a single delayed invocation.
///
/// The debouncer never runs anything on its own. Callers record invocations
/// with [`Debouncer::call`] and drive time forward with [`Debouncer::poll`]
/// from their event loop; the most recent arguments are released once the
/// delay has elapsed since the last call.
#[derive(Debug)]
pub struct Debouncer<A> {
	delay: Duration,
	pending: Option<Pending<A>>,
}

#[derive(Debug)]
struct Pending<A> {
	deadline: Instant,
	args: A,
}

impl<A> Debouncer<A> {
	#[must_use]
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			pending: None,
		}
	}

	#[must_use]
	pub fn delay(&self) -> Duration {
		self.delay
	}

	/// Record a call, replacing any pending one and restarting the delay.
	pub fn call(&mut self, args: A, now: Instant) {
		self.pending = Some(Pending {
			deadline: now + self.delay,
			args,
		});
	}

	/// Release the pending arguments if their deadline has passed.
	///
	/// A zero delay still waits for the next poll, so `call` is never
	/// synchronous.
	pub fn poll(&mut self, now: Instant) -> Option<A> {
		let due = self
			.pending
			.as_ref()
			.is_some_and(|pending| now >= pending.deadline);
		if due {
			self.pending.take().map(|pending| pending.args)
		} else {
			None
		}
	}

	/// Drop the pending call, if any. Returns whether something was cancelled.
	pub fn cancel(&mut self) -> bool {
		self.pending.take().is_some()
	}

	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Deadline of the pending call, useful for sizing an event-loop sleep.
	#[must_use]
	pub fn next_deadline(&self) -> Option<Instant> {
		self.pending.as_ref().map(|pending| pending.deadline)
	}
}

/// A handler wrapped by a [`Debouncer`].
///
/// `call` has the same argument shape as the wrapped handler; the handler
/// itself only runs from [`Debounced::poll`].
pub struct Debounced<A, F>
where
	F: FnMut(A),
{
	debouncer: Debouncer<A>,
	handler: F,
}

impl<A, F> Debounced<A, F>
where
	F: FnMut(A),
{
	pub fn new(delay: Duration, handler: F) -> Self {
		Self {
			debouncer: Debouncer::new(delay),
			handler,
		}
	}

	pub fn call(&mut self, args: A, now: Instant) {
		self.debouncer.call(args, now);
	}

	/// Run the handler if the pending call is due. Returns whether it ran.
	pub fn poll(&mut self, now: Instant) -> bool {
		match self.debouncer.poll(now) {
			Some(args) => {
				(self.handler)(args);
				true
			}
			None => false,
		}
	}

	pub fn cancel(&mut self) -> bool {
		self.debouncer.cancel()
	}

	#[must_use]
	pub fn next_deadline(&self) -> Option<Instant> {
		self.debouncer.next_deadline()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ms(value: u64) -> Duration {
		Duration::from_millis(value)
	}

	#[test]
	fn burst_collapses_into_last_call() {
		let start = Instant::now();
		let mut fired = Vec::new();
		let mut debounced = Debounced::new(ms(300), |value: &str| fired.push(value));

		debounced.call("a", start);
		debounced.call("al", start + ms(100));
		debounced.call("ali", start + ms(250));

		assert!(!debounced.poll(start + ms(400)));
		assert!(!debounced.poll(start + ms(549)));
		assert!(debounced.poll(start + ms(550)));
		assert!(!debounced.poll(start + ms(2_000)));
		drop(debounced);

		assert_eq!(fired, vec!["ali"]);
	}

	#[test]
	fn zero_delay_waits_for_next_poll() {
		let now = Instant::now();
		let mut debouncer = Debouncer::new(Duration::ZERO);

		debouncer.call(7, now);
		assert!(debouncer.is_pending());
		assert_eq!(debouncer.poll(now), Some(7));
		assert_eq!(debouncer.poll(now), None);
	}

	#[test]
	fn cancel_drops_pending_call() {
		let now = Instant::now();
		let mut debouncer = Debouncer::new(ms(10));
		debouncer.call("x", now);

		assert!(debouncer.cancel());
		assert!(!debouncer.cancel());
		assert_eq!(debouncer.poll(now + ms(50)), None);
		assert_eq!(debouncer.next_deadline(), None);
	}

	#[test]
	fn separate_bursts_fire_separately() {
		let start = Instant::now();
		let mut debouncer = Debouncer::new(ms(100));

		debouncer.call(1, start);
		assert_eq!(debouncer.poll(start + ms(100)), Some(1));
		debouncer.call(2, start + ms(150));
		assert_eq!(debouncer.next_deadline(), Some(start + ms(250)));
		assert_eq!(debouncer.poll(start + ms(250)), Some(2));
	}
}
