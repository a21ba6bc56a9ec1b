//! Primitives for search-as-you-type fields and fetch-then-render views that
//! must stay correct when responses arrive out of order.
//!
//! [`Debouncer`] collapses keystroke bursts into one delayed call and is
//! driven by the owner's event loop. [`LatestLoader`] runs fetch jobs on
//! worker threads and reports back over an [`mpsc`] channel; every outcome is
//! tagged with a [`RequestToken`], and only the outcome for the most recently
//! dispatched job is handed to the owner. [`SuggestionController`] combines
//! both into a suggestion dropdown controller.
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use frontdesk_suggest::{ControllerConfig, LookupError, LookupFn, SuggestionController};
//!
//! let lookup = LookupFn(|term: &str| Ok::<_, LookupError>(vec![format!("{term}!")]));
//! let mut controller = SuggestionController::new(lookup, ControllerConfig::default());
//!
//! let start = Instant::now();
//! controller.on_input_change("al", start);
//! controller.on_input_change("ali", start + Duration::from_millis(50));
//! controller.tick(start + Duration::from_secs(1));
//! controller.wait_for_outcome(Duration::from_secs(5));
//! assert_eq!(controller.suggestions(), ["ali!".to_string()]);
//! ```
//!
//! [`mpsc`]: std::sync::mpsc

mod controller;
mod debounce;
mod loader;
mod lookup;
mod token;

pub use controller::{
	ControllerConfig, DEFAULT_DEBOUNCE, DEFAULT_MIN_QUERY_LEN, Notice, SuggestionController,
	SuggestionState,
};
pub use debounce::{Debounced, Debouncer};
pub use loader::{LatestLoader, Outcome};
pub use lookup::{Lookup, LookupError, LookupFn};
pub use token::{RequestToken, RequestTracker};
