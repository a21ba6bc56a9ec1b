//! Front-of-house desk for a members venue.
//!
//! The library holds the venue records and their store, staff sessions, and
//! the screens' state machines: member suggestions, registration, guestlists
//! and the live occupancy count. Every background fetch goes through
//! [`frontdesk_suggest::LatestLoader`], so a slow response can never overwrite
//! the result of a newer request.

pub mod app_dirs;
pub mod context;
pub mod forms;
pub mod guestlist;
pub mod logging;
pub mod members;
pub mod model;
pub mod occupancy;
pub mod search;
pub mod session;
pub mod store;

pub use context::AppContext;
pub use search::{MemberLookup, MemberSuggestions, member_suggestions};
pub use session::{Action, Session, Workspace};
pub use store::{MemoryStore, StoreError, VenueStore};
