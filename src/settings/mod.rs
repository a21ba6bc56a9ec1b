//! Configuration loading and resolution.
//!
//! `load` merges config files, `FRONTDESK__*` environment variables and CLI
//! flags into a validated [`ResolvedConfig`].

mod loader;
mod raw;
mod resolved;
mod sources;

pub use loader::load;
pub use resolved::{ResolvedConfig, SearchSettings};
