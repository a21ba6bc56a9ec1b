use thiserror::Error;

/// Errors a lookup collaborator may report for a single query.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
	/// The backing data source could not be reached.
	#[error("lookup source unavailable: {0}")]
	Unavailable(String),

	/// The data source answered with an error for this query.
	#[error("lookup failed: {0}")]
	Failed(String),
}

/// External data source queried for suggestions.
///
/// Implementations own every matching rule (fields, ordering, result cap) and
/// return an empty list rather than an error when nothing matches. Calls run
/// on worker threads, so implementations may block.
pub trait Lookup: Send + Sync + 'static {
	type Item: Clone + Send + 'static;

	fn search(&self, term: &str) -> Result<Vec<Self::Item>, LookupError>;
}

/// Adapter turning a plain function into a [`Lookup`].
pub struct LookupFn<F>(pub F);

impl<F, T> Lookup for LookupFn<F>
where
	F: Fn(&str) -> Result<Vec<T>, LookupError> + Send + Sync + 'static,
	T: Clone + Send + 'static,
{
	type Item = T;

	fn search(&self, term: &str) -> Result<Vec<T>, LookupError> {
		(self.0)(term)
	}
}
