use thiserror::Error;

use crate::store::StoreError;

/// Validation failures reported back to the form that produced them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
	#[error("{0} is required")]
	Missing(&'static str),

	#[error("'{0}' is not a valid email address")]
	InvalidEmail(String),
}

/// Failure submitting a form: either it never reached the store or the store
/// rejected it.
#[derive(Debug, Error)]
pub enum SubmitError {
	#[error(transparent)]
	Invalid(#[from] FormError),

	#[error(transparent)]
	Store(#[from] StoreError),
}

pub(crate) fn require(value: &str, field: &'static str) -> Result<String, FormError> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return Err(FormError::Missing(field));
	}
	Ok(trimmed.to_string())
}

/// Accepts an empty value; otherwise needs a non-empty local part and a
/// dotted domain.
pub(crate) fn check_email(value: &str) -> Result<String, FormError> {
	let trimmed = value.trim();
	if trimmed.is_empty() {
		return Ok(String::new());
	}
	let valid = trimmed
		.split_once('@')
		.is_some_and(|(local, domain)| {
			!local.is_empty()
				&& !domain.contains('@')
				&& domain
					.split_once('.')
					.is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
		});
	if valid {
		Ok(trimmed.to_string())
	} else {
		Err(FormError::InvalidEmail(trimmed.to_string()))
	}
}
