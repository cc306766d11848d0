//! CMS error types

use folio_db::StoreError;
use thiserror::Error;

/// CMS-related errors
#[derive(Error, Debug)]
pub enum CmsError {
	/// Input rejected before anything was written
	#[error("Validation error: {field}: {message}")]
	Validation {
		/// Offending input field
		field: String,
		/// What is wrong with it
		message: String,
	},

	/// The addressed record does not exist
	#[error("Not found: {0}")]
	NotFound(String),

	/// A unique value could not be claimed
	#[error("Uniqueness conflict: {0}")]
	UniquenessConflict(String),

	/// The storage backend failed
	#[error("Storage error: {0}")]
	Storage(String),
}

impl CmsError {
	/// Build a [`CmsError::Validation`]
	pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Validation {
			field: field.into(),
			message: message.into(),
		}
	}
}

impl From<StoreError> for CmsError {
	fn from(error: StoreError) -> Self {
		match error {
			StoreError::UniqueViolation(msg) => CmsError::UniquenessConflict(msg),
			StoreError::NotFound(msg) => CmsError::NotFound(msg),
			StoreError::Backend(msg) => CmsError::Storage(msg),
		}
	}
}

/// Result type for CMS operations
pub type CmsResult<T> = Result<T, CmsError>;

/// Reject a missing or whitespace-only required text field
pub(crate) fn require_text(field: &str, value: &str) -> CmsResult<()> {
	if value.trim().is_empty() {
		return Err(CmsError::validation(field, "must not be blank"));
	}
	Ok(())
}
