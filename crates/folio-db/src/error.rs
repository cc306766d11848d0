//! Storage error types

use thiserror::Error;

/// Errors raised by a [`ContentStore`](crate::ContentStore) backend
#[derive(Debug, Error)]
pub enum StoreError {
	/// A uniqueness constraint (article slug, homepage id) was violated
	#[error("Unique constraint violated: {0}")]
	UniqueViolation(String),

	/// The addressed record does not exist
	#[error("Record not found: {0}")]
	NotFound(String),

	/// The backend failed for any other reason
	#[error("Storage backend error: {0}")]
	Backend(String),
}

/// Result type alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
	fn from(error: sqlx::Error) -> Self {
		match &error {
			sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
				StoreError::UniqueViolation(db_error.message().to_string())
			}
			sqlx::Error::RowNotFound => StoreError::NotFound(error.to_string()),
			_ => StoreError::Backend(error.to_string()),
		}
	}
}
