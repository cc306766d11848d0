//! Database configuration for settings

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Database configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
	/// Connection URL, e.g. `sqlite:folio.db` or `sqlite::memory:`
	pub url: String,

	/// Maximum number of pooled connections
	pub max_connections: u32,

	/// How long a writer waits on a locked database, in milliseconds
	pub busy_timeout_ms: u64,

	/// Create the database file when it does not exist
	pub create_if_missing: bool,
}

impl DatabaseConfig {
	/// Create a SQLite database configuration for a file path
	///
	/// # Examples
	///
	/// ```
	/// use folio_conf::DatabaseConfig;
	///
	/// let db = DatabaseConfig::sqlite("site.db");
	///
	/// assert_eq!(db.url, "sqlite:site.db");
	/// assert!(db.create_if_missing);
	/// ```
	pub fn sqlite(path: impl AsRef<str>) -> Self {
		Self {
			url: format!("sqlite:{}", path.as_ref()),
			..Self::default()
		}
	}

	/// Create an in-memory SQLite configuration
	///
	/// The pool is limited to one connection since each SQLite memory
	/// connection owns its own database.
	pub fn in_memory() -> Self {
		Self {
			url: "sqlite::memory:".to_string(),
			max_connections: 1,
			..Self::default()
		}
	}

	/// Busy timeout as a [`Duration`]
	pub fn busy_timeout(&self) -> Duration {
		Duration::from_millis(self.busy_timeout_ms)
	}
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			url: "sqlite:folio.db".to_string(),
			max_connections: 5,
			busy_timeout_ms: 5_000,
			create_if_missing: true,
		}
	}
}
