//! # Folio DB
//!
//! Storage layer for Folio.
//!
//! The CMS is written against the [`ContentStore`] trait. Two backends ship
//! with the crate:
//!
//! - [`SqliteStore`]: sqlx connection pool, statements built with sea-query
//! - [`InMemoryStore`]: a mutex-guarded store for tests and dry runs
//!
//! Both enforce slug uniqueness and the homepage singleton, reporting
//! violations as [`StoreError::UniqueViolation`].

#![warn(missing_docs)]

pub mod error;
pub mod memory;
pub mod models;
pub mod sqlite;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use models::{
	Article, ArticleChanges, ArticleId, HomepageContent, NewArticle, NewVideo, Video, VideoId,
};
pub use sqlite::SqliteStore;
pub use store::ContentStore;

pub mod prelude {
	//! Convenient re-exports of commonly used items

	pub use crate::error::{StoreError, StoreResult};
	pub use crate::memory::InMemoryStore;
	pub use crate::models::{Article, HomepageContent, Video};
	pub use crate::sqlite::SqliteStore;
	pub use crate::store::ContentStore;
}
