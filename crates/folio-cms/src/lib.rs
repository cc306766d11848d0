//! # Folio CMS
//!
//! Publishing workflow of a small content site.
//!
//! ## Architecture
//!
//! ```text
//! folio-cms
//! ├── articles  - create/edit/read articles, slug and summary derivation
//! ├── homepage  - the homepage singleton
//! ├── videos    - YouTube video catalogue
//! └── error     - CmsError
//! ```
//!
//! Every service holds an `Arc<dyn ContentStore>`; there is no other shared
//! state.
//!
//! ## Quick Start
//!
//! ```
//! use folio_cms::prelude::*;
//! use folio_conf::ContentSettings;
//! use folio_db::InMemoryStore;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let store = Arc::new(InMemoryStore::new());
//! let publisher = ArticlePublisher::new(store.clone(), ContentSettings::default());
//!
//! let first = publisher
//!     .create_article(NewArticleInput {
//!         title: "Hello World".to_string(),
//!         body: "Body".to_string(),
//!         ..Default::default()
//!     })
//!     .await
//!     .unwrap();
//! let second = publisher
//!     .create_article(NewArticleInput {
//!         title: "hello world!".to_string(),
//!         body: "Body".to_string(),
//!         ..Default::default()
//!     })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(first.slug, "hello-world");
//! assert_eq!(second.slug, "hello-world-2");
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(example());
//! ```

#![warn(missing_docs)]

pub mod articles;
pub mod error;
pub mod homepage;
pub mod videos;

pub use error::{CmsError, CmsResult};

// Prelude for convenient imports
pub mod prelude {
	//! Convenient re-exports of commonly used items

	pub use crate::articles::{ArticlePublisher, ArticleUpdate, NewArticleInput};
	pub use crate::error::{CmsError, CmsResult};
	pub use crate::homepage::{HomepageService, HomepageUpdate};
	pub use crate::videos::VideoCatalogue;
}
