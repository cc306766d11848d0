//! # Folio
//!
//! A small content-management backend.
//!
//! Folio stores articles, a homepage singleton and a YouTube video catalogue.
//! Each article gets a URL slug derived from its title, made unique among
//! all articles, and a plain-text summary derived from its Markdown body when
//! none is supplied.
//!
//! ## Crates
//!
//! - [`utils`] (`folio-utils`): slugs, summaries, YouTube links, logging setup
//! - [`conf`] (`folio-conf`): layered settings (defaults, TOML, `FOLIO_*` env)
//! - [`db`] (`folio-db`): records, the `ContentStore` trait, SQLite and
//!   in-memory backends
//! - [`cms`] (`folio-cms`): the publishing workflow and services
//!
//! The `folio-admin` binary (crate `folio-admin-cli`) drives all of it from
//! the command line.
//!
//! ## Quick Start
//!
//! ```
//! use folio::prelude::*;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let settings = Settings::default();
//! let store = SqliteStore::connect(&DatabaseConfig::in_memory()).await.unwrap();
//! store.migrate().await.unwrap();
//! let store: Arc<dyn ContentStore> = Arc::new(store);
//!
//! HomepageService::new(store.clone()).ensure_initialized().await.unwrap();
//!
//! let publisher = ArticlePublisher::new(store, settings.content);
//! let article = publisher
//!     .create_article(NewArticleInput {
//!         title: "Beijing's New Policy".to_string(),
//!         body: "The city announced **new** rules today.".to_string(),
//!         ..Default::default()
//!     })
//!     .await
//!     .unwrap();
//!
//! assert_eq!(article.slug, "beijings-new-policy");
//! assert_eq!(article.summary, "The city announced new rules today.");
//! # }
//! # tokio::runtime::Runtime::new().unwrap().block_on(example());
//! ```

pub use folio_cms as cms;
pub use folio_conf as conf;
pub use folio_db as db;
pub use folio_utils as utils;

pub mod prelude {
	//! Convenient re-exports of commonly used items

	pub use folio_cms::prelude::*;
	pub use folio_conf::{ContentSettings, DatabaseConfig, Settings, SettingsBuilder};
	pub use folio_db::prelude::*;
	pub use folio_utils::{auto_summarize, resolve_unique_slug, slugify};
}
