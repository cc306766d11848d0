//! # Folio Configuration
//!
//! Layered settings for Folio applications.
//!
//! Values are merged from three kinds of sources, highest priority last:
//!
//! 1. Built-in defaults ([`Settings::default`])
//! 2. A TOML file (`folio.toml`, or the path given on the command line)
//! 3. `FOLIO_*` environment variables, with `__` separating nesting levels
//!    (`FOLIO_CONTENT__SUMMARY_MAX_LENGTH=160`)
//!
//! ## Example
//!
//! ```
//! use folio_conf::{EnvSource, SettingsBuilder, SlugConflictPolicy};
//!
//! let settings = SettingsBuilder::with_defaults()
//!     .unwrap()
//!     .add_source(
//!         EnvSource::new()
//!             .with_prefix("FOLIO_")
//!             .with_vars([("FOLIO_CONTENT__SLUG_CONFLICT_POLICY", "advisory")]),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(settings.content.slug_conflict_policy, SlugConflictPolicy::Advisory);
//! ```

pub mod database_config;
pub mod settings;
pub mod sources;

pub use database_config::DatabaseConfig;
pub use settings::{
	ContentSettings, ENV_PREFIX, EditSummaryPolicy, LoggingSettings, Settings, SettingsBuilder,
	SettingsError, SlugConflictPolicy,
};
pub use sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource};
