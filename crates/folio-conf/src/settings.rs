//! Typed settings and the builder that layers sources into them

use crate::database_config::DatabaseConfig;
use crate::sources::{
	ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource, merge_value,
};
use folio_utils::logging::LogFormat;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Prefix of environment variables read by [`Settings::load`]
pub const ENV_PREFIX: &str = "FOLIO_";

/// How the publishing workflow deals with two writers racing for one slug
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlugConflictPolicy {
	/// Insert the candidate and move to the next one when the store reports
	/// a uniqueness violation
	#[default]
	AtomicRetry,
	/// Resolve once against an existence check; a lost race surfaces as a
	/// uniqueness conflict
	Advisory,
}

/// What happens to a stored summary when the body is edited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditSummaryPolicy {
	/// Keep the stored summary unless a new one is supplied
	#[default]
	Retain,
	/// Re-derive the summary from the new body unless one is supplied
	Regenerate,
}

/// Content workflow settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentSettings {
	/// Character budget of auto-generated summaries
	pub summary_max_length: usize,
	/// Upper bound on slug candidates tried per article
	pub slug_max_attempts: usize,
	/// See [`SlugConflictPolicy`]
	pub slug_conflict_policy: SlugConflictPolicy,
	/// See [`EditSummaryPolicy`]
	pub edit_summary_policy: EditSummaryPolicy,
}

impl Default for ContentSettings {
	fn default() -> Self {
		Self {
			summary_max_length: 200,
			slug_max_attempts: 1_000,
			slug_conflict_policy: SlugConflictPolicy::default(),
			edit_summary_policy: EditSummaryPolicy::default(),
		}
	}
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// Level or filter directive, e.g. `info` or `folio_cms=debug,warn`
	pub level: String,
	/// Output format
	pub format: LogFormat,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::default(),
		}
	}
}

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Storage backend
	pub database: DatabaseConfig,
	/// Publishing workflow
	pub content: ContentSettings,
	/// Log output
	pub logging: LoggingSettings,
}

/// Errors raised while building settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to load {source_name}: {error}")]
	Source {
		source_name: String,
		#[source]
		error: SourceError,
	},

	#[error("Invalid settings: {0}")]
	Deserialize(#[from] serde_json::Error),

	#[error("Invalid value for '{key}': {message}")]
	InvalidValue { key: String, message: String },
}

impl Settings {
	/// Load settings from defaults, an optional TOML file and `FOLIO_*`
	/// environment variables
	///
	/// An explicitly given `config_path` must exist. Without one, `folio.toml`
	/// in the working directory is read when present.
	pub fn load(config_path: Option<&Path>) -> Result<Self, SettingsError> {
		let file_source = match config_path {
			Some(path) => TomlFileSource::required(path),
			None => TomlFileSource::new("folio.toml"),
		};

		SettingsBuilder::with_defaults()?
			.add_source(file_source)
			.add_source(EnvSource::new().with_prefix(ENV_PREFIX))
			.build()
	}

	/// Check constraints serde cannot express
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.content.slug_max_attempts == 0 {
			return Err(SettingsError::InvalidValue {
				key: "content.slug_max_attempts".to_string(),
				message: "must be at least 1".to_string(),
			});
		}
		if self.database.max_connections == 0 {
			return Err(SettingsError::InvalidValue {
				key: "database.max_connections".to_string(),
				message: "must be at least 1".to_string(),
			});
		}
		if self.database.url.trim().is_empty() {
			return Err(SettingsError::InvalidValue {
				key: "database.url".to_string(),
				message: "must not be empty".to_string(),
			});
		}
		if let Err(e) = folio_utils::logging::parse_filter(&self.logging.level) {
			return Err(SettingsError::InvalidValue {
				key: "logging.level".to_string(),
				message: e.to_string(),
			});
		}
		Ok(())
	}
}

/// Merges configuration sources by priority into [`Settings`]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Create a builder with no sources
	pub fn new() -> Self {
		Self {
			sources: Vec::new(),
		}
	}

	/// Create a builder seeded with [`Settings::default`] as lowest priority
	/// source
	pub fn with_defaults() -> Result<Self, SettingsError> {
		let defaults = match serde_json::to_value(Settings::default())? {
			Value::Object(map) => map,
			_ => Map::new(),
		};
		Ok(Self::new().add_source(DefaultSource::new().with_object(defaults)))
	}

	/// Add a source
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Load every source, merge by ascending priority and deserialize
	///
	/// Sources with equal priority are applied in insertion order.
	pub fn build(mut self) -> Result<Settings, SettingsError> {
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = Value::Object(Map::new());
		for source in &self.sources {
			let values = source.load().map_err(|error| SettingsError::Source {
				source_name: source.description(),
				error,
			})?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"merged configuration source"
			);
			merge_value(&mut merged, Value::Object(values.into_iter().collect()));
		}

		let settings: Settings = serde_json::from_value(merged)?;
		settings.validate()?;
		Ok(settings)
	}
}

impl Default for SettingsBuilder {
	fn default() -> Self {
		Self::new()
	}
}
