//! Logging bootstrap
//!
//! Installs a global `tracing` subscriber. `RUST_LOG` wins over the
//! configured level when it is set.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	/// Human-readable lines
	#[default]
	Plain,
	/// One JSON object per event
	Json,
}

/// Errors raised while installing the subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
	/// The level/directive string could not be parsed
	#[error("Invalid log filter '{directive}': {message}")]
	InvalidFilter {
		/// Directive as given
		directive: String,
		/// Parser message
		message: String,
	},

	/// A global subscriber was already installed
	#[error("Logging already initialized: {0}")]
	AlreadyInitialized(String),
}

/// Parse a level or directive string such as `info` or `folio_cms=debug,warn`
pub fn parse_filter(directive: &str) -> Result<EnvFilter, LoggingError> {
	EnvFilter::try_new(directive).map_err(|e| LoggingError::InvalidFilter {
		directive: directive.to_string(),
		message: e.to_string(),
	})
}

/// Install the global subscriber
///
/// Returns [`LoggingError::AlreadyInitialized`] when called twice in the same
/// process.
pub fn init(level: &str, format: LogFormat) -> Result<(), LoggingError> {
	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => parse_filter(level)?,
	};

	let registry = tracing_subscriber::registry().with(filter);
	let result = match format {
		LogFormat::Plain => registry.with(tracing_subscriber::fmt::layer()).try_init(),
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json())
			.try_init(),
	};

	result.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;
	tracing::debug!(?format, "logging initialized");
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("info")]
	#[case("warn")]
	#[case("folio_cms=debug,warn")]
	fn test_parse_filter_accepts_directives(#[case] directive: &str) {
		assert!(parse_filter(directive).is_ok());
	}

	#[test]
	fn test_parse_filter_rejects_garbage() {
		let err = parse_filter("folio_cms=verbose").unwrap_err();
		assert!(matches!(err, LoggingError::InvalidFilter { .. }));
		assert!(err.to_string().contains("folio_cms=verbose"));
	}

	#[test]
	fn test_log_format_serde() {
		let format: LogFormat = serde_json::from_str("\"json\"").unwrap();
		assert_eq!(format, LogFormat::Json);
		assert_eq!(LogFormat::default(), LogFormat::Plain);
	}
}
