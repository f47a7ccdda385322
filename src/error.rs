use std::path::PathBuf;

/// Library-level structured errors for uri-rewrite.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum UriError {
	#[error("URL is not valid: {url}")]
	InvalidUrl { url: String },

	#[error("Rewrite rule rejected: alias {alias:?} needs a name and at least one path segment")]
	RuleRejected { alias: String },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using UriError.
pub type Result<T> = std::result::Result<T, UriError>;
