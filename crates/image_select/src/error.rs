//! Error types for configuration and module resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced to the host.
///
/// Geometry that cannot be measured and repeated create/destroy calls are not
/// errors; those paths are silent no-ops.
#[derive(Debug, Error)]
pub enum Error {
	/// A module list entry names neither a built-in nor a registered factory.
	#[error("unknown capability module: {0}")]
	UnknownModule(String),

	/// Error reading a configuration or scene file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML configuration.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error parsing JSON configuration or scene data.
	#[error("JSON parse error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
