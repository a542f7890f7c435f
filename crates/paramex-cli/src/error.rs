//! Error types for the CLI application.

use paramex_extractor::ExtractorError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path as given on the command line
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The extraction could not run
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
