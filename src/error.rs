//! Error types for torrent-sync
//!
//! Every fallible operation in the crate returns [`Result`], whose error type is the
//! single [`Error`] enum below. Variants carry enough context (configuration key,
//! HTTP status, offending URL) to explain a failed run from the log line alone.

use thiserror::Error;

/// Result type alias for torrent-sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for torrent-sync
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is missing or invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The environment key that caused the error (e.g., "API_KEY")
        key: Option<String>,
    },

    /// I/O error (output file, filesystem metadata)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level failure talking to the indexer
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The indexer answered with a non-success HTTP status
    #[error("indexer returned HTTP {status}: {url}")]
    Indexer {
        /// HTTP status code returned by the indexer
        status: u16,
        /// Endpoint that was queried (without credentials)
        url: String,
    },

    /// Indexer response body could not be decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Match record could not be encoded for the output file
    #[error("output encoding error: {0}")]
    Output(#[from] serde_yaml::Error),

    /// The configured glob expression is not a valid pattern
    #[error("invalid glob expression: {0}")]
    Glob(#[from] glob::PatternError),

    /// A path could not be read while walking the library
    #[error("filesystem walk error: {0}")]
    Walk(#[from] glob::GlobError),
}

impl Error {
    /// Build a configuration error tied to a specific environment key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }

    /// The configuration key behind this error, if it is a configuration error
    pub fn config_key(&self) -> Option<&str> {
        match self {
            Error::Config { key, .. } => key.as_deref(),
            _ => None,
        }
    }
}
