//! Configuration types for torrent-sync
//!
//! The tool is configured entirely through environment variables (optionally seeded
//! from a `.env` file). The four keys in [`REQUIRED_KEYS`] must be present and
//! non-empty; everything else has a default that reproduces a plain single pass with
//! no retries that aborts on the first failed query.

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Indexer credential
pub const API_KEY: &str = "API_KEY";
/// Indexer search endpoint
pub const JACKET_BASE_URL: &str = "JACKET_BASE_URL";
/// Glob selecting the file entries to scan
pub const GLOB_EXPRESSION: &str = "GLOB_EXPRESSION";
/// Append-only output file
pub const OUTPUT_FILE_PATH: &str = "OUTPUT_FILE_PATH";
/// What to do when an indexer query fails (`abort` or `skip`)
pub const ON_QUERY_ERROR: &str = "ON_QUERY_ERROR";
/// Per-request HTTP timeout in seconds
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
/// Number of retries for transient query failures
pub const QUERY_MAX_RETRIES: &str = "QUERY_MAX_RETRIES";

/// Keys that must be set before a run can start, in the order they are checked
pub const REQUIRED_KEYS: [&str; 4] = [API_KEY, JACKET_BASE_URL, GLOB_EXPRESSION, OUTPUT_FILE_PATH];

/// Main configuration for a scan run
#[derive(Clone)]
pub struct Config {
    /// Credential sent as the `apikey` query parameter
    pub api_key: String,

    /// Indexer search endpoint (Jackett `.../api/v2.0/indexers/all/results`)
    pub indexer_url: Url,

    /// Glob expression selecting the file entries to scan
    pub glob_expression: String,

    /// File that match records are appended to
    pub output_file_path: PathBuf,

    /// Behaviour when an indexer query fails (default: abort)
    pub on_query_error: QueryFailurePolicy,

    /// HTTP request timeout (default: 30 seconds)
    pub request_timeout: Duration,

    /// Retry settings for transient query failures (default: no retries)
    pub retry: RetryConfig,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// When `env_file` is given, that dotenv file must exist and is loaded first.
    /// Otherwise a `.env` in the working directory is loaded if present. Variables
    /// already set in the environment take precedence over dotenv values.
    ///
    /// # Errors
    /// Returns [`Error::Config`] naming the first missing or invalid key.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        match env_file {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| Error::Config {
                    message: format!("failed to load env file {}: {}", path.display(), e),
                    key: None,
                })?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }

        Self::from_env()
    }

    /// Build configuration from the current process environment only
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// Empty values are treated as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| Error::config(key, format!("{key} is not set")))
        };

        let api_key = require(API_KEY)?;
        let indexer_url = parse_indexer_url(&require(JACKET_BASE_URL)?)?;
        let glob_expression = require(GLOB_EXPRESSION)?;
        let output_file_path = PathBuf::from(require(OUTPUT_FILE_PATH)?);

        let on_query_error = match get(ON_QUERY_ERROR) {
            Some(value) => value.parse()?,
            None => QueryFailurePolicy::default(),
        };

        let request_timeout = match get(REQUEST_TIMEOUT_SECS) {
            Some(value) => {
                let secs: u64 = value.trim().parse().map_err(|_| {
                    Error::config(
                        REQUEST_TIMEOUT_SECS,
                        format!("{REQUEST_TIMEOUT_SECS} must be a whole number of seconds, got '{value}'"),
                    )
                })?;
                if secs == 0 {
                    return Err(Error::config(
                        REQUEST_TIMEOUT_SECS,
                        format!("{REQUEST_TIMEOUT_SECS} must be greater than zero"),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => default_request_timeout(),
        };

        let mut retry = RetryConfig::default();
        if let Some(value) = get(QUERY_MAX_RETRIES) {
            retry.max_attempts = value.trim().parse().map_err(|_| {
                Error::config(
                    QUERY_MAX_RETRIES,
                    format!("{QUERY_MAX_RETRIES} must be a non-negative integer, got '{value}'"),
                )
            })?;
        }

        Ok(Self {
            api_key,
            indexer_url,
            glob_expression,
            output_file_path,
            on_query_error,
            request_timeout,
            retry,
        })
    }

    /// API key with everything but the last four characters masked, for logging
    pub fn redacted_api_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 8 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{tail}")
    }
}

// Hand-written so the API key never reaches logs through `{:?}`
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.redacted_api_key())
            .field("indexer_url", &self.indexer_url.as_str())
            .field("glob_expression", &self.glob_expression)
            .field("output_file_path", &self.output_file_path)
            .field("on_query_error", &self.on_query_error)
            .field("request_timeout", &self.request_timeout)
            .field("retry", &self.retry)
            .finish()
    }
}

fn parse_indexer_url(value: &str) -> Result<Url> {
    let url = Url::parse(value.trim()).map_err(|e| {
        Error::config(
            JACKET_BASE_URL,
            format!("{JACKET_BASE_URL} is not a valid URL ('{value}'): {e}"),
        )
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::config(
            JACKET_BASE_URL,
            format!("{JACKET_BASE_URL} must use http or https, got '{other}'"),
        )),
    }
}

/// What the scanner does when an indexer query fails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QueryFailurePolicy {
    /// Stop the whole run and return the error (default)
    #[default]
    Abort,
    /// Log the failure, leave the pack marked as seen and continue with the next entry
    Skip,
}

impl FromStr for QueryFailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(QueryFailurePolicy::Abort),
            "skip" => Ok(QueryFailurePolicy::Skip),
            other => Err(Error::config(
                ON_QUERY_ERROR,
                format!("{ON_QUERY_ERROR} must be 'abort' or 'skip', got '{other}'"),
            )),
        }
    }
}

impl fmt::Display for QueryFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryFailurePolicy::Abort => write!(f, "abort"),
            QueryFailurePolicy::Skip => write!(f, "skip"),
        }
    }
}

/// Retry configuration for transient query failures
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (default: 0, a single try)
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 1 second)
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 30 seconds)
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}
