//! # torrent-sync
//!
//! Finds TV season packs in a local media library and records matching torrent
//! releases from a Jackett indexer.
//!
//! A run walks the files selected by a glob expression. For every file the directory
//! two levels up is treated as the season pack (`<library>/<pack>/<release>/<file>`);
//! packs whose path carries a season marker such as `S01.` are searched on the indexer
//! by name, once per pack. When a result's title equals the pack name exactly, a
//! record with the pack location and the release link is appended to a YAML file for
//! another tool to pick up. Nothing is downloaded.
//!
//! ## Quick Start
//!
//! ```no_run
//! use torrent_sync::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // API_KEY, JACKET_BASE_URL, GLOB_EXPRESSION and OUTPUT_FILE_PATH
//!     // come from the environment or a .env file
//!     let config = Config::load(None)?;
//!
//!     let summary = torrent_sync::run(&config).await?;
//!     println!("{} matches written", summary.matches_written);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Pack and release levels derived from file paths
pub mod classifier;
/// Configuration types
pub mod config;
/// Per-run pack deduplication
pub mod dedup;
/// Error types
pub mod error;
/// Jackett search client
pub mod indexer;
/// Match records and the output file
pub mod output;
/// Match selection for a pack
pub mod resolver;
/// Retry logic with exponential backoff
pub mod retry;
/// The scan loop
pub mod scanner;
/// Glob-driven file walk
pub mod walker;

// Re-export commonly used types
pub use classifier::PackPath;
pub use config::{Config, QueryFailurePolicy, RetryConfig};
pub use error::{Error, Result};
pub use indexer::{IndexerClient, SearchResponse, SearchResult};
pub use output::{MatchRecord, OutputSink};
pub use resolver::{MatchResolver, Resolution};
pub use scanner::{PackScanner, ScanSummary};
pub use walker::GlobEntries;

/// Run one full scan as described by `config`
///
/// Logs the resolved configuration (API key redacted), walks
/// `config.glob_expression` and appends matches to `config.output_file_path`.
///
/// # Errors
///
/// Returns the first error that ends the run: an invalid glob, a filesystem walk
/// failure, an output write failure, or an indexer failure under
/// [`QueryFailurePolicy::Abort`].
pub async fn run(config: &Config) -> Result<ScanSummary> {
    tracing::info!(
        api_key = %config.redacted_api_key(),
        indexer_url = %config.indexer_url,
        glob_expression = %config.glob_expression,
        output_file_path = %config.output_file_path.display(),
        on_query_error = %config.on_query_error,
        request_timeout_secs = config.request_timeout.as_secs(),
        max_retries = config.retry.max_attempts,
        "Starting application"
    );

    let scanner = PackScanner::from_config(config)?;
    let entries = GlobEntries::new(&config.glob_expression)?;
    scanner.run(entries).await
}
