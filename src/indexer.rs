//! Jackett indexer client
//!
//! Jackett aggregates many torrent trackers behind one search endpoint
//! (`/api/v2.0/indexers/all/results`). A search is a plain `GET` carrying the API key
//! and a free-text `Query`; the body is a JSON object whose `Results` array lists
//! candidate releases in the order Jackett ranked them.

use crate::config::Config;
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Body of a Jackett search response
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResponse {
    /// Candidate releases, in service order
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

impl SearchResponse {
    /// First result whose title is byte-for-byte equal to `title`
    ///
    /// Earlier results that merely contain or resemble `title` are passed over;
    /// there is no case folding or whitespace normalisation.
    pub fn first_exact_match(&self, title: &str) -> Option<&SearchResult> {
        self.results.iter().find(|result| result.title == title)
    }
}

/// One candidate release returned by the indexer
///
/// Jackett omits or nulls most fields for some trackers, so everything except the
/// title is optional. A missing or null title decodes as empty and never matches.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchResult {
    /// Release title as published by the tracker
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    /// Download locator (torrent URL proxied through Jackett, or a magnet URI)
    pub link: Option<String>,

    /// Number of files in the torrent
    pub files: Option<u64>,

    /// Tracker display name
    pub tracker: Option<String>,

    /// Tracker identifier inside Jackett
    pub tracker_id: Option<String>,

    /// Tracker visibility (public, semi-private, private)
    pub tracker_type: Option<String>,

    /// When Jackett first saw the release
    pub first_seen: Option<String>,

    /// Jackett blackhole link for the release
    pub blackhole_link: Option<String>,

    /// Tracker-side unique identifier
    pub guid: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// HTTP client for the indexer search endpoint
#[derive(Clone)]
pub struct IndexerClient {
    /// HTTP client with the configured request timeout
    http_client: reqwest::Client,

    /// Search endpoint
    base_url: Url,

    /// Credential sent with every query
    api_key: String,
}

impl IndexerClient {
    /// Create a new indexer client
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created
    pub fn new(base_url: Url, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("torrent-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url,
            api_key: api_key.into(),
        })
    }

    /// Create a client from the run configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.indexer_url.clone(),
            config.api_key.clone(),
            config.request_timeout,
        )
    }

    /// Run one free-text search
    ///
    /// # Errors
    /// Returns error if:
    /// - the request cannot be sent or times out ([`Error::Network`])
    /// - the indexer answers with a non-2xx status ([`Error::Indexer`])
    /// - the body is not a valid search response ([`Error::Serialization`])
    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        debug!(query, "Querying indexer");

        let response = self
            .http_client
            .get(self.base_url.clone())
            .query(&[("apikey", self.api_key.as_str()), ("Query", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Indexer {
                status: status.as_u16(),
                url: self.base_url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        debug!(query, results = parsed.results.len(), "Indexer responded");
        Ok(parsed)
    }
}
