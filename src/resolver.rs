//! Match resolution: one indexer query per pack, first exact title wins

use crate::classifier::PackPath;
use crate::config::RetryConfig;
use crate::error::Result;
use crate::indexer::{IndexerClient, SearchResult};
use crate::output::MatchRecord;
use crate::retry::with_retry;

/// Outcome of resolving one pack
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    /// Number of candidates the indexer returned
    pub result_count: usize,

    /// The selected candidate, if any title matched exactly
    pub matched: Option<SearchResult>,

    /// Record to append for the selected candidate
    pub record: Option<MatchRecord>,
}

impl Resolution {
    /// True when a candidate was selected
    pub fn is_match(&self) -> bool {
        self.matched.is_some()
    }
}

/// Looks up a pack on the indexer and picks the release whose title equals the pack name
#[derive(Clone)]
pub struct MatchResolver {
    indexer: IndexerClient,
    retry: RetryConfig,
}

impl MatchResolver {
    /// Create a resolver over an indexer client
    ///
    /// With the default [`RetryConfig`] every pack costs exactly one request.
    pub fn new(indexer: IndexerClient, retry: RetryConfig) -> Self {
        Self { indexer, retry }
    }

    /// Query the indexer with the pack name and select the first exact title match
    ///
    /// A response without an exact match resolves to `Ok` with no record.
    ///
    /// # Errors
    /// Returns the indexer error once retries (if any) are exhausted.
    pub async fn resolve(&self, pack: &PackPath) -> Result<Resolution> {
        let query = pack.pack_name.as_str();
        let response = with_retry(&self.retry, || self.indexer.search(query)).await?;

        let matched = response.first_exact_match(query).cloned();
        let record = matched
            .as_ref()
            .map(|result| MatchRecord::new(pack, result.link.clone()));

        Ok(Resolution {
            result_count: response.results.len(),
            matched,
            record,
        })
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;
    use std::path::Path;
    use std::time::Duration;
    use url::Url;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn resolver_for(server: &MockServer, retry: RetryConfig) -> MatchResolver {
        let url = Url::parse(&server.uri()).unwrap();
        let indexer = IndexerClient::new(url, "key", Duration::from_secs(5)).unwrap();
        MatchResolver::new(indexer, retry)
    }

    fn pack(entry: &str) -> PackPath {
        PackPath::classify(Path::new(entry))
    }

    #[tokio::test]
    async fn selects_first_exact_title_not_first_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("Query", "Show.S01.Complete"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Results": [
                    { "Title": "Show.S01", "Link": "magnet:wrong", "Files": 8 },
                    { "Title": "Show.S01.Complete", "Link": "magnet:right", "Files": 10 }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resolution = resolver_for(&server, RetryConfig::default())
            .resolve(&pack("/lib/Show/Show.S01.Complete/E01/file.mkv"))
            .await
            .unwrap();

        assert!(resolution.is_match());
        assert_eq!(resolution.result_count, 2);

        let matched = resolution.matched.unwrap();
        assert_eq!(matched.title, "Show.S01.Complete");
        assert_eq!(matched.files, Some(10));

        let record = resolution.record.unwrap();
        assert_eq!(record.link.as_deref(), Some("magnet:right"));
        assert_eq!(record.path, "/lib/Show");
        assert_eq!(record.pack_name, "Show.S01.Complete");
        assert_eq!(record.entry, "/lib/Show/Show.S01.Complete/E01/file.mkv");
    }

    #[tokio::test]
    async fn no_exact_title_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Results": [
                    { "Title": "Show.S01.Complete.REPACK", "Link": "magnet:a" },
                    { "Title": "show.s01.complete", "Link": "magnet:b" }
                ]
            })))
            .mount(&server)
            .await;

        let resolution = resolver_for(&server, RetryConfig::default())
            .resolve(&pack("/lib/Show/Show.S01.Complete/E01/file.mkv"))
            .await
            .unwrap();

        assert!(!resolution.is_match());
        assert_eq!(resolution.result_count, 2);
        assert!(resolution.record.is_none());
    }

    #[tokio::test]
    async fn empty_results_resolve_to_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Results": [] })))
            .mount(&server)
            .await;

        let resolution = resolver_for(&server, RetryConfig::default())
            .resolve(&pack("/lib/Show/S01.Pack/E01/file.mkv"))
            .await
            .unwrap();

        assert_eq!(resolution.result_count, 0);
        assert!(resolution.record.is_none());
    }

    #[tokio::test]
    async fn query_failure_propagates_without_retry_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let err = resolver_for(&server, RetryConfig::default())
            .resolve(&pack("/lib/Show/S01.Pack/E01/file.mkv"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Indexer { status: 503, .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn transient_failure_is_retried_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Results": [{ "Title": "S01.Pack", "Link": "magnet:abc", "Files": 10 }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let retry = RetryConfig {
            max_attempts: 2,
            initial_delay: Duration::from_millis(10),
            jitter: false,
            ..Default::default()
        };

        let resolution = resolver_for(&server, retry)
            .resolve(&pack("/lib/Show/S01.Pack/E01/file.mkv"))
            .await
            .unwrap();

        assert_eq!(
            resolution.record.unwrap().link.as_deref(),
            Some("magnet:abc")
        );
    }
}
