//! Media library trees and mock indexer responses

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Jackett aggregate search endpoint
pub const RESULTS_PATH: &str = "/api/v2.0/indexers/all/results";

/// API key the mock indexer expects
pub const TEST_API_KEY: &str = "0123456789abcdef";

/// A media library laid out on disk inside a temp directory
pub struct Library {
    /// Keeps the directory alive for the test duration
    pub temp_dir: TempDir,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Root directory of the library
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a file (and its parent directories) relative to the root
    pub fn add_file(&self, relative: &str) -> PathBuf {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().expect("file has a parent"))
            .expect("Failed to create directories");
        fs::write(&path, b"video").expect("Failed to write file");
        path
    }

    /// Glob selecting every file with `extension` below the root
    pub fn glob(&self, extension: &str) -> String {
        format!("{}/**/*.{}", self.root().display(), extension)
    }

    /// Output file location inside the library's temp directory
    pub fn output_path(&self) -> PathBuf {
        self.root().join("matches.yaml")
    }
}

/// Mount a search response for `query` and expect it to be hit `times` times
pub async fn mount_search(
    server: &MockServer,
    query: &str,
    body: serde_json::Value,
    times: u64,
) {
    Mock::given(method("GET"))
        .and(path(RESULTS_PATH))
        .and(query_param("apikey", TEST_API_KEY))
        .and(query_param("Query", query))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

/// Mount a failing status for `query`
pub async fn mount_failure(server: &MockServer, query: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(RESULTS_PATH))
        .and(query_param("Query", query))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// One Jackett result with the given title, link and file count
pub fn jackett_result(title: &str, link: &str, files: u64) -> serde_json::Value {
    serde_json::json!({
        "FirstSeen": "0001-01-01T00:00:00",
        "Tracker": "TestTracker",
        "TrackerId": "testtracker",
        "TrackerType": "public",
        "BlackholeLink": null,
        "Title": title,
        "Guid": format!("https://tracker.example/{title}"),
        "Link": link,
        "Files": files
    })
}
