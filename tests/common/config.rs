//! Test configuration helpers pointing a run at a mock indexer and temp library

use std::collections::HashMap;
use torrent_sync::Config;
use torrent_sync::config::{API_KEY, GLOB_EXPRESSION, JACKET_BASE_URL, OUTPUT_FILE_PATH};
use wiremock::MockServer;

use super::fixtures::{Library, RESULTS_PATH, TEST_API_KEY};

/// Environment a run against `server` and `library` would see
pub fn test_env(server: &MockServer, library: &Library, extension: &str) -> HashMap<String, String> {
    HashMap::from([
        (API_KEY.to_string(), TEST_API_KEY.to_string()),
        (
            JACKET_BASE_URL.to_string(),
            format!("{}{}", server.uri(), RESULTS_PATH),
        ),
        (GLOB_EXPRESSION.to_string(), library.glob(extension)),
        (
            OUTPUT_FILE_PATH.to_string(),
            library.output_path().display().to_string(),
        ),
    ])
}

/// Build a config from an explicit environment map
pub fn config_from(env: &HashMap<String, String>) -> Config {
    Config::from_lookup(|key| env.get(key).cloned()).expect("Failed to build test config")
}

/// Config for a run over `*.mkv` files in `library` against `server`
pub fn test_config(server: &MockServer, library: &Library) -> Config {
    config_from(&test_env(server, library, "mkv"))
}
