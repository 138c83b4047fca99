//! Per-run deduplication of season packs
//!
//! Many files share one pack directory; only the first of them may trigger an
//! indexer query. [`SeenPacks`] is owned by the scanner for the duration of a run and
//! only ever grows.

use std::collections::HashSet;

/// Set of pack directory keys already handled in this run
#[derive(Debug, Default)]
pub struct SeenPacks {
    keys: HashSet<String>,
}

impl SeenPacks {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `pack_key` and report whether this is its first observation
    ///
    /// Returns `true` exactly once per distinct key; every later call with the same
    /// key returns `false`. Keys are compared as exact strings.
    pub fn is_new(&mut self, pack_key: &str) -> bool {
        if self.keys.contains(pack_key) {
            return false;
        }
        self.keys.insert(pack_key.to_string())
    }
}
