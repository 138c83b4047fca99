//! Orchestration loop: walk, classify, dedup, resolve, append
//!
//! Entries are handled strictly one at a time in the order the walker yields them,
//! so records land in the output file in walk order. The only await points are the
//! indexer request and the output append.

use crate::classifier::PackPath;
use crate::config::{Config, QueryFailurePolicy};
use crate::dedup::SeenPacks;
use crate::error::Result;
use crate::indexer::IndexerClient;
use crate::output::OutputSink;
use crate::resolver::MatchResolver;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Counters for one scan run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// File entries pulled from the walker
    pub entries_seen: usize,
    /// Distinct season packs an indexer query was issued for
    pub packs_queried: usize,
    /// Records appended to the output file
    pub matches_written: usize,
    /// Packs whose query returned no exact title
    pub unmatched: usize,
    /// Packs skipped because their query failed (skip policy only)
    pub failed: usize,
}

/// Drives a single pass over a sequence of file entries
pub struct PackScanner {
    resolver: MatchResolver,
    sink: OutputSink,
    on_query_error: QueryFailurePolicy,
}

impl PackScanner {
    /// Create a scanner from its collaborators
    pub fn new(
        resolver: MatchResolver,
        sink: OutputSink,
        on_query_error: QueryFailurePolicy,
    ) -> Self {
        Self {
            resolver,
            sink,
            on_query_error,
        }
    }

    /// Build the indexer client, resolver and output sink described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let indexer = IndexerClient::from_config(config)?;
        let resolver = MatchResolver::new(indexer, config.retry.clone());
        let sink = OutputSink::new(&config.output_file_path);
        Ok(Self::new(resolver, sink, config.on_query_error))
    }

    /// Output sink records are appended to
    pub fn sink(&self) -> &OutputSink {
        &self.sink
    }

    /// Process every entry, querying each new season pack once
    ///
    /// The dedup set lives for this call only, so running the scanner again starts
    /// from an empty set.
    ///
    /// # Errors
    /// Stops at the first walk error, output error, or (with
    /// [`QueryFailurePolicy::Abort`]) indexer failure. Records appended before the
    /// failure stay on disk.
    pub async fn run<I>(&self, entries: I) -> Result<ScanSummary>
    where
        I: IntoIterator<Item = Result<PathBuf>>,
    {
        let mut seen = SeenPacks::new();
        let mut summary = ScanSummary::default();

        for entry in entries {
            let entry = entry?;
            summary.entries_seen += 1;
            self.process_entry(&entry, &mut seen, &mut summary).await?;
        }

        info!(
            entries = summary.entries_seen,
            packs = summary.packs_queried,
            matches = summary.matches_written,
            unmatched = summary.unmatched,
            failed = summary.failed,
            "Scan complete"
        );

        Ok(summary)
    }

    async fn process_entry(
        &self,
        entry: &Path,
        seen: &mut SeenPacks,
        summary: &mut ScanSummary,
    ) -> Result<()> {
        let pack = PackPath::classify(entry);

        if !pack.is_season_pack() || !seen.is_new(&pack.pack_key()) {
            return Ok(());
        }

        summary.packs_queried += 1;

        let resolution = match self.resolver.resolve(&pack).await {
            Ok(resolution) => resolution,
            Err(e) if self.on_query_error == QueryFailurePolicy::Skip => {
                warn!(
                    error = %e,
                    pack_name = %pack.pack_name,
                    pack_path = %pack.pack_path.display(),
                    "Indexer query failed, skipping pack"
                );
                summary.failed += 1;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        info!(
            full_path = %pack.entry.display(),
            release_path = %pack.release_path.display(),
            release_name = %pack.release_name,
            pack_name = %pack.pack_name,
            pack_path = %pack.pack_path.display(),
            pack_parent_path = %pack.pack_parent_path.display(),
            results = resolution.result_count,
            match_files = ?resolution.matched.as_ref().and_then(|m| m.files),
            match_title = ?resolution.matched.as_ref().map(|m| m.title.as_str()),
            "Processing file entry"
        );

        match resolution.record {
            Some(record) => {
                self.sink.append(&record).await?;
                summary.matches_written += 1;
                debug!(
                    pack_name = %record.pack_name,
                    output = %self.sink.path().display(),
                    "Match recorded"
                );
            }
            None => summary.unmatched += 1,
        }

        Ok(())
    }
}
