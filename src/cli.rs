use clap::Parser;
use std::path::PathBuf;
use torrent_sync::QueryFailurePolicy;

#[derive(Debug, Parser)]
#[command(name = "torrent-sync")]
#[command(author, version, about = "Match season packs in a media library against a Jackett indexer")]
pub struct Cli {
    /// Load environment variables from this file instead of ./.env
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// What to do when an indexer query fails: abort or skip (overrides ON_QUERY_ERROR)
    #[arg(long)]
    pub on_query_error: Option<QueryFailurePolicy>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
