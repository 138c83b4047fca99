mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use torrent_sync::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults from the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "torrent_sync=trace,reqwest=debug".to_string()
        } else {
            "torrent_sync=debug".to_string()
        }
    });

    tracing_subscriber::fmt().with_env_filter(&env_filter).init();

    let mut config = Config::load(cli.env_file.as_deref())?;
    if let Some(policy) = cli.on_query_error {
        config.on_query_error = policy;
    }

    let summary = torrent_sync::run(&config).await?;

    if summary.failed > 0 {
        tracing::warn!(failed = summary.failed, "Some packs were skipped after query failures");
    }

    Ok(())
}
