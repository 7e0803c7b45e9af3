//! Motif indexer worker
//!
//! Reads game records as JSON lines, runs the motif detectors over each game
//! and writes one features object per game.

use tracing::info;

use indexer_worker::input::{open_input, open_output, GameLines};
use indexer_worker::{reanalyze, JsonLinesSink, WorkerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load .env file for local dev
    let _ = dotenvy::dotenv();

    let mut config = WorkerConfig::from_env()?;
    let args: Vec<String> = std::env::args().collect();
    config.apply_args(&args)?;
    info!(
        input = %config.input,
        output = %config.output,
        batch_size = config.batch_size,
        max_workers = config.max_workers,
        disabled = config.disabled_motifs.len(),
        "Worker config loaded"
    );

    let mut games = GameLines::new(open_input(&config.input)?);
    let mut sink = JsonLinesSink::new(open_output(&config.output)?);
    let summary = reanalyze(&mut games, &config, &mut sink).await?;
    sink.flush()?;
    let malformed = games.finish()?;

    info!(
        processed = summary.processed,
        failed = summary.failed + malformed,
        "Reanalysis complete"
    );

    Ok(())
}
