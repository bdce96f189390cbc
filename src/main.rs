//! # Feed Digest
//!
//! A feed aggregation pipeline that fetches configured RSS/Atom sources,
//! normalizes their entries into canonical item records, deduplicates and
//! ranks them, and writes a JSON artifact pair for a static read-only
//! browser.
//!
//! ## Usage
//!
//! ```sh
//! feed_digest -c feeds.yaml -o public/data
//! ```
//!
//! ## Architecture
//!
//! One run is a pipeline:
//! 1. **Collection**: fetch + parse every configured feed concurrently
//!    (bounded fan-out, per-feed timeout isolation)
//! 2. **Normalization**: per-entry cleaning, identity, tagging, filtering
//! 3. **Merge**: cross-feed dedupe by canonical URL, rank, bound
//! 4. **Output**: write `items.json` and `meta.json` atomically
//!
//! A failing feed contributes an error record instead of items; only an
//! invalid configuration aborts the run.

use std::error::Error;

use clap::Parser;
use tracing::{error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use feed_digest::cli::Cli;
use feed_digest::config::load_config;
use feed_digest::outputs::json::write_artifacts;
use feed_digest::pipeline;
use feed_digest::utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("feed_digest starting up");

    let args = Cli::parse();

    // Fatal configuration errors abort before any fetch begins.
    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!(path = %args.config.display(), error = %e, "Fatal configuration error");
            return Err(e.into());
        }
    };
    info!(
        feeds = config.feeds.len(),
        path = %args.config.display(),
        "Loaded configuration"
    );

    // Early check: ensure the artifact directory is writable before
    // spending network time.
    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let output = pipeline::run(&config).await?;

    write_artifacts(&output.items, &output.metadata, &args.output_dir).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        items = output.metadata.item_count,
        failed_feeds = output.metadata.errors.len(),
        "Execution complete"
    );

    Ok(())
}
