//! Run orchestration: bounded per-feed fan-out, strict join, merge, rank,
//! metadata assembly.
//!
//! Each feed runs its own Fetch → Parse → Normalize → Filter sequence with
//! no shared mutable state; a failing feed contributes an error record and
//! zero items, never aborting the run. The merge stage starts only after
//! every feed future has resolved. `buffered` (not `buffer_unordered`)
//! keeps collection order equal to config order, which makes the artifacts
//! deterministic for identical inputs.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::{AppConfig, FeedDefinition, RunDefaults};
use crate::error::FeedError;
use crate::fetch;
use crate::filter::passes_keywords;
use crate::merge::{dedupe_items, rank_items};
use crate::models::{FeedErrorRecord, NormalizedItem, RunMetadata};
use crate::normalize::normalize_entry;

/// Concurrent feed fetches in flight at once.
const FEED_CONCURRENCY: usize = 8;

/// Everything a completed run produces: the ranked item set and the run
/// metadata, ready for the artifact writer.
#[derive(Debug)]
pub struct RunOutput {
    pub items: Vec<NormalizedItem>,
    pub metadata: RunMetadata,
}

/// Execute one full run over an already-validated configuration.
///
/// The only error this returns is a failure to construct the HTTP client,
/// which happens before any fetch; every per-feed failure is degraded to a
/// [`FeedErrorRecord`] in the metadata.
pub async fn run(config: &AppConfig) -> Result<RunOutput, Box<dyn std::error::Error>> {
    let client = fetch::build_client(&config.defaults)?;
    // Captured once; doubles as the fallback published instant so a run is
    // internally consistent about "now".
    let run_started = Utc::now();

    info!(feeds = config.feeds.len(), "Starting feed collection");

    let outcomes: Vec<Result<Vec<NormalizedItem>, FeedError>> = stream::iter(&config.feeds)
        .map(|feed| collect_feed(&client, feed, &config.defaults, run_started))
        .buffered(FEED_CONCURRENCY)
        .collect()
        .await;

    // Strict join point: every feed has resolved before anything merges.
    let mut all_items = Vec::new();
    let mut errors = Vec::new();
    for (feed, outcome) in config.feeds.iter().zip(outcomes) {
        match outcome {
            Ok(items) => {
                info!(feed = %feed.id, count = items.len(), "Feed collected");
                all_items.extend(items);
            }
            Err(e) => {
                warn!(feed = %feed.id, url = %feed.url, error = %e, "Feed failed");
                errors.push(FeedErrorRecord {
                    feed_id: feed.id.clone(),
                    feed_name: feed.name.clone(),
                    url: feed.url.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    let collected = all_items.len();
    let deduped = dedupe_items(all_items);
    let duplicates = collected - deduped.len();
    let items = rank_items(deduped, config.defaults.max_total_items);

    info!(
        collected,
        duplicates,
        kept = items.len(),
        failed_feeds = errors.len(),
        "Run assembled"
    );

    let metadata = RunMetadata {
        generated_at: Utc::now(),
        feed_count: config.feeds.len(),
        item_count: items.len(),
        errors,
    };

    Ok(RunOutput { items, metadata })
}

/// One feed's full sequence. Fetch and parse failures propagate to the
/// caller; item-level drops (no URL, keyword-filtered) do not.
async fn collect_feed(
    client: &Client,
    feed: &FeedDefinition,
    defaults: &RunDefaults,
    run_started: DateTime<Utc>,
) -> Result<Vec<NormalizedItem>, FeedError> {
    let timeout = Duration::from_millis(defaults.timeout_ms);
    let body = fetch::fetch_feed_body(client, &feed.url, timeout).await?;
    let entries = crate::feed::parse_entries(&body)?;
    let parsed = entries.len();

    let cap = feed
        .max_items_per_feed
        .unwrap_or(defaults.max_items_per_feed);
    let items: Vec<NormalizedItem> = entries
        .iter()
        .filter_map(|entry| normalize_entry(entry, feed, defaults, run_started))
        .filter(|item| passes_keywords(item, feed.keywords.as_ref()))
        .take(cap)
        .collect();

    debug!(feed = %feed.id, parsed, kept = items.len(), "Normalized feed entries");
    Ok(items)
}
