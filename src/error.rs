//! Error taxonomy for the digest pipeline.
//!
//! Two tiers: [`ConfigError`] is fatal and aborts the run before any fetch
//! begins; [`FeedError`] is scoped to a single feed and degrades to a
//! per-feed error record in the run metadata.

use thiserror::Error;

/// Fatal configuration failure. The process reports it and exits non-zero.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("feed list is empty; nothing to fetch")]
    EmptyFeeds,

    #[error("reading config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config {path}: {message}")]
    Parse { path: String, message: String },
}

/// Per-feed failure. Caught at the feed boundary and recorded; never aborts
/// the run.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("timed out")]
    Timeout,

    #[error("HTTP status {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed parse error: {0}")]
    Parse(String),
}
