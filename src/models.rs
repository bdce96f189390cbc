//! Data models for feed entries and their normalized representations.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`RawEntry`]: loosely-typed entry data as parsed from a feed document
//! - [`NormalizedItem`]: the canonical item record emitted to the items artifact
//! - [`FeedErrorRecord`]: one record per failed feed
//! - [`RunMetadata`]: per-run summary emitted to the metadata artifact
//!
//! `NormalizedItem` and `RunMetadata` use camelCase field names because they
//! are the JSON contract consumed by the downstream browser; those names must
//! not drift.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry as it appeared in the source feed, before normalization.
///
/// This is a bag of candidate fields — whatever the source actually sent.
/// RSS and Atom disagree on names (`pubDate` vs `published`, `description`
/// vs `summary`), so every slot is optional and the normalizer resolves
/// each target field from an ordered candidate list. No invariants hold.
#[derive(Debug, Clone, Default)]
pub struct RawEntry {
    /// Entry title, markup and all.
    pub title: Option<String>,
    /// RSS `<link>` text content.
    pub link: Option<String>,
    /// RSS `<guid>` text content (often, but not always, a URL).
    pub guid: Option<String>,
    /// Atom `<link href=..>` values (alternate links only), in document order.
    pub links: Vec<String>,
    /// RSS `<pubDate>` (RFC 2822 by convention, frequently not).
    pub pub_date: Option<String>,
    /// Atom `<published>` (RFC 3339 by convention).
    pub published: Option<String>,
    /// Atom `<updated>`.
    pub updated: Option<String>,
    /// Dublin Core `<dc:date>`.
    pub dc_date: Option<String>,
    /// RSS `<description>`.
    pub description: Option<String>,
    /// Atom `<summary>`.
    pub summary: Option<String>,
    /// Atom `<content>` or RSS `<content:encoded>`.
    pub content: Option<String>,
}

/// The canonical item record, one per surviving entry.
///
/// Created fresh each run and never mutated afterwards; either merged into
/// the final output set or discarded within the same run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedItem {
    /// Stable identifier: hex SHA-256 of the canonical URL (or of the
    /// composite fallback seed). The downstream browser keys read-state on
    /// this, so it must be byte-identical across runs for identical input.
    pub id: String,
    /// Cleaned, whitespace-collapsed title; never empty.
    pub title: String,
    /// Canonical URL with configured tracking parameters removed.
    pub url: String,
    /// Display name of the owning feed.
    pub source: String,
    /// Id of the owning feed.
    pub source_id: String,
    /// Category label of the owning feed.
    pub category: String,
    /// Classifier labels in rule-definition order, no duplicates.
    pub tags: Vec<String>,
    /// Publication instant (RFC 3339 in the artifact). Falls back to the
    /// run's start time when no source date parses.
    pub published: DateTime<Utc>,
    /// Cleaned summary, truncated to the configured bound.
    pub summary: String,
}

/// One record per failed feed. Item-level drops are not errors and are
/// never recorded here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FeedErrorRecord {
    pub feed_id: String,
    pub feed_name: String,
    pub url: String,
    pub error: String,
}

/// Per-run summary written to the metadata artifact alongside the items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunMetadata {
    /// When this run's artifacts were assembled.
    pub generated_at: DateTime<Utc>,
    /// Number of configured feeds (not the number that succeeded).
    pub feed_count: usize,
    /// Number of items in the items artifact after dedupe and ranking.
    pub item_count: usize,
    /// Feed-level failures collected during the run.
    pub errors: Vec<FeedErrorRecord>,
}
