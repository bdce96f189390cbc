//! Feed configuration: typed definitions plus a small file loader.
//!
//! The pipeline consumes an already-typed [`AppConfig`]; this module also
//! provides [`load_config`] to read one from disk. YAML (`.yaml`/`.yml`) and
//! JSON are both accepted — the key names are camelCase either way, matching
//! the documented config shape.
//!
//! An empty or missing feed list is the one fatal configuration error;
//! everything else gets a default.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Static configuration for one syndication source.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedDefinition {
    /// Unique feed id, used in item records and error records.
    pub id: String,
    /// Display name shown by the browser.
    pub name: String,
    /// Feed URL to fetch.
    pub url: String,
    /// Category label copied onto every item from this feed.
    pub category: String,
    /// Per-feed item cap; overrides `defaults.maxItemsPerFeed` when present.
    #[serde(default)]
    pub max_items_per_feed: Option<usize>,
    /// Optional include/exclude keyword gates.
    #[serde(default)]
    pub keywords: Option<KeywordLists>,
}

/// Include/exclude keyword lists for one feed. Absent or empty lists impose
/// no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordLists {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Run-wide defaults. Per-feed values override these where present.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunDefaults {
    pub max_items_per_feed: usize,
    pub max_total_items: usize,
    pub timeout_ms: u64,
    pub user_agent: String,
    /// Query parameter names removed during URL canonicalization.
    pub strip_url_params: Vec<String>,
    /// Character bound for cleaned summaries.
    pub summary_max_chars: usize,
}

impl Default for RunDefaults {
    fn default() -> Self {
        Self {
            max_items_per_feed: 50,
            max_total_items: 200,
            timeout_ms: 10_000,
            user_agent: concat!("feed_digest/", env!("CARGO_PKG_VERSION")).to_string(),
            strip_url_params: [
                "utm_source",
                "utm_medium",
                "utm_campaign",
                "utm_term",
                "utm_content",
                "fbclid",
                "gclid",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            summary_max_chars: 280,
        }
    }
}

/// The full, immutable run configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub feeds: Vec<FeedDefinition>,
    #[serde(default)]
    pub defaults: RunDefaults,
}

impl AppConfig {
    /// Reject configurations the pipeline cannot run against.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.feeds.is_empty() {
            return Err(ConfigError::EmptyFeeds);
        }
        Ok(())
    }
}

/// Load and validate a config file. Format is chosen by extension:
/// `.yaml`/`.yml` parse as YAML, anything else as JSON.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: display.clone(),
        source,
    })?;

    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let config: AppConfig = if ext == "yaml" || ext == "yml" {
        serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: display.clone(),
            message: e.to_string(),
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: display.clone(),
            message: e.to_string(),
        })?
    };

    config.validate()?;
    Ok(config)
}
