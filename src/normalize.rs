//! Entry normalization: one [`RawEntry`] in, one [`NormalizedItem`] out —
//! or nothing, when the entry has no resolvable URL.
//!
//! Every field is resolved from an explicit ordered candidate list, so the
//! priority order is a single auditable line per field rather than nested
//! conditionals. Malformed field values degrade to defaults; no error
//! escapes this module.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sha2::{Digest, Sha256};
use url::Url;

use crate::classify::classify;
use crate::clean::{strip_markup, truncate_chars};
use crate::config::{FeedDefinition, RunDefaults};
use crate::models::{NormalizedItem, RawEntry};

/// Placeholder title for entries whose title cleans down to nothing.
const UNTITLED: &str = "(untitled)";

/// Normalize one raw entry against its owning feed definition.
///
/// Returns `None` only when no URL candidate is present — such an entry
/// cannot be identified or deduplicated safely. That is an item drop, not
/// an error.
pub fn normalize_entry(
    entry: &RawEntry,
    feed: &FeedDefinition,
    defaults: &RunDefaults,
    now: DateTime<Utc>,
) -> Option<NormalizedItem> {
    let title = match strip_markup(entry.title.as_deref().unwrap_or_default()) {
        cleaned if cleaned.is_empty() => UNTITLED.to_string(),
        cleaned => cleaned,
    };

    // Candidate order: link, guid, first alternate link.
    let url_candidates = [
        entry.link.as_deref(),
        entry.guid.as_deref(),
        entry.links.first().map(String::as_str),
    ];
    let raw_url = first_present(&url_candidates)?;
    let url = canonical_url(raw_url, &defaults.strip_url_params);

    let published = resolve_published(entry, now);

    // Candidate order: description, summary, content.
    let summary_candidates = [
        entry.description.as_deref(),
        entry.summary.as_deref(),
        entry.content.as_deref(),
    ];
    let summary = first_present(&summary_candidates)
        .map(strip_markup)
        .map(|text| truncate_chars(&text, defaults.summary_max_chars))
        .unwrap_or_default();

    let tags = classify(&format!("{title} {summary}"));
    let id = stable_id(&url, &feed.id, &title, published);

    Some(NormalizedItem {
        id,
        title,
        url,
        source: feed.name.clone(),
        source_id: feed.id.clone(),
        category: feed.category.clone(),
        tags,
        published,
        summary,
    })
}

/// First candidate that is present and non-empty after trimming.
fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// Canonicalize an item URL: drop configured tracking parameters, clear an
/// emptied query string and a bare fragment marker. A candidate that fails
/// to parse as a URL passes through unchanged — present-but-malformed links
/// are still worth keeping.
pub fn canonical_url(raw: &str, strip_params: &[String]) -> String {
    let raw = raw.trim();
    let mut parsed = match Url::parse(raw) {
        Ok(parsed) => parsed,
        Err(_) => return raw.to_string(),
    };

    if parsed.query().is_some() {
        let kept: Vec<(String, String)> = parsed
            .query_pairs()
            .filter(|(key, _)| !strip_params.iter().any(|param| param.as_str() == key.as_ref()))
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        if kept.is_empty() {
            parsed.set_query(None);
        } else {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(kept.iter().map(|(key, value)| (key.as_str(), value.as_str())))
                .finish();
            parsed.set_query(Some(&query));
        }
    }

    if parsed.fragment().is_some_and(str::is_empty) {
        parsed.set_fragment(None);
    }

    parsed.to_string()
}

/// Resolve the publication instant from date candidates in priority order:
/// Atom `published`, RSS `pubDate`, `updated`, `dc:date`. When none parse,
/// the run's start instant stands in — unknown dates rank as fresh.
fn resolve_published(entry: &RawEntry, now: DateTime<Utc>) -> DateTime<Utc> {
    [
        &entry.published,
        &entry.pub_date,
        &entry.updated,
        &entry.dc_date,
    ]
    .into_iter()
    .flatten()
    .find_map(|value| parse_date(value))
    .unwrap_or(now)
}

/// Best-effort instant parse: RFC 3339, RFC 2822, then naive fallbacks
/// (assumed UTC).
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_rfc2822(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// Deterministic item identifier: hex SHA-256 of the canonical URL, or of
/// the composite seed `(feed id, title, published)` when no canonical URL
/// survived. The downstream browser keys read-state on this value.
pub fn stable_id(
    canonical_url: &str,
    feed_id: &str,
    title: &str,
    published: DateTime<Utc>,
) -> String {
    if !canonical_url.is_empty() {
        format!("{:x}", Sha256::digest(canonical_url.as_bytes()))
    } else {
        let seed = format!("{}\x00{}\x00{}", feed_id, title, published.to_rfc3339());
        format!("{:x}", Sha256::digest(seed.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn feed() -> FeedDefinition {
        FeedDefinition {
            id: "example".to_string(),
            name: "Example Feed".to_string(),
            url: "https://example.com/rss".to_string(),
            category: "tech".to_string(),
            max_items_per_feed: None,
            keywords: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
    }

    fn strip_params() -> Vec<String> {
        RunDefaults::default().strip_url_params
    }

    #[test]
    fn canonical_url_strips_tracking_params() {
        let url = canonical_url(
            "https://example.com/post?utm_source=rss&utm_medium=feed&id=7",
            &strip_params(),
        );
        assert_eq!(url, "https://example.com/post?id=7");
    }

    #[test]
    fn canonical_url_clears_emptied_query_and_bare_fragment() {
        let url = canonical_url("https://example.com/post?utm_source=rss#", &strip_params());
        assert_eq!(url, "https://example.com/post");
    }

    #[test]
    fn canonical_url_passes_malformed_through() {
        assert_eq!(canonical_url("not a url at all", &strip_params()), "not a url at all");
    }

    #[test]
    fn stable_id_is_deterministic_and_distinct() {
        let a1 = stable_id("https://example.com/a", "f", "t", now());
        let a2 = stable_id("https://example.com/a", "other-feed", "other", now());
        let b = stable_id("https://example.com/b", "f", "t", now());
        // URL alone determines the id when present.
        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert_eq!(a1.len(), 64);
    }

    #[test]
    fn stable_id_falls_back_to_composite_seed() {
        let with_url = stable_id("", "feed-a", "Title", now());
        let same = stable_id("", "feed-a", "Title", now());
        let other_feed = stable_id("", "feed-b", "Title", now());
        assert_eq!(with_url, same);
        assert_ne!(with_url, other_feed);
    }

    #[test]
    fn entry_without_any_url_is_dropped() {
        let entry = RawEntry {
            title: Some("has a title but nothing else".to_string()),
            ..RawEntry::default()
        };
        assert!(normalize_entry(&entry, &feed(), &RunDefaults::default(), now()).is_none());
    }

    #[test]
    fn fully_empty_entry_is_dropped() {
        let entry = RawEntry::default();
        assert!(normalize_entry(&entry, &feed(), &RunDefaults::default(), now()).is_none());
    }

    #[test]
    fn guid_and_atom_links_back_up_the_link_field() {
        let via_guid = RawEntry {
            guid: Some("https://example.com/from-guid".to_string()),
            ..RawEntry::default()
        };
        let via_links = RawEntry {
            links: vec!["https://example.com/from-atom".to_string()],
            ..RawEntry::default()
        };
        let defaults = RunDefaults::default();
        let item = normalize_entry(&via_guid, &feed(), &defaults, now()).unwrap();
        assert_eq!(item.url, "https://example.com/from-guid");
        let item = normalize_entry(&via_links, &feed(), &defaults, now()).unwrap();
        assert_eq!(item.url, "https://example.com/from-atom");
    }

    #[test]
    fn empty_title_gets_placeholder() {
        let entry = RawEntry {
            title: Some("<p>   </p>".to_string()),
            link: Some("https://example.com/x".to_string()),
            ..RawEntry::default()
        };
        let item = normalize_entry(&entry, &feed(), &RunDefaults::default(), now()).unwrap();
        assert_eq!(item.title, "(untitled)");
    }

    #[test]
    fn date_candidates_resolve_in_priority_order() {
        let entry = RawEntry {
            link: Some("https://example.com/x".to_string()),
            published: Some("2026-02-01T08:00:00Z".to_string()),
            pub_date: Some("Sun, 01 Mar 2026 08:00:00 GMT".to_string()),
            ..RawEntry::default()
        };
        let item = normalize_entry(&entry, &feed(), &RunDefaults::default(), now()).unwrap();
        assert_eq!(
            item.published,
            Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn rfc2822_pub_date_parses_when_it_is_the_first_candidate() {
        let entry = RawEntry {
            link: Some("https://example.com/x".to_string()),
            pub_date: Some("Sun, 01 Mar 2026 08:30:00 +0200".to_string()),
            ..RawEntry::default()
        };
        let item = normalize_entry(&entry, &feed(), &RunDefaults::default(), now()).unwrap();
        assert_eq!(
            item.published,
            Utc.with_ymd_and_hms(2026, 3, 1, 6, 30, 0).unwrap()
        );
    }

    #[test]
    fn unparseable_dates_fall_back_to_run_time() {
        let entry = RawEntry {
            link: Some("https://example.com/x".to_string()),
            pub_date: Some("next Tuesday-ish".to_string()),
            updated: Some("also not a date".to_string()),
            ..RawEntry::default()
        };
        let item = normalize_entry(&entry, &feed(), &RunDefaults::default(), now()).unwrap();
        assert_eq!(item.published, now());
    }

    #[test]
    fn summary_is_cleaned_truncated_and_optional() {
        let defaults = RunDefaults::default();
        let entry = RawEntry {
            link: Some("https://example.com/x".to_string()),
            description: Some(format!("<p>{}</p>", "word ".repeat(100))),
            ..RawEntry::default()
        };
        let item = normalize_entry(&entry, &feed(), &defaults, now()).unwrap();
        assert!(item.summary.chars().count() <= defaults.summary_max_chars);
        assert!(item.summary.ends_with('…'));

        let bare = RawEntry {
            link: Some("https://example.com/y".to_string()),
            ..RawEntry::default()
        };
        let item = normalize_entry(&bare, &feed(), &defaults, now()).unwrap();
        assert!(item.summary.is_empty());
    }

    #[test]
    fn feed_fields_are_copied_onto_the_item() {
        let entry = RawEntry {
            title: Some("Chip startup raises funding".to_string()),
            link: Some("https://example.com/x".to_string()),
            ..RawEntry::default()
        };
        let item = normalize_entry(&entry, &feed(), &RunDefaults::default(), now()).unwrap();
        assert_eq!(item.source, "Example Feed");
        assert_eq!(item.source_id, "example");
        assert_eq!(item.category, "tech");
        assert_eq!(item.tags, vec!["hardware", "business"]);
    }
}
