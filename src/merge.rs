//! Cross-feed deduplication and final ranking.
//!
//! The dedupe key is the canonical URL. When two items collide, the one
//! with the greater-or-equal published timestamp wins, so ties resolve in
//! favor of the later-seen item. Ranking is a descending sort on published
//! with a silent bound.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::models::NormalizedItem;

/// Collapse items sharing a canonical URL down to one survivor each.
/// First-seen order of distinct URLs is preserved, which keeps the
/// pre-ranking collection deterministic.
pub fn dedupe_items(items: Vec<NormalizedItem>) -> Vec<NormalizedItem> {
    let mut winners: HashMap<String, NormalizedItem> = HashMap::with_capacity(items.len());
    let mut order: Vec<String> = Vec::with_capacity(items.len());

    for item in items {
        match winners.entry(item.url.clone()) {
            Entry::Vacant(slot) => {
                order.push(item.url.clone());
                slot.insert(item);
            }
            Entry::Occupied(mut slot) => {
                if item.published >= slot.get().published {
                    slot.insert(item);
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|url| winners.remove(&url))
        .collect()
}

/// Sort descending by published timestamp and truncate to `max_total`.
/// Excess items are silently discarded; truncation is not an error. The
/// sort is stable, so equal timestamps keep their collection order.
pub fn rank_items(mut items: Vec<NormalizedItem>, max_total: usize) -> Vec<NormalizedItem> {
    items.sort_by(|a, b| b.published.cmp(&a.published));
    items.truncate(max_total);
    items
}
