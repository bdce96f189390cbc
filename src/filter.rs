//! Per-feed include/exclude keyword gating.
//!
//! Both gates run over the item's combined title+summary text,
//! case-insensitively. An item must clear both to survive; absent or empty
//! lists impose no constraint.

use crate::config::KeywordLists;
use crate::models::NormalizedItem;

/// True when the item passes the feed's keyword gates.
pub fn passes_keywords(item: &NormalizedItem, keywords: Option<&KeywordLists>) -> bool {
    let Some(lists) = keywords else {
        return true;
    };

    let haystack = format!("{} {}", item.title, item.summary).to_lowercase();

    let include: Vec<&str> = lists
        .include
        .iter()
        .map(|keyword| keyword.trim())
        .filter(|keyword| !keyword.is_empty())
        .collect();
    if !include.is_empty()
        && !include
            .iter()
            .any(|keyword| haystack.contains(&keyword.to_lowercase()))
    {
        return false;
    }

    let excluded = lists
        .exclude
        .iter()
        .map(|keyword| keyword.trim())
        .filter(|keyword| !keyword.is_empty())
        .any(|keyword| haystack.contains(&keyword.to_lowercase()));

    !excluded
}
