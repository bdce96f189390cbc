//! Markup stripping and bounded truncation for feed-supplied text.
//!
//! Feed titles and summaries arrive as anything from plain text to full
//! HTML fragments wrapped in CDATA. [`strip_markup`] reduces all of that to
//! collapsed plain text; [`truncate_chars`] bounds it without splitting a
//! multi-byte character.

use once_cell::sync::OnceCell;
use regex::Regex;
use scraper::Html;

const ELLIPSIS: char = '…';

/// Strip markup from feed text: CDATA wrappers, script/style blocks, then
/// every remaining tag. HTML entities are decoded, whitespace runs collapse
/// to single spaces, and the result is trimmed.
pub fn strip_markup(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    // CDATA markers are feed plumbing, not content; keep what they wrap.
    let unwrapped = input.replace("<![CDATA[", "").replace("]]>", "");

    static RE_BLOCKS: OnceCell<Regex> = OnceCell::new();
    let re_blocks = RE_BLOCKS.get_or_init(|| {
        Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)\s*>").unwrap()
    });
    let stripped = re_blocks.replace_all(&unwrapped, " ");

    // An unclosed script/style swallows the rest of the input anyway.
    static RE_TAIL: OnceCell<Regex> = OnceCell::new();
    let re_tail = RE_TAIL.get_or_init(|| Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*$").unwrap());
    let stripped = re_tail.replace(&stripped, " ");

    let fragment = Html::parse_fragment(&stripped);
    let text = fragment.root_element().text().collect::<Vec<_>>().join(" ");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max_chars` characters. When truncation occurs the
/// result ends in an ellipsis and trailing whitespace before it is trimmed;
/// otherwise the input is returned unchanged. Counts characters, not bytes,
/// so a multi-byte character is never split.
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if input.chars().count() <= max_chars {
        return input.to_string();
    }
    let kept: String = input.chars().take(max_chars - 1).collect();
    format!("{}{}", kept.trim_end(), ELLIPSIS)
}
