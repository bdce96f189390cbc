//! Rule-based tag classification over item text.
//!
//! The rule table is an ordered list of `(tag, pattern)` pairs owned by this
//! module; extending it touches nothing else. Rules are evaluated
//! independently in definition order, each contributing its tag at most once,
//! so the output order is the table order — a property the tests pin down.

use itertools::Itertools;
use once_cell::sync::OnceCell;
use regex::Regex;

/// One named classification rule.
struct TagRule {
    tag: &'static str,
    pattern: Regex,
}

/// `(tag, case-insensitive pattern)` in evaluation order.
const RULE_TABLE: &[(&str, &str)] = &[
    (
        "security",
        r"(?i)\b(security|vulnerab\w*|exploit|cve-\d{4}-\d+|breach|malware|ransomware|zero-day)",
    ),
    (
        "privacy",
        r"(?i)\b(privacy|surveillance|tracker\w*|gdpr|data protection|encryption)",
    ),
    (
        "ai",
        r"(?i)\b(ai|artificial intelligence|machine learning|neural|llm\w*|chatbot)\b",
    ),
    (
        "programming",
        r"(?i)\b(programming|compiler|debugger|sdk|refactor\w*|rust|python|javascript)\b",
    ),
    (
        "opensource",
        r"(?i)\b(open[- ]source|github|gitlab|linux|kernel|maintainer)\b",
    ),
    (
        "hardware",
        r"(?i)\b(chip\w*|semiconductor|cpu|gpu|silicon|hardware|firmware)\b",
    ),
    (
        "science",
        r"(?i)\b(research\w*|study|physics|astronom\w*|biolog\w*|climate)\b",
    ),
    (
        "business",
        r"(?i)\b(startup|funding|acquisition|acquire\w*|ipo|layoff\w*|revenue)\b",
    ),
];

fn rules() -> &'static [TagRule] {
    static RULES: OnceCell<Vec<TagRule>> = OnceCell::new();
    RULES.get_or_init(|| {
        RULE_TABLE
            .iter()
            .map(|(tag, pattern)| TagRule {
                tag,
                pattern: Regex::new(pattern).unwrap(),
            })
            .collect()
    })
}

/// Classify text into zero or more tags, in rule-definition order.
///
/// A rule that matches (however many times) contributes its tag exactly
/// once; `unique()` also guards against two rules sharing a tag name.
pub fn classify(text: &str) -> Vec<String> {
    rules()
        .iter()
        .filter(|rule| rule.pattern.is_match(text))
        .map(|rule| rule.tag.to_string())
        .unique()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_yields_empty() {
        assert!(classify("a quiet day with nothing notable").is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(classify("MALWARE found in the wild"), vec!["security"]);
    }

    #[test]
    fn output_follows_rule_order_not_match_position() {
        // "startup" (business, last rule) appears before "breach"
        // (security, first rule) in the text; output still leads with
        // security.
        let tags = classify("startup suffers breach after GitHub leak");
        assert_eq!(tags, vec!["security", "opensource", "business"]);
    }

    #[test]
    fn repeated_matches_contribute_once() {
        let tags = classify("breach after breach after breach");
        assert_eq!(tags, vec!["security"]);
    }

    #[test]
    fn rule_table_tags_are_unique() {
        let mut tags: Vec<&str> = RULE_TABLE.iter().map(|(tag, _)| *tag).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), RULE_TABLE.len());
    }

    #[test]
    fn word_boundaries_hold_for_short_tags() {
        // "ai" must not fire inside unrelated words.
        assert!(classify("the waiter said hello").is_empty());
        assert_eq!(classify("an AI wrote this"), vec!["ai"]);
    }
}
