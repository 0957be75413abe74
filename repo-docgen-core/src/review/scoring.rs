//! Additive point rules for the four quality criteria.
//!
//! Every function returns a value in `[0, 100]` and never fails.

use regex::Regex;
use std::sync::OnceLock;

pub const ESSENTIAL_KEYWORDS: [&str; 8] = [
    "overview",
    "installation",
    "usage",
    "api",
    "examples",
    "contributing",
    "license",
    "changelog",
];

pub const PLACEHOLDER_TOKENS: [&str; 5] = ["todo", "placeholder", "example.com", "your_", "replace_this"];

pub(crate) const ACTION_WORDS: [&str; 6] = ["install", "run", "execute", "configure", "setup", "create"];
pub(crate) const STEP_PATTERNS: [&str; 5] = ["1.", "2.", "step", "first", "then"];
const TROUBLESHOOTING_WORDS: [&str; 3] = ["troubleshoot", "common issues", "faq"];
const SUPPORT_WORDS: [&str; 4] = ["contact", "support", "help", "issue"];
pub(crate) const ACCESSIBILITY_WORDS: [&str; 7] = [
    "alt text",
    "screen reader",
    "accessibility",
    "a11y",
    "keyboard navigation",
    "contrast",
    "aria-label",
];

/// Link whose target contains whitespace, e.g. `[docs](my file.md)`.
pub(crate) fn malformed_link_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\([^\)]*\s[^\)]*\)").ok())
        .as_ref()
}

pub(crate) fn fence_count(document: &str) -> usize {
    document.matches("```").count()
}

/// Every `#` character counts, so `### Setup` is three headers' worth.
pub(crate) fn header_count(document: &str) -> usize {
    document.matches('#').count()
}

pub(crate) fn has_list(document: &str) -> bool {
    document.lines().any(|l| {
        let l = l.trim_start();
        l.starts_with("- ") || l.starts_with("* ")
    })
}

pub(crate) fn has_links(document: &str) -> bool {
    document.contains('[') && document.contains("](")
}

/// Mean words per `.`-separated fragment. Empty fragments, including the one
/// after a trailing period, still count toward the divisor.
pub(crate) fn average_sentence_length(document: &str) -> f64 {
    let (fragments, words) = document
        .split('.')
        .fold((0usize, 0usize), |(fragments, words), s| {
            (fragments + 1, words + s.split_whitespace().count())
        });
    words as f64 / fragments.max(1) as f64
}

pub(crate) fn count_present(lower: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| lower.contains(*w)).count()
}

pub(crate) fn malformed_link_count(document: &str) -> usize {
    malformed_link_regex()
        .map(|re| re.find_iter(document).count())
        .unwrap_or(0)
}

/// Number of markdown problem kinds: an odd fence count, and any malformed links.
pub(crate) fn markdown_issue_count(document: &str) -> usize {
    let unbalanced = usize::from(fence_count(document) % 2 != 0);
    let malformed = usize::from(malformed_link_count(document) > 0);
    unbalanced + malformed
}

pub fn completeness(document: &str, primary_language: &str) -> f64 {
    let lower = document.to_lowercase();
    let mut score = 0.0;

    let found = count_present(&lower, &ESSENTIAL_KEYWORDS);
    score += found as f64 / ESSENTIAL_KEYWORDS.len() as f64 * 40.0;

    if document.contains("```") || lower.contains("example") {
        score += 20.0;
    }

    let length = document.chars().count();
    if length > 1000 {
        score += 20.0;
    } else if length > 500 {
        score += 10.0;
    }

    let language = primary_language.to_lowercase();
    if !language.is_empty() && language != "unknown" && lower.contains(&language) {
        score += 20.0;
    }

    f64::min(score, 100.0)
}

pub fn accuracy(document: &str) -> f64 {
    let lower = document.to_lowercase();
    let placeholders = count_present(&lower, &PLACEHOLDER_TOKENS);
    let markdown = markdown_issue_count(document);
    // No terminology checks are defined; they would cost 3 points each.
    let terminology = 0usize;

    let score = 80.0 - placeholders as f64 * 10.0 - markdown as f64 * 5.0 - terminology as f64 * 3.0;
    f64::max(score, 0.0)
}

pub fn clarity(document: &str) -> f64 {
    let mut score = 0.0;

    match header_count(document) {
        n if n >= 3 => score += 25.0,
        n if n >= 1 => score += 15.0,
        _ => {}
    }
    if document.contains("```") {
        score += 20.0;
    }
    if has_list(document) {
        score += 15.0;
    }
    if has_links(document) {
        score += 10.0;
    }

    let avg = average_sentence_length(document);
    if avg < 20.0 {
        score += 20.0;
    } else if avg < 30.0 {
        score += 10.0;
    }

    f64::min(score, 100.0)
}

pub fn usability(document: &str) -> f64 {
    let lower = document.to_lowercase();
    let mut score = 0.0;

    score += f64::min(count_present(&lower, &ACTION_WORDS) as f64 * 10.0, 30.0);
    if count_present(&lower, &STEP_PATTERNS) > 0 {
        score += 25.0;
    }
    if count_present(&lower, &TROUBLESHOOTING_WORDS) > 0 {
        score += 20.0;
    }
    if count_present(&lower, &SUPPORT_WORDS) > 0 {
        score += 15.0;
    }
    if count_present(&lower, &ACCESSIBILITY_WORDS) > 0 {
        score += 10.0;
    }

    f64::min(score, 100.0)
}
