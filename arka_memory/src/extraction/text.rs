//! Text primitives shared by the field extractors.
//!
//! All matching is plain case-insensitive substring containment. Lengths and
//! truncation count UTF-16 code units, so an emoji counts as two. Trimming
//! also strips the byte order mark.

use once_cell::sync::Lazy;
use regex::Regex;

/// Known agent identifiers, in reporting order.
pub const AGENT_ROSTER: &[&str] = &[
    "PMO",
    "AGP",
    "heloise-rh",
    "agp-gate",
    "Héloïse",
    "archiviste",
];

/// Causal connectives, tried in order when looking for a rationale.
pub const CAUSAL_CONNECTIVES: &[&str] =
    &["parce que", "car", "en raison de", "étant donné", "vu que"];

/// Keywords marking the sentence that proposes a way forward.
pub const RESOLUTION_KEYWORDS: &[&str] = &["solution", "résolution", "action", "next step"];

const BULLET_MARKERS: &[char] = &['-', '•', '*'];
const LIST_GUARANTEED_ITEMS: usize = 3;
const LIST_ITEMS_MAX: usize = 5;
const IMPACT_LINES_MAX: usize = 3;
const FIRST_SENTENCE_FALLBACK_UNITS: usize = 100;

#[expect(clippy::expect_used, reason = "Pattern is a compile-time constant")]
static SENTENCE_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence terminator pattern is valid"));

/// Length of `s` in UTF-16 code units.
#[must_use]
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Longest prefix of `s` that fits in `max` UTF-16 code units.
///
/// A surrogate pair straddling the limit is dropped whole, so the result can
/// be one unit shorter than `max`.
#[must_use]
pub fn truncate_utf16(s: &str, max: usize) -> String {
    let mut units = 0;
    s.chars()
        .take_while(|ch| {
            units += ch.len_utf16();
            units <= max
        })
        .collect()
}

/// `s` without leading and trailing whitespace or byte order marks.
#[must_use]
pub fn trim_text(s: &str) -> &str {
    s.trim_matches(|ch: char| ch.is_whitespace() || ch == '\u{FEFF}')
}

/// Returns true if the lowercase haystack contains any of the needles.
#[must_use]
pub fn contains_any(lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| lower.contains(needle))
}

/// Byte offset in `content` where `needle` first occurs, ignoring case.
///
/// `needle` must already be lowercase. The offset refers to the original
/// string even when lowercasing changes the byte length of some characters.
#[must_use]
pub fn find_ignore_case(content: &str, needle: &str) -> Option<usize> {
    let mut lowered = String::with_capacity(content.len());
    let mut origins = Vec::with_capacity(content.len());
    for (offset, ch) in content.char_indices() {
        for lower in ch.to_lowercase() {
            lowered.push(lower);
            origins.resize(lowered.len(), offset);
        }
    }
    lowered.find(needle).map(|pos| origins[pos])
}

/// Lines whose trimmed text is non-empty. The lines themselves are kept as-is.
#[must_use]
pub fn non_blank_lines(content: &str) -> Vec<&str> {
    content.split('\n').filter(|line| !trim_text(line).is_empty()).collect()
}

/// Text before the first sentence terminator, trimmed.
///
/// Falls back to the first 100 UTF-16 units of the raw input when that text
/// is empty.
#[must_use]
pub fn first_sentence(content: &str) -> String {
    let first = trim_text(SENTENCE_END.split(content).next().unwrap_or_default());
    if first.is_empty() {
        truncate_utf16(content, FIRST_SENTENCE_FALLBACK_UNITS)
    } else {
        first.to_string()
    }
}

/// Bulleted items, preferring those that mention one of `keywords`.
///
/// A bullet line (`-`, `•` or `*` after trimming) is kept when its line
/// mentions a keyword, or unconditionally while fewer than three items have
/// been kept. At most five items are returned.
#[must_use]
pub fn list_items(content: &str, keywords: &[&str]) -> Vec<String> {
    let mut items = Vec::new();
    for line in content.split('\n') {
        if items.len() == LIST_ITEMS_MAX {
            break;
        }
        let trimmed = trim_text(line);
        let mut chars = trimmed.chars();
        if !chars.next().is_some_and(|c| BULLET_MARKERS.contains(&c)) {
            continue;
        }
        if items.len() < LIST_GUARANTEED_ITEMS || contains_any(&line.to_lowercase(), keywords) {
            items.push(trim_text(chars.as_str()).to_string());
        }
    }
    items
}

/// Known agents mentioned in `content`, deduplicated, in roster order.
#[must_use]
pub fn agent_mentions(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    AGENT_ROSTER
        .iter()
        .filter(|agent| lower.contains(&agent.to_lowercase()))
        .map(|agent| (*agent).to_string())
        .collect()
}

/// Text from the first causal connective up to the next `.`, or empty.
#[must_use]
pub fn rationale(content: &str) -> String {
    CAUSAL_CONNECTIVES
        .iter()
        .find_map(|connective| find_ignore_case(content, connective))
        .map(|start| {
            content[start..]
                .split('.')
                .next()
                .unwrap_or_default()
                .to_string()
        })
        .unwrap_or_default()
}

/// Up to three lines mentioning an impact or consequence.
#[must_use]
pub fn impact_lines(content: &str) -> Vec<String> {
    content
        .split('\n')
        .filter(|line| contains_any(&line.to_lowercase(), &["impact", "conséquence"]))
        .take(IMPACT_LINES_MAX)
        .map(str::to_string)
        .collect()
}

/// First `.`-delimited segment mentioning a keyword, trimmed.
///
/// Keywords are tried in order; the first one present anywhere in the
/// content decides which segment is returned.
#[must_use]
pub fn sentence_with_keyword(content: &str, keywords: &[&str]) -> String {
    let lower = content.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| lower.contains(*keyword))
        .find_map(|keyword| {
            content
                .split('.')
                .find(|segment| segment.to_lowercase().contains(keyword))
        })
        .map(|segment| trim_text(segment).to_string())
        .unwrap_or_default()
}
