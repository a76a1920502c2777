//! Short outcome labels from free-text market questions
//!
//! Grouped markets repeat the event title in every sub-market question
//! ("Will Bitcoin reach $150,000 by December 31?"), so the label is recovered
//! by a fixed list of rules evaluated top to bottom. The order is policy:
//! price-ladder questions are labelled by their dollar bracket, so both
//! extraction rules run before any sentence trimming, and reordering the
//! trims changes the output.

use regex::Regex;
use std::sync::LazyLock;

/// Label used when nothing survives cleaning
pub const FALLBACK_LABEL: &str = "Yes";

/// Extraction rules, first match wins and becomes the whole label
const EXTRACT_PATTERNS: [&str; 2] = [
    // Dollar range, "$100,000 - $110,000"
    r"\$\d[\d,]*(?:\.\d+)?(?:[kKmMbBtT]\b)?\s*[-–]\s*\$\d[\d,]*(?:\.\d+)?(?:[kKmMbBtT]\b)?",
    // Single dollar amount, "$150,000" or "$1.5M"
    r"\$\d[\d,]*(?:\.\d+)?(?:[kKmMbBtT]\b)?",
];

/// Trim rules, applied in order to whatever the previous rule left
const TRIM_PATTERNS: [&str; 6] = [
    r"^\s*Will\s+",
    r"(?i)^\s*What price will .+? hit in \d{4}\??\s*",
    r"(?i)\b\w+\s+(?:reach|hit)\s+",
    r"(?i)\s*by December.*$",
    r"(?i)\s*in \d{4}\?$",
    r"\?$",
];

static EXTRACT_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(&EXTRACT_PATTERNS));
static TRIM_RULES: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(&TRIM_PATTERNS));

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| Regex::new(pattern).ok())
        .collect()
}

/// Derive a short label from a sub-market question
///
/// The first occurrence of `market_title` is removed before any rule runs.
pub fn clean(question: &str, market_title: &str) -> String {
    let remaining = if market_title.is_empty() {
        question.to_string()
    } else {
        question.replacen(market_title, "", 1)
    };

    for rule in EXTRACT_RULES.iter() {
        if let Some(found) = rule.find(&remaining) {
            return found.as_str().to_string();
        }
    }

    let trimmed = TRIM_RULES.iter().fold(remaining, |text, rule| {
        rule.replace(&text, "").into_owned()
    });

    or_fallback(trimmed.trim())
}

/// Label for a named outcome, falling back when the name is blank
pub fn outcome_name(name: &str) -> String {
    or_fallback(name.trim())
}

fn or_fallback(label: &str) -> String {
    if label.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        label.to_string()
    }
}
