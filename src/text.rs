use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "before", "by", "for", "from", "has", "how", "if",
    "in", "is", "it", "of", "on", "or", "that", "the", "their", "this", "to", "was", "were",
    "what", "when", "where", "which", "who", "will", "with",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z0-9']+").unwrap());

// A maximal run of capitalized words counts as one entity candidate.
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").unwrap());

/// Lowercased content tokens of `text`: alphanumeric/apostrophe runs minus
/// stopwords and anything of length <= 2. Only used for set overlap.
pub fn tokenize(text: &str) -> HashSet<String> {
    WORD_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|tok| tok.len() > 2 && !STOPWORD_SET.contains(tok.as_str()))
        .collect()
}

/// Capitalized-sequence entity candidates, e.g. "New York City" as a single
/// entity. Candidates of length <= 2 after trimming are dropped.
pub fn extract_entities(text: &str) -> HashSet<String> {
    ENTITY_RE
        .find_iter(text)
        .map(|m| m.as_str().trim().to_string())
        .filter(|c| c.len() > 2)
        .collect()
}

/// Collapse runs of whitespace to single spaces and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
