use chrono::{DateTime, Utc};
use url::Url;

use crate::text::{extract_entities, tokenize};
use crate::types::{parse_timestamp, Direction, Market, NewsArticle, RankedArticle};

/// Hostnames that earn the larger source boost (leading "www." stripped
/// before lookup).
const TRUSTED_DOMAINS: &[&str] = &[
    "reuters.com",
    "apnews.com",
    "bloomberg.com",
    "wsj.com",
    "ft.com",
    "nytimes.com",
    "bbc.com",
    "cnbc.com",
    "economist.com",
];

// Direction terms are matched by plain substring containment, not word
// boundaries ("up" matches inside unrelated words). Known imprecision kept
// as-is; the lists are pinned by tests.
const YES_TERMS: &[&str] = &["wins", "approved", "passes", "surges", "up", "positive", "supports"];
const NO_TERMS: &[&str] = &["fails", "rejected", "falls", "down", "negative", "opposes", "denies"];

const W_OVERLAP: f64 = 0.45;
const W_ENTITY: f64 = 0.30;
const W_RECENCY: f64 = 0.20;
const BOOST_TRUSTED: f64 = 0.12;
const BOOST_DEFAULT: f64 = 0.03;
const RECENCY_DECAY_HOURS: f64 = 72.0;
const RECENCY_UNKNOWN: f64 = 0.35;

/// Article URL host, lowercased, with a leading "www." stripped. Empty for
/// unparseable URLs.
pub fn source_domain(url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_lowercase()))
        .unwrap_or_default();
    host.strip_prefix("www.").map(str::to_string).unwrap_or(host)
}

/// Count yes-leaning vs no-leaning terms in `text`; a strict majority either
/// way classifies the direction, anything else (including 0-0) is mixed.
pub fn classify_direction(text: &str) -> Direction {
    let low = text.to_lowercase();
    let yes_hits = YES_TERMS.iter().filter(|t| low.contains(*t)).count();
    let no_hits = NO_TERMS.iter().filter(|t| low.contains(*t)).count();
    if yes_hits > no_hits {
        Direction::SupportsYes
    } else if no_hits > yes_hits {
        Direction::SupportsNo
    } else {
        Direction::Mixed
    }
}

fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Score how relevant `article` is to `market` when surfaced by `query`.
/// Pure given its inputs; the wall clock only enters through `now` (recency
/// decay with a 72h time constant, 0.35 when the timestamp is missing).
pub fn relevance_score(
    market: &Market,
    query: &str,
    article: &NewsArticle,
    now: DateTime<Utc>,
) -> RankedArticle {
    let article_text = format!("{} {}", article.title, article.description);

    let market_tokens = tokenize(&market.question);
    let query_tokens = tokenize(query);
    let article_tokens = tokenize(&article_text);
    let overlap = market_tokens
        .union(&query_tokens)
        .filter(|t| article_tokens.contains(*t))
        .count();
    // Floor of 4 keeps short questions from inflating the ratio.
    let base_overlap = overlap as f64 / market_tokens.len().max(4) as f64;

    let m_entities = extract_entities(&market.question);
    let a_entities = extract_entities(&article_text);
    let entity_overlap =
        m_entities.intersection(&a_entities).count() as f64 / m_entities.len().max(1) as f64;

    let recency = match parse_timestamp(&article.published_at) {
        Some(published) => {
            let age_h = (now - published).num_seconds().max(0) as f64 / 3600.0;
            (-age_h / RECENCY_DECAY_HOURS).exp()
        }
        None => RECENCY_UNKNOWN,
    };

    let source_boost = if TRUSTED_DOMAINS.contains(&source_domain(&article.url).as_str()) {
        BOOST_TRUSTED
    } else {
        BOOST_DEFAULT
    };

    let score = clamp01(
        W_OVERLAP * base_overlap + W_ENTITY * entity_overlap + W_RECENCY * recency + source_boost,
    );
    let confidence = clamp01(0.6 * score + 0.4 * recency);
    let direction = classify_direction(&article_text);

    RankedArticle {
        article: article.clone(),
        score,
        confidence,
        direction,
        query: query.to_string(),
    }
}
