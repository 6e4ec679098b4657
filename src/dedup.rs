use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::scoring::relevance_score;
use crate::types::{Market, NewsArticle, RankedArticle};

/// Merge the (query, article) pairs collected for one market into at most one
/// RankedArticle per unique article, sorted for presentation.
///
/// Two explicit passes keep the tie-break rules auditable:
/// 1. group by identity, first-seen article record wins as canonical metadata;
/// 2. re-score the canonical article under every query that surfaced it and
///    keep the query with the maximum score (first encountered wins ties).
///
/// Final order is descending by (score, confidence).
pub fn rank_articles(
    market: &Market,
    pairs: &[(String, NewsArticle)],
    now: DateTime<Utc>,
) -> Vec<RankedArticle> {
    // Pass 1: canonical article per identity, in first-seen order.
    let mut seen: HashSet<String> = HashSet::new();
    let mut canonical: Vec<(String, &NewsArticle)> = Vec::new();
    for (_, article) in pairs {
        let key = article.identity();
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        canonical.push((key, article));
    }

    // Pass 2: best query per canonical article.
    let mut ranked: Vec<RankedArticle> = Vec::with_capacity(canonical.len());
    for (key, article) in canonical {
        let mut best: Option<RankedArticle> = None;
        for (query, candidate) in pairs {
            if candidate.identity() != key {
                continue;
            }
            let scored = relevance_score(market, query, article, now);
            if best.as_ref().map_or(true, |b| scored.score > b.score) {
                best = Some(scored);
            }
        }
        if let Some(best) = best {
            ranked.push(best);
        }
    }

    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(b.confidence.total_cmp(&a.confidence))
    });
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn market(question: &str) -> Market {
        Market {
            id: "m1".to_string(),
            question: question.to_string(),
            slug: "m1".to_string(),
            category: "Business".to_string(),
            volume: 0.0,
            liquidity: 0.0,
            probability: 0.5,
            one_day_change: 0.0,
            end_date: String::new(),
            url: String::new(),
        }
    }

    fn article(title: &str, url: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            description: String::new(),
            url: url.to_string(),
            source: "unknown".to_string(),
            published_at: String::new(),
            provider: "newsapi".to_string(),
        }
    }

    #[test]
    fn duplicate_url_keeps_best_scoring_query() {
        let m = market("Will Apple acquire Acme?");
        let a = article(
            "Apple moves to acquire Acme in landmark deal analysis",
            "https://example.com/a",
        );
        // "analysis" appears in the article, so the second query scores
        // strictly higher than the bare-entity one.
        let pairs = vec![
            ("Apple".to_string(), a.clone()),
            ("Apple acquisition analysis implications".to_string(), a.clone()),
        ];
        let ranked = rank_articles(&m, &pairs, Utc::now());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].query, "Apple acquisition analysis implications");
    }

    #[test]
    fn first_seen_article_is_canonical_metadata() {
        let m = market("Will Apple acquire Acme?");
        let first = article("Apple to acquire Acme", "https://example.com/a");
        let mut second = first.clone();
        second.title = "Apple to acquire Acme - liveblog".to_string();
        let pairs = vec![
            ("q1".to_string(), first.clone()),
            ("q2".to_string(), second),
        ];
        let ranked = rank_articles(&m, &pairs, Utc::now());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].article.title, first.title);
    }

    #[test]
    fn title_is_identity_when_url_missing() {
        let m = market("Will Apple acquire Acme?");
        let pairs = vec![
            ("q".to_string(), article("Same Story", "")),
            ("q".to_string(), article("same story", "")),
            ("q".to_string(), article("Other Story", "")),
        ];
        let ranked = rank_articles(&m, &pairs, Utc::now());
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn articles_without_any_identity_are_dropped() {
        let m = market("Will Apple acquire Acme?");
        let pairs = vec![("q".to_string(), article("", ""))];
        assert!(rank_articles(&m, &pairs, Utc::now()).is_empty());
    }

    #[test]
    fn output_sorted_by_score_then_confidence() {
        let now = Utc::now();
        let m = market("Will Apple acquire Acme?");
        let strong = article("Apple to acquire Acme", "https://example.com/strong");
        let weak = article("Unrelated headline", "https://example.com/weak");
        let pairs = vec![
            ("q".to_string(), weak),
            ("q".to_string(), strong),
        ];
        let ranked = rank_articles(&m, &pairs, now);
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].score >= ranked[1].score);
        assert!(ranked[0].article.url.ends_with("strong"));
    }
}
