use crate::types::{Direction, Market, MarketEntry, RankedArticle};

/// Arithmetic mean of the top articles' scores; 0 when there are none.
pub fn aggregate_score(top: &[RankedArticle]) -> f64 {
    if top.is_empty() {
        return 0.0;
    }
    top.iter().map(|r| r.score).sum::<f64>() / top.len() as f64
}

/// Majority vote over the top articles' directions; anything short of a
/// strict majority between yes and no is mixed.
pub fn aggregate_direction(top: &[RankedArticle]) -> Direction {
    let yes = top.iter().filter(|r| r.direction == Direction::SupportsYes).count();
    let no = top.iter().filter(|r| r.direction == Direction::SupportsNo).count();
    if yes > no {
        Direction::SupportsYes
    } else if no > yes {
        Direction::SupportsNo
    } else {
        Direction::Mixed
    }
}

fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Assemble the payload entry for one market from its already-sorted ranked
/// articles, truncated to `top_k`.
pub fn market_entry(
    rank: usize,
    market: Market,
    query_set: Vec<String>,
    ranked: &[RankedArticle],
    top_k: usize,
) -> MarketEntry {
    let top: Vec<RankedArticle> = ranked
        .iter()
        .take(top_k)
        .map(|r| RankedArticle {
            score: round4(r.score),
            confidence: round4(r.confidence),
            ..r.clone()
        })
        .collect();

    MarketEntry {
        rank,
        market,
        query_set,
        news_relevance_score: round4(aggregate_score(&top)),
        news_direction: aggregate_direction(&top),
        top_articles: top,
    }
}
