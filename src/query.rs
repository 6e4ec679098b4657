use std::collections::HashSet;

use crate::text::{extract_entities, normalize_whitespace};
use crate::types::Market;

/// Build search query variants for one market: the bare question, an
/// entity-focused variant, an analysis variant, a contrarian variant and a
/// category variant. Variants are whitespace-normalized and deduplicated
/// case-insensitively while preserving first-seen order, so fewer than five
/// entries may come back.
pub fn build_queries(market: &Market) -> Vec<String> {
    let q = market.question.trim_matches([' ', '?']).to_string();

    let mut entities: Vec<String> = extract_entities(&market.question).into_iter().collect();
    entities.sort();
    let entity = if entities.is_empty() {
        q.clone()
    } else {
        entities[..entities.len().min(3)].join(" ")
    };

    let category_hint = if market.category.is_empty() || market.category == "Unknown" {
        "current events"
    } else {
        market.category.as_str()
    };

    let variants = [
        q.clone(),
        format!("{entity} latest developments"),
        format!("{q} analysis implications"),
        format!("arguments against: {q}"),
        format!("{category_hint} breaking news {entity}"),
    ];

    let mut seen: HashSet<String> = HashSet::new();
    let mut deduped: Vec<String> = Vec::new();
    for variant in variants {
        let cleaned = normalize_whitespace(&variant);
        if !cleaned.is_empty() && seen.insert(cleaned.to_lowercase()) {
            deduped.push(cleaned);
        }
    }
    deduped
}
