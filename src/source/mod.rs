pub mod gamma;
pub mod sample;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::Market;

/// Abstraction over where market records come from (live Gamma API, local
/// sample file).
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Fetch up to `limit` active markets. Individual malformed records are
    /// skipped, not errors.
    async fn fetch_markets(&self, limit: usize) -> anyhow::Result<Vec<Market>>;
}

pub use gamma::GammaSource;
pub use sample::SampleSource;

// ---------------------------------------------------------------------------
// Alias-tolerant record normalization
//
// Market payloads are loosely shaped: the same attribute appears under
// different field names depending on endpoint and era, and numerics may be
// JSON numbers or numeric strings. Everything below turns one raw object into
// a strongly-typed Market so the scoring core never sees untyped data.
// ---------------------------------------------------------------------------

/// First non-empty string among the aliased fields.
fn field_str(item: &Value, names: &[&str]) -> Option<String> {
    for name in names {
        match item.get(*name) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.trim().to_string()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// First parseable number among the aliased fields; 0.0 when absent or
/// malformed.
fn field_f64(item: &Value, names: &[&str]) -> f64 {
    for name in names {
        match item.get(*name) {
            Some(Value::Number(n)) => return n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => {
                if let Ok(v) = s.trim().parse::<f64>() {
                    return v;
                }
            }
            _ => {}
        }
    }
    0.0
}

/// A JSON array that may itself arrive as a JSON-encoded string.
fn nested_array(value: Option<&Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => items,
            _ => vec![],
        },
        _ => vec![],
    }
}

fn value_as_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn value_as_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Probability of the "yes" outcome from parallel outcome/price arrays
/// (either may be a JSON-encoded string). Falls back to the first price, then
/// to a fully uncertain 0.5. Clamped to [0, 1].
pub fn parse_probability(outcomes_raw: Option<&Value>, prices_raw: Option<&Value>) -> f64 {
    let outcomes: Vec<String> = nested_array(outcomes_raw)
        .iter()
        .filter_map(value_as_string)
        .collect();
    let prices: Vec<f64> = nested_array(prices_raw).iter().filter_map(value_as_f64).collect();

    if !outcomes.is_empty() && outcomes.len() == prices.len() {
        for (outcome, price) in outcomes.iter().zip(&prices) {
            if outcome.trim().eq_ignore_ascii_case("yes") {
                return price.clamp(0.0, 1.0);
            }
        }
    }
    if let Some(first) = prices.first() {
        return first.clamp(0.0, 1.0);
    }
    0.5
}

/// CLOB-style layouts carry outcome/price inside a `tokens` array instead of
/// parallel top-level arrays.
fn probability_from_tokens(item: &Value) -> Option<f64> {
    let tokens = match item.get("tokens") {
        Some(Value::Array(t)) if !t.is_empty() => t,
        _ => return None,
    };
    let outcomes: Vec<Value> = tokens
        .iter()
        .filter_map(|t| t.get("outcome").cloned())
        .collect();
    let prices: Vec<Value> = tokens.iter().filter_map(|t| t.get("price").cloned()).collect();
    Some(parse_probability(
        Some(&Value::Array(outcomes)),
        Some(&Value::Array(prices)),
    ))
}

/// Normalize one raw market object. Returns None only when the record lacks
/// an identifier or question text.
pub fn market_from_value(item: &Value) -> Option<Market> {
    if !item.is_object() {
        return None;
    }

    let question = field_str(item, &["question", "title"])?;
    let id = field_str(item, &["conditionId", "condition_id", "id"])?;
    let slug = field_str(item, &["slug", "market_slug"]).unwrap_or_default();

    let probability = match (item.get("outcomes"), item.get("outcomePrices")) {
        (None, None) => probability_from_tokens(item).unwrap_or(0.5),
        (outcomes, prices) => parse_probability(outcomes, prices),
    };

    let url = if slug.is_empty() {
        "https://polymarket.com".to_string()
    } else {
        format!("https://polymarket.com/event/{slug}")
    };

    Some(Market {
        id,
        question,
        slug,
        category: field_str(item, &["category"]).unwrap_or_else(|| "Unknown".to_string()),
        volume: field_f64(item, &["volumeNum", "volume"]),
        liquidity: field_f64(item, &["liquidityNum", "liquidity"]),
        probability,
        one_day_change: field_f64(item, &["oneDayPriceChange"]),
        end_date: field_str(item, &["endDate", "end_date_iso"]).unwrap_or_default(),
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalizes_gamma_shape() {
        let item = json!({
            "conditionId": "0xabc",
            "question": "Will it happen?",
            "slug": "will-it-happen",
            "category": "Politics",
            "volumeNum": "12345.5",
            "liquidity": 678.0,
            "oneDayPriceChange": -0.04,
            "endDate": "2026-01-01T00:00:00Z",
            "outcomes": "[\"Yes\", \"No\"]",
            "outcomePrices": "[\"0.62\", \"0.38\"]"
        });
        let m = market_from_value(&item).unwrap();
        assert_eq!(m.id, "0xabc");
        assert_eq!(m.volume, 12345.5);
        assert_eq!(m.liquidity, 678.0);
        assert_eq!(m.one_day_change, -0.04);
        assert_eq!(m.probability, 0.62);
        assert_eq!(m.url, "https://polymarket.com/event/will-it-happen");
    }

    #[test]
    fn skips_records_missing_id_or_question() {
        assert!(market_from_value(&json!({"question": "Q?"})).is_none());
        assert!(market_from_value(&json!({"id": "1"})).is_none());
        assert!(market_from_value(&json!({"id": "1", "question": "  "})).is_none());
        assert!(market_from_value(&json!("not an object")).is_none());
    }

    #[test]
    fn malformed_numerics_default_to_zero() {
        let item = json!({
            "id": "1",
            "question": "Q?",
            "volume": "not-a-number",
            "liquidity": null
        });
        let m = market_from_value(&item).unwrap();
        assert_eq!(m.volume, 0.0);
        assert_eq!(m.liquidity, 0.0);
        assert_eq!(m.one_day_change, 0.0);
        assert_eq!(m.category, "Unknown");
        assert_eq!(m.url, "https://polymarket.com");
    }

    #[test]
    fn probability_prefers_yes_outcome() {
        let p = parse_probability(
            Some(&json!(["No", "Yes"])),
            Some(&json!([0.8, 0.2])),
        );
        assert_eq!(p, 0.2);
    }

    #[test]
    fn probability_falls_back_to_first_price_then_half() {
        let p = parse_probability(Some(&json!(["A", "B"])), Some(&json!(["1.7"])));
        assert_eq!(p, 1.0); // clamped
        assert_eq!(parse_probability(None, None), 0.5);
        assert_eq!(parse_probability(Some(&json!("garbage")), Some(&json!("[]"))), 0.5);
    }

    #[test]
    fn probability_from_clob_tokens() {
        let item = json!({
            "condition_id": "0xdef",
            "title": "Sample market?",
            "market_slug": "sample-market",
            "tokens": [
                {"outcome": "Yes", "price": 0.31},
                {"outcome": "No", "price": 0.69}
            ]
        });
        let m = market_from_value(&item).unwrap();
        assert_eq!(m.probability, 0.31);
        assert_eq!(m.slug, "sample-market");
    }
}
