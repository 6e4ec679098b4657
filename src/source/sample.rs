use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use super::{market_from_value, MarketSource};
use crate::types::Market;

/// Offline market source reading one of the sample-response JSON layouts:
/// a bare list, `gamma_markets`, `gamma."GET /markets"`, or
/// `clob_markets.data`.
pub struct SampleSource {
    path: PathBuf,
}

impl SampleSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn candidates(data: &Value) -> &[Value] {
        if let Value::Array(items) = data {
            return items.as_slice();
        }
        if let Value::Object(map) = data {
            if let Some(Value::Array(items)) = map.get("gamma_markets") {
                return items.as_slice();
            }
            if let Some(Value::Array(items)) =
                map.get("gamma").and_then(|g| g.get("GET /markets"))
            {
                return items.as_slice();
            }
            if let Some(Value::Array(items)) =
                map.get("clob_markets").and_then(|c| c.get("data"))
            {
                return items.as_slice();
            }
        }
        &[]
    }
}

#[async_trait]
impl MarketSource for SampleSource {
    async fn fetch_markets(&self, limit: usize) -> Result<Vec<Market>> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("read sample file {}", self.path.display()))?;
        let data: Value = serde_json::from_str(&body)
            .with_context(|| format!("parse sample file {}", self.path.display()))?;

        let markets: Vec<Market> = Self::candidates(&data)
            .iter()
            .filter_map(market_from_value)
            .take(limit)
            .collect();
        tracing::debug!(path = %self.path.display(), parsed = markets.len(), "sample markets loaded");
        Ok(markets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_sample(tag: &str, body: &Value) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "polynews-sample-{}-{}.json",
            tag,
            std::process::id()
        ));
        std::fs::write(&path, serde_json::to_vec(body).unwrap()).unwrap();
        path
    }

    #[tokio::test]
    async fn reads_gamma_markets_layout() {
        let body = json!({
            "gamma_markets": [
                {"id": "1", "question": "Q one?"},
                {"id": "2", "question": "Q two?"},
                {"no_question": true}
            ]
        });
        let path = write_sample("gamma", &body);
        let markets = SampleSource::new(&path).fetch_markets(10).await.unwrap();
        assert_eq!(markets.len(), 2);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn reads_clob_layout_and_respects_limit() {
        let body = json!({
            "clob_markets": {
                "data": [
                    {"condition_id": "a", "title": "A?", "tokens": [{"outcome": "Yes", "price": 0.4}]},
                    {"condition_id": "b", "title": "B?"},
                    {"condition_id": "c", "title": "C?"}
                ]
            }
        });
        let path = write_sample("clob", &body);
        let markets = SampleSource::new(&path).fetch_markets(2).await.unwrap();
        assert_eq!(markets.len(), 2);
        assert_eq!(markets[0].probability, 0.4);
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn unknown_layout_yields_empty() {
        let path = write_sample("unknown", &json!({"something": "else"}));
        let markets = SampleSource::new(&path).fetch_markets(10).await.unwrap();
        assert!(markets.is_empty());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let src = SampleSource::new("/definitely/not/here.json");
        assert!(src.fetch_markets(10).await.is_err());
    }
}
