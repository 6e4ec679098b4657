use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

use super::{market_from_value, MarketSource};
use crate::types::Market;

const USER_AGENT: &str = "polynews/0.1";
const HTTP_TIMEOUT_SECS: u64 = 15;

/// Live Polymarket Gamma API source.
pub struct GammaSource {
    host: String,
    http: reqwest::Client,
}

impl GammaSource {
    pub fn new(host: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { host, http }
    }
}

#[async_trait]
impl MarketSource for GammaSource {
    async fn fetch_markets(&self, limit: usize) -> Result<Vec<Market>> {
        let url = format!(
            "{}/markets?active=true&closed=false&limit={}",
            self.host.trim_end_matches('/'),
            limit
        );

        let body: Value = self
            .http
            .get(&url)
            .send()
            .await
            .context("GET /markets failed")?
            .error_for_status()
            .context("GET /markets non-200")?
            .json()
            .await
            .context("decode /markets json failed")?;

        // The endpoint answers either a bare list or {"data": [...]}.
        let items = match &body {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) => match map.get("data") {
                Some(Value::Array(items)) => items.as_slice(),
                _ => &[],
            },
            _ => &[],
        };

        let markets: Vec<Market> = items.iter().filter_map(market_from_value).collect();
        tracing::debug!(raw = items.len(), parsed = markets.len(), "gamma markets fetched");
        Ok(markets)
    }
}
