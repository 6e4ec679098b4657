use serde::Deserialize;

/// Runtime configuration, loaded from the environment (with .env support).
/// News provider credentials (`NEWSAPI_KEY`, `GNEWS_API_KEY`) are read
/// separately by the provider registry.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// How many top markets to analyze.
    #[serde(default = "default_top_markets")]
    pub top_markets: usize,
    /// Top mapped articles per market.
    #[serde(default = "default_top_articles")]
    pub top_articles: usize,
    /// Max articles fetched per query/provider.
    #[serde(default = "default_news_per_query")]
    pub news_per_query: usize,
    /// News recency window in days.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    /// Cache TTL in minutes.
    #[serde(default = "default_cache_ttl_min")]
    pub cache_ttl_min: i64,
    /// Delay between provider calls, in milliseconds.
    #[serde(default = "default_pace_ms")]
    pub pace_ms: u64,

    #[serde(default = "default_gamma_host")]
    pub gamma_host: String,
    /// Read markets from this local sample JSON instead of the live API.
    pub sample_file: Option<String>,
    /// Offline fallback used when the live fetch fails.
    #[serde(default = "default_fallback_sample")]
    pub fallback_sample: String,

    /// Optional path for the structured JSON payload.
    pub output_json: Option<String>,
    /// Optional path for the browser-viewable HTML report.
    pub output_html: Option<String>,

    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    #[serde(default)]
    pub no_color: bool,
}

fn default_top_markets() -> usize {
    10
}
fn default_top_articles() -> usize {
    5
}
fn default_news_per_query() -> usize {
    8
}
fn default_window_days() -> u32 {
    7
}
fn default_cache_ttl_min() -> i64 {
    30
}
fn default_pace_ms() -> u64 {
    100
}
fn default_gamma_host() -> String {
    "https://gamma-api.polymarket.com".to_string()
}
fn default_fallback_sample() -> String {
    "docs/polymarket_response_samples.json".to_string()
}
fn default_cache_dir() -> String {
    ".cache/news_mapper".to_string()
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let c = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;
        Ok(c.try_deserialize()?)
    }

    /// Over-fetch the market list so ranking has something to choose from.
    pub fn market_fetch_limit(&self) -> usize {
        (self.top_markets * 20).max(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let c = config::Config::builder().build().unwrap();
        let s: Settings = c.try_deserialize().unwrap();
        assert_eq!(s.top_markets, 10);
        assert_eq!(s.top_articles, 5);
        assert_eq!(s.news_per_query, 8);
        assert_eq!(s.window_days, 7);
        assert_eq!(s.cache_ttl_min, 30);
        assert_eq!(s.pace_ms, 100);
        assert!(s.sample_file.is_none());
        assert!(!s.no_color);
        assert_eq!(s.market_fetch_limit(), 200);
    }
}
