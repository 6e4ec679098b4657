pub mod gnews;
pub mod newsapi;

use async_trait::async_trait;

use crate::types::NewsArticle;

pub use gnews::GNewsProvider;
pub use newsapi::NewsApiProvider;

/// One upstream news search API. Implementations must filter out results
/// older than the recency window when the API does not do it server-side.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(
        &self,
        query: &str,
        window_days: u32,
        max_results: usize,
    ) -> anyhow::Result<Vec<NewsArticle>>;
}

/// Providers with credentials present in the environment. A missing key
/// skips that provider; no key at all is not an error.
pub fn providers_from_env() -> Vec<Box<dyn NewsProvider>> {
    let mut providers: Vec<Box<dyn NewsProvider>> = Vec::new();
    if let Ok(key) = std::env::var("NEWSAPI_KEY") {
        if !key.trim().is_empty() {
            providers.push(Box::new(NewsApiProvider::new(key.trim().to_string())));
        }
    }
    if let Ok(key) = std::env::var("GNEWS_API_KEY") {
        if !key.trim().is_empty() {
            providers.push(Box::new(GNewsProvider::new(key.trim().to_string())));
        }
    }
    providers
}

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent("polynews/0.1")
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
