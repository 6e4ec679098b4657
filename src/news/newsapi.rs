use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde::Deserialize;

use super::{http_client, NewsProvider};
use crate::types::NewsArticle;

const BASE_URL: &str = "https://newsapi.org/v2/everything";

/// NewsAPI `/v2/everything` client. The `from` parameter handles the recency
/// window server-side.
pub struct NewsApiProvider {
    api_key: String,
    http: reqwest::Client,
}

impl NewsApiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: http_client(),
        }
    }
}

#[async_trait]
impl NewsProvider for NewsApiProvider {
    fn name(&self) -> &'static str {
        "newsapi"
    }

    async fn search(
        &self,
        query: &str,
        window_days: u32,
        max_results: usize,
    ) -> Result<Vec<NewsArticle>> {
        let since = (Utc::now() - Duration::days(window_days as i64))
            .format("%Y-%m-%d")
            .to_string();

        let resp: SearchResponse = self
            .http
            .get(BASE_URL)
            .query(&[
                ("q", query),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("from", since.as_str()),
                ("pageSize", max_results.to_string().as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("GET newsapi /everything failed")?
            .error_for_status()
            .context("newsapi non-200")?
            .json()
            .await
            .context("decode newsapi json failed")?;

        Ok(resp
            .articles
            .into_iter()
            .map(|item| item.into_article())
            .collect())
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<ArticleItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ArticleItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    source: Option<SourceItem>,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SourceItem {
    #[serde(default)]
    name: Option<String>,
}

impl ArticleItem {
    fn into_article(self) -> NewsArticle {
        NewsArticle {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            url: self.url.unwrap_or_default(),
            source: self
                .source
                .and_then(|s| s.name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "unknown".to_string()),
            published_at: self.published_at.unwrap_or_default(),
            provider: "newsapi".to_string(),
        }
    }
}
