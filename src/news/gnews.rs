use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use super::{http_client, NewsProvider};
use crate::types::{parse_timestamp, NewsArticle};

const BASE_URL: &str = "https://gnews.io/api/v4/search";

/// GNews search client. GNews has no window parameter, so results older than
/// the recency window are filtered client-side.
pub struct GNewsProvider {
    api_key: String,
    http: reqwest::Client,
}

impl GNewsProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: http_client(),
        }
    }
}

#[async_trait]
impl NewsProvider for GNewsProvider {
    fn name(&self) -> &'static str {
        "gnews"
    }

    async fn search(
        &self,
        query: &str,
        window_days: u32,
        max_results: usize,
    ) -> Result<Vec<NewsArticle>> {
        let resp: SearchResponse = self
            .http
            .get(BASE_URL)
            .query(&[
                ("q", query),
                ("lang", "en"),
                ("max", max_results.to_string().as_str()),
                ("sortby", "publishedAt"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .context("GET gnews /search failed")?
            .error_for_status()
            .context("gnews non-200")?
            .json()
            .await
            .context("decode gnews json failed")?;

        let cutoff = Utc::now() - Duration::days(window_days as i64);
        Ok(convert_articles(resp, cutoff))
    }
}

fn convert_articles(resp: SearchResponse, cutoff: DateTime<Utc>) -> Vec<NewsArticle> {
    resp.articles
        .into_iter()
        .filter(|item| {
            // Keep articles with unparseable timestamps; only a known-old
            // timestamp excludes.
            match item.published_at.as_deref().map(parse_timestamp) {
                Some(Some(published)) => published >= cutoff,
                _ => true,
            }
        })
        .map(|item| NewsArticle {
            title: item.title.unwrap_or_default(),
            description: item.description.unwrap_or_default(),
            url: item.url.unwrap_or_default(),
            source: item
                .source
                .and_then(|s| s.name)
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "unknown".to_string()),
            published_at: item.published_at.unwrap_or_default(),
            provider: "gnews".to_string(),
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<ArticleItem>,
}

#[derive(Debug, Deserialize)]
struct ArticleItem {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn response(entries: &[(&str, &str)]) -> SearchResponse {
        SearchResponse {
            articles: entries
                .iter()
                .map(|(title, published)| ArticleItem {
                    title: Some(title.to_string()),
                    description: None,
                    url: Some(format!("https://example.com/{title}")),
                    source: None,
                    published_at: if published.is_empty() {
                        None
                    } else {
                        Some(published.to_string())
                    },
                })
                .collect(),
        }
    }

    #[test]
    fn filters_articles_older_than_window() {
        let now = Utc::now();
        let fresh = (now - Duration::hours(12)).to_rfc3339();
        let stale = (now - Duration::days(30)).to_rfc3339();
        let resp = response(&[("fresh", &fresh), ("stale", &stale), ("undated", "")]);

        let cutoff = now - Duration::days(7);
        let kept = convert_articles(resp, cutoff);
        let titles: Vec<&str> = kept.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["fresh", "undated"]);
        assert!(kept.iter().all(|a| a.provider == "gnews"));
    }

    #[test]
    fn missing_source_becomes_unknown() {
        let resp = response(&[("a", "")]);
        let kept = convert_articles(resp, Utc::now() - Duration::days(7));
        assert_eq!(kept[0].source, "unknown");
    }
}
