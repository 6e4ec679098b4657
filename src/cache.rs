use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::NewsArticle;

/// Time-boxed disk cache for provider responses, keyed by
/// (provider, lowercased query, window-days). Any read problem is a miss,
/// never an error; writes are last-writer-wins.
pub struct NewsCache {
    root: PathBuf,
    ttl_minutes: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct CacheBlob {
    created_at: DateTime<Utc>,
    articles: Vec<NewsArticle>,
}

impl NewsCache {
    pub fn new(root: impl Into<PathBuf>, ttl_minutes: i64) -> Self {
        Self {
            root: root.into(),
            ttl_minutes,
        }
    }

    fn entry_path(&self, provider: &str, query: &str, window_days: u32) -> PathBuf {
        let raw = format!("{}|{}|{}", provider, query.to_lowercase(), window_days);
        let digest = hex::encode(Sha256::digest(raw.as_bytes()));
        self.root.join(format!("{}_{}.json", provider, &digest[..24]))
    }

    /// Cached articles for the key, or None on miss/expiry/corruption.
    pub async fn load(
        &self,
        provider: &str,
        query: &str,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> Option<Vec<NewsArticle>> {
        let path = self.entry_path(provider, query, window_days);
        let blob = read_blob(&path).await?;
        let age_min = (now - blob.created_at).num_seconds() as f64 / 60.0;
        if age_min > self.ttl_minutes as f64 {
            return None;
        }
        Some(blob.articles)
    }

    pub async fn store(
        &self,
        provider: &str,
        query: &str,
        window_days: u32,
        articles: &[NewsArticle],
        now: DateTime<Utc>,
    ) -> Result<()> {
        let path = self.entry_path(provider, query, window_days);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create cache dir {}", parent.display()))?;
        }
        let blob = CacheBlob {
            created_at: now,
            articles: articles.to_vec(),
        };
        let body = serde_json::to_vec_pretty(&blob).context("encode cache blob")?;
        tokio::fs::write(&path, body)
            .await
            .with_context(|| format!("write cache entry {}", path.display()))?;
        Ok(())
    }
}

async fn read_blob(path: &Path) -> Option<CacheBlob> {
    let body = tokio::fs::read(path).await.ok()?;
    serde_json::from_slice(&body).ok()
}
