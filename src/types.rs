use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One active prediction market, normalized from whatever shape the source
/// returned. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    pub id: String,
    pub question: String,
    pub slug: String,
    pub category: String,
    pub volume: f64,
    pub liquidity: f64,
    /// Price of the "yes" outcome, clamped to [0, 1].
    pub probability: f64,
    pub one_day_change: f64,
    pub end_date: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    /// ISO-8601 timestamp as returned by the provider; may be empty or junk.
    pub published_at: String,
    pub provider: String,
}

impl NewsArticle {
    /// Dedup identity: URL when present, title otherwise. Empty when the
    /// article carries neither.
    pub fn identity(&self) -> String {
        let key = if self.url.trim().is_empty() {
            &self.title
        } else {
            &self.url
        };
        key.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    SupportsYes,
    SupportsNo,
    Mixed,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::SupportsYes => "supports_yes",
            Direction::SupportsNo => "supports_no",
            Direction::Mixed => "mixed",
        };
        f.write_str(s)
    }
}

/// A news article with its relevance to one market, carrying the query that
/// produced the best score for this article.
#[derive(Debug, Clone, Serialize)]
pub struct RankedArticle {
    pub article: NewsArticle,
    pub score: f64,
    pub confidence: f64,
    pub direction: Direction,
    pub query: String,
}

/// Per-market slice of the final report.
#[derive(Debug, Clone, Serialize)]
pub struct MarketEntry {
    pub rank: usize,
    pub market: Market,
    pub query_set: Vec<String>,
    pub news_relevance_score: f64,
    pub news_direction: Direction,
    pub top_articles: Vec<RankedArticle>,
}

/// Stable contract between the pipeline and the renderers.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPayload {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub top_markets: Vec<MarketEntry>,
}

/// Lenient ISO-8601 parse. Providers disagree on offsets; bare datetimes and
/// bare dates are read as UTC. Anything else is None, never an error.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    let ts = ts.trim();
    if ts.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(ts, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(url: &str, title: &str) -> NewsArticle {
        NewsArticle {
            title: title.to_string(),
            description: String::new(),
            url: url.to_string(),
            source: "unknown".to_string(),
            published_at: String::new(),
            provider: "newsapi".to_string(),
        }
    }

    #[test]
    fn identity_prefers_url() {
        let a = article("https://Example.com/A ", "Some Title");
        assert_eq!(a.identity(), "https://example.com/a");
    }

    #[test]
    fn identity_falls_back_to_title() {
        let a = article("", "  Some Title ");
        assert_eq!(a.identity(), "some title");
        let empty = article(" ", "");
        assert!(empty.identity().is_empty());
    }

    #[test]
    fn parse_timestamp_accepts_common_shapes() {
        assert!(parse_timestamp("2025-08-20T12:00:00Z").is_some());
        assert!(parse_timestamp("2025-08-20T12:00:00+02:00").is_some());
        assert!(parse_timestamp("2025-08-20T12:00:00.123").is_some());
        assert!(parse_timestamp("2025-08-20").is_some());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn direction_serializes_snake_case() {
        let json = serde_json::to_string(&Direction::SupportsYes).unwrap();
        assert_eq!(json, "\"supports_yes\"");
        assert_eq!(Direction::Mixed.to_string(), "mixed");
    }
}
