use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Run counters, incremented throughout the pipeline and logged once at the
/// end of the run.
#[derive(Default)]
pub struct Stats {
    markets_loaded: AtomicU64,
    markets_ranked: AtomicU64,
    queries_built: AtomicU64,
    provider_calls: AtomicU64,
    cache_hits: AtomicU64,
    provider_errors: AtomicU64,
    articles_fetched: AtomicU64,
    articles_ranked: AtomicU64,
}

impl Stats {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_markets_loaded(&self, n: u64) {
        self.markets_loaded.store(n, Ordering::Relaxed);
    }

    pub fn set_markets_ranked(&self, n: u64) {
        self.markets_ranked.store(n, Ordering::Relaxed);
    }

    pub fn add_queries(&self, n: u64) {
        self.queries_built.fetch_add(n, Ordering::Relaxed);
    }

    pub fn inc_provider_call(&self) {
        self.provider_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_provider_error(&self) {
        self.provider_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_articles_fetched(&self, n: u64) {
        self.articles_fetched.fetch_add(n, Ordering::Relaxed);
    }

    pub fn add_articles_ranked(&self, n: u64) {
        self.articles_ranked.fetch_add(n, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            markets_loaded: self.markets_loaded.load(Ordering::Relaxed),
            markets_ranked: self.markets_ranked.load(Ordering::Relaxed),
            queries_built: self.queries_built.load(Ordering::Relaxed),
            provider_calls: self.provider_calls.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            provider_errors: self.provider_errors.load(Ordering::Relaxed),
            articles_fetched: self.articles_fetched.load(Ordering::Relaxed),
            articles_ranked: self.articles_ranked.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub markets_loaded: u64,
    pub markets_ranked: u64,
    pub queries_built: u64,
    pub provider_calls: u64,
    pub cache_hits: u64,
    pub provider_errors: u64,
    pub articles_fetched: u64,
    pub articles_ranked: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let s = Stats::new();
        s.set_markets_loaded(20);
        s.set_markets_ranked(5);
        s.add_queries(5);
        s.add_queries(4);
        s.inc_provider_call();
        s.inc_cache_hit();
        s.inc_provider_error();
        s.add_articles_fetched(8);
        s.add_articles_ranked(3);
        let snap = s.snapshot();
        assert_eq!(snap.markets_loaded, 20);
        assert_eq!(snap.queries_built, 9);
        assert_eq!(snap.provider_calls, 1);
        assert_eq!(snap.cache_hits, 1);
        assert_eq!(snap.provider_errors, 1);
        assert_eq!(snap.articles_fetched, 8);
        assert_eq!(snap.articles_ranked, 3);
    }
}
