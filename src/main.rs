mod cache;
mod config;
mod dedup;
mod news;
mod query;
mod ranking;
mod render;
mod report;
mod scoring;
mod source;
mod stats;
mod text;
mod types;

use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::cache::NewsCache;
use crate::config::Settings;
use crate::news::NewsProvider;
use crate::source::{GammaSource, MarketSource, SampleSource};
use crate::stats::Stats;
use crate::types::{Market, NewsArticle, ReportPayload};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let s = Settings::from_env()?;
    let color = !s.no_color && std::io::stdout().is_terminal();

    let providers = news::providers_from_env();
    let provider_names: Vec<&str> = providers.iter().map(|p| p.name()).collect();
    render::terminal::print_header(color, s.top_markets, &provider_names);

    let stats = Stats::new();

    let markets = resolve_markets(&s).await?;
    if markets.is_empty() {
        bail!("no active markets resolved from any source");
    }
    stats.set_markets_loaded(markets.len() as u64);

    let selected = ranking::pick_top_markets(markets, s.top_markets);
    stats.set_markets_ranked(selected.len() as u64);
    render::terminal::print_market_table(&selected, color);

    let cache = NewsCache::new(&s.cache_dir, s.cache_ttl_min);
    let mut payload = ReportPayload {
        run_id: Uuid::new_v4(),
        created_at: Utc::now(),
        top_markets: Vec::with_capacity(selected.len()),
    };

    for (idx, market) in selected.into_iter().enumerate() {
        let query_set = query::build_queries(&market);
        stats.add_queries(query_set.len() as u64);

        let mut pairs: Vec<(String, NewsArticle)> = Vec::new();
        for q in &query_set {
            for provider in &providers {
                let items = fetch_with_cache(&cache, provider.as_ref(), q, &s, &stats).await;
                pairs.extend(items.into_iter().map(|a| (q.clone(), a)));
                // Gentle pacing toward provider rate limits.
                tokio::time::sleep(std::time::Duration::from_millis(s.pace_ms)).await;
            }
        }

        let ranked = dedup::rank_articles(&market, &pairs, Utc::now());
        stats.add_articles_ranked(ranked.len() as u64);

        let entry = report::market_entry(idx + 1, market, query_set, &ranked, s.top_articles);
        render::terminal::print_mapping(&entry, ranked.len(), color);
        payload.top_markets.push(entry);
    }

    if let Some(path) = s.output_json.as_deref().filter(|p| !p.is_empty()) {
        let body = serde_json::to_vec_pretty(&payload).context("encode JSON payload")?;
        tokio::fs::write(path, body)
            .await
            .with_context(|| format!("write JSON output {path}"))?;
        tracing::info!(path, "saved JSON output");
    }

    if let Some(path) = s.output_html.as_deref().filter(|p| !p.is_empty()) {
        render::html::write_report(&payload, Path::new(path)).await?;
        tracing::info!(path, "saved HTML report");
    }

    if providers.is_empty() {
        render::terminal::print_no_provider_warning(color);
    }

    let snap = stats.snapshot();
    tracing::info!(
        markets_loaded = snap.markets_loaded,
        markets_ranked = snap.markets_ranked,
        queries_built = snap.queries_built,
        provider_calls = snap.provider_calls,
        cache_hits = snap.cache_hits,
        provider_errors = snap.provider_errors,
        articles_fetched = snap.articles_fetched,
        articles_ranked = snap.articles_ranked,
        "run summary"
    );

    Ok(())
}

/// Markets from the configured sample file, or the live Gamma API with an
/// offline fallback sample when the live fetch fails.
async fn resolve_markets(s: &Settings) -> Result<Vec<Market>> {
    if let Some(path) = s.sample_file.as_deref().filter(|p| !p.is_empty()) {
        return SampleSource::new(path)
            .fetch_markets(s.market_fetch_limit())
            .await;
    }

    let live = GammaSource::new(s.gamma_host.clone());
    match live.fetch_markets(s.market_fetch_limit()).await {
        Ok(markets) => Ok(markets),
        Err(err) => {
            tracing::warn!(error = %err, "live market fetch failed");
            if Path::new(&s.fallback_sample).exists() {
                tracing::info!(path = %s.fallback_sample, "using offline fallback sample");
                SampleSource::new(&s.fallback_sample)
                    .fetch_markets(s.market_fetch_limit())
                    .await
            } else {
                Err(err.context("live fetch failed and no fallback sample available"))
            }
        }
    }
}

/// Cached-or-live article fetch for one (provider, query). Provider failures
/// degrade to an empty list; only the cache-write error is logged.
async fn fetch_with_cache(
    cache: &NewsCache,
    provider: &dyn NewsProvider,
    query: &str,
    s: &Settings,
    stats: &Arc<Stats>,
) -> Vec<NewsArticle> {
    stats.inc_provider_call();

    if let Some(items) = cache.load(provider.name(), query, s.window_days, Utc::now()).await {
        stats.inc_cache_hit();
        tracing::debug!(provider = provider.name(), query, n = items.len(), "cache hit");
        return items;
    }

    match provider.search(query, s.window_days, s.news_per_query).await {
        Ok(items) => {
            stats.add_articles_fetched(items.len() as u64);
            if let Err(err) = cache
                .store(provider.name(), query, s.window_days, &items, Utc::now())
                .await
            {
                tracing::warn!(provider = provider.name(), error = %err, "cache write failed");
            }
            items
        }
        Err(err) => {
            stats.inc_provider_error();
            tracing::warn!(provider = provider.name(), query, error = %err, "provider fetch failed");
            Vec::new()
        }
    }
}
