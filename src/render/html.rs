use std::path::Path;

use anyhow::{Context, Result};

use crate::types::{Direction, ReportPayload};

/// Minimal HTML escaping for text interpolated into the report.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn direction_badge(direction: Direction) -> String {
    let class = match direction {
        Direction::SupportsYes => "yes",
        Direction::SupportsNo => "no",
        Direction::Mixed => "mixed",
    };
    format!("<span class=\"badge {class}\">{direction}</span>")
}

const STYLE: &str = r#"
    body { margin: 0; background: #f4f7fb; color: #1f2a37;
           font: 15px/1.45 -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; }
    .container { max-width: 1200px; margin: 24px auto 60px; padding: 0 16px; }
    .hero { background: linear-gradient(140deg, #0e7490, #1d4ed8); color: #fff;
            border-radius: 16px; padding: 18px 20px; }
    .hero h1 { margin: 0 0 6px; font-size: 22px; }
    .market-card { background: #fff; border: 1px solid #dde4ee; border-radius: 14px;
                   padding: 14px; margin-top: 14px; }
    .market-card h2 { margin: 0 0 10px; font-size: 18px; }
    .meta { color: #607085; font-size: 13px; margin-bottom: 8px; }
    .queries { border: 1px dashed #dde4ee; border-radius: 10px; padding: 8px 10px;
               margin-bottom: 10px; color: #607085; font-size: 13px; }
    table { width: 100%; border-collapse: collapse; }
    th, td { text-align: left; border-bottom: 1px solid #dde4ee; padding: 8px;
             vertical-align: top; font-size: 13px; }
    th { background: #f0f6ff; font-size: 12px; }
    td a { color: #1d4ed8; text-decoration: none; }
    .badge { display: inline-block; padding: 2px 8px; border-radius: 999px;
             font-size: 12px; font-weight: 600; }
    .badge.yes { color: #117a3f; background: #ecfdf3; }
    .badge.no { color: #b42318; background: #fff1f0; }
    .badge.mixed { color: #8a6b00; background: #fffbeb; }
    .query { margin-top: 4px; color: #607085; font-size: 12px; }
    .empty { color: #607085; font-style: italic; }
"#;

pub fn render(payload: &ReportPayload) -> String {
    let mut cards = String::new();

    for entry in &payload.top_markets {
        let m = &entry.market;
        let mut rows = String::new();
        for art in &entry.top_articles {
            rows.push_str(&format!(
                "<tr><td>{:.3}</td><td>{:.3}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                 <td><a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>\
                 <div class=\"query\">query: {}</div></td></tr>",
                art.score,
                art.confidence,
                direction_badge(art.direction),
                escape(&art.article.source),
                escape(&art.article.published_at),
                escape(&art.article.provider),
                escape(&art.article.url),
                escape(&art.article.title),
                escape(&art.query),
            ));
        }
        if rows.is_empty() {
            rows = "<tr><td colspan=\"7\" class=\"empty\">No mapped articles</td></tr>".to_string();
        }

        let queries = if entry.query_set.is_empty() {
            "none".to_string()
        } else {
            entry
                .query_set
                .iter()
                .map(|q| escape(q))
                .collect::<Vec<_>>()
                .join(" | ")
        };

        cards.push_str(&format!(
            "<section class=\"market-card\">\
             <h2>#{} {}</h2>\
             <div class=\"meta\">Category: {} | Market prob: {:.1}% | Volume: ${:.0} | \
             Liquidity: ${:.0} | News score: {:.3} | Direction: {}</div>\
             <div class=\"meta\"><a href=\"{}\" target=\"_blank\" rel=\"noopener\">Open market</a></div>\
             <div class=\"queries\">Query set: {}</div>\
             <table><thead><tr><th>Score</th><th>Confidence</th><th>Direction</th><th>Source</th>\
             <th>Published</th><th>Provider</th><th>Article</th></tr></thead>\
             <tbody>{}</tbody></table>\
             </section>",
            entry.rank,
            escape(&m.question),
            escape(&m.category),
            m.probability * 100.0,
            m.volume,
            m.liquidity,
            entry.news_relevance_score,
            direction_badge(entry.news_direction),
            escape(&m.url),
            queries,
            rows,
        ));
    }

    if cards.is_empty() {
        cards = "<p>No market rows in payload.</p>".to_string();
    }

    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\" />\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
         <title>Polymarket News Mapping Report</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <main class=\"container\">\n<section class=\"hero\">\n\
         <h1>Polymarket → News Mapping Report</h1>\n\
         <p>Generated at {} | Markets analyzed: {}</p>\n</section>\n{}\n</main>\n</body>\n</html>\n",
        escape(&payload.created_at.to_rfc3339()),
        payload.top_markets.len(),
        cards,
    )
}

pub async fn write_report(payload: &ReportPayload, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create report dir {}", parent.display()))?;
        }
    }
    tokio::fs::write(path, render(payload))
        .await
        .with_context(|| format!("write HTML report {}", path.display()))?;
    Ok(())
}
