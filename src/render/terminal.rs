use chrono::Utc;

use super::{fmt_pct, paint, trim_to, Ansi};
use crate::types::{Direction, Market, MarketEntry};

const RULE_WIDTH: usize = 96;

fn direction_color(direction: Direction) -> &'static str {
    match direction {
        Direction::SupportsYes => Ansi::GREEN,
        Direction::SupportsNo => Ansi::RED,
        Direction::Mixed => Ansi::YELLOW,
    }
}

pub fn print_header(color: bool, top_n: usize, providers: &[&str]) {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{}", paint(&rule, Ansi::CYAN, color));
    println!(
        "{}",
        paint(
            "POLYMARKET → NEWS MAPPING",
            &format!("{}{}", Ansi::BOLD, Ansi::CYAN),
            color
        )
    );
    let providers = if providers.is_empty() {
        "none".to_string()
    } else {
        providers.join(", ")
    };
    println!(
        "{}",
        paint(
            &format!(
                "UTC {} | top_n={} | providers={}",
                Utc::now().format("%Y-%m-%dT%H:%M:%S"),
                top_n,
                providers
            ),
            Ansi::DIM,
            color
        )
    );
    println!("{}", paint(&rule, Ansi::CYAN, color));
}

pub fn print_market_table(markets: &[Market], color: bool) {
    println!(
        "\n{}",
        paint(
            "Top Polymarket Candidates",
            &format!("{}{}", Ansi::BOLD, Ansi::MAGENTA),
            color
        )
    );
    let rule = "-".repeat(RULE_WIDTH);
    println!("{rule}");
    println!(
        "{:<3} {:<12} {:>7} {:>7} {:>11} {:>11}  Question",
        "#", "Category", "Prob", "1D Δ", "Volume", "Liquidity"
    );
    println!("{rule}");
    for (idx, m) in markets.iter().enumerate() {
        let change = m.one_day_change;
        let change_color = if change > 0.0 {
            Ansi::GREEN
        } else if change < 0.0 {
            Ansi::RED
        } else {
            Ansi::YELLOW
        };
        let change_text = format!("{change:+7.3}");
        println!(
            "{:<3} {:<12} {:>7} {} {:>11.0} {:>11.0}  {}",
            idx + 1,
            trim_to(&m.category, 12),
            fmt_pct(m.probability),
            paint(&change_text, change_color, color),
            m.volume,
            m.liquidity,
            trim_to(&m.question, 40)
        );
    }
    println!("{rule}");
}

/// Per-market mapping block: query set, aggregates, and the top articles.
pub fn print_mapping(entry: &MarketEntry, total_hits: usize, color: bool) {
    let m = &entry.market;
    println!(
        "\n{}",
        paint(
            &format!("[{}] {}", m.category, m.question),
            &format!("{}{}", Ansi::BOLD, Ansi::BLUE),
            color
        )
    );
    println!("{}", paint(&format!("Market: {}", m.url), Ansi::DIM, color));
    println!(
        "{}",
        paint(
            &format!(
                "Query set ({}): {}",
                entry.query_set.len(),
                entry.query_set.join(" | ")
            ),
            Ansi::DIM,
            color
        )
    );

    if entry.top_articles.is_empty() {
        println!("{}", paint("No news found for this market.", Ansi::YELLOW, color));
        return;
    }

    println!(
        "{}",
        paint(
            &format!(
                "Aggregate score={:.3} | news_direction={} | hits={}",
                entry.news_relevance_score, entry.news_direction, total_hits
            ),
            direction_color(entry.news_direction),
            color
        )
    );

    println!(
        "{:>7} {:>7} {:<12} {:<18} {:<20}  Title",
        "Score", "Conf", "Dir", "Src", "When"
    );
    for item in &entry.top_articles {
        let published = if item.article.published_at.is_empty() {
            "unknown"
        } else {
            item.article.published_at.as_str()
        };
        println!(
            "{:>7.3} {:>7.3} {} {:<18} {:<20}  {}",
            item.score,
            item.confidence,
            paint(
                &format!("{:<12}", item.direction.to_string()),
                direction_color(item.direction),
                color
            ),
            trim_to(&item.article.source, 18),
            trim_to(published, 20),
            trim_to(&item.article.title, 48)
        );
        println!(
            "{}",
            paint(&format!("        {}", item.article.url), Ansi::DIM, color)
        );
    }
}

pub fn print_no_provider_warning(color: bool) {
    println!(
        "\n{}",
        paint(
            "No news provider keys detected. Set NEWSAPI_KEY and/or GNEWS_API_KEY.",
            Ansi::YELLOW,
            color
        )
    );
    println!(
        "{}",
        paint(
            "Top markets were still fetched and ranked, but news mapping is empty.",
            Ansi::YELLOW,
            color
        )
    );
}
