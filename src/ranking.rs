use crate::types::Market;

const W_VOLUME: f64 = 0.5;
const W_LIQUIDITY: f64 = 0.3;
const W_MOVEMENT: f64 = 0.2;

/// Rank markets by a composite of normalized volume, liquidity and 24h price
/// movement, and keep the top `top_n`. The sort is stable, so markets with
/// equal composites keep their original relative order.
pub fn pick_top_markets(markets: Vec<Market>, top_n: usize) -> Vec<Market> {
    if markets.is_empty() {
        return markets;
    }

    // Normalizers fall back to 1.0 when the whole set is zero.
    let max_volume = non_zero_max(markets.iter().map(|m| m.volume));
    let max_liquidity = non_zero_max(markets.iter().map(|m| m.liquidity));
    let max_move = non_zero_max(markets.iter().map(|m| m.one_day_change.abs()));

    let composite = |m: &Market| -> f64 {
        W_VOLUME * (m.volume / max_volume)
            + W_LIQUIDITY * (m.liquidity / max_liquidity)
            + W_MOVEMENT * (m.one_day_change.abs() / max_move)
    };

    let mut ranked = markets;
    ranked.sort_by(|a, b| composite(b).total_cmp(&composite(a)));
    ranked.truncate(top_n);
    ranked
}

fn non_zero_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 {
        max
    } else {
        1.0
    }
}
