//! RSI (Relative Strength Index), single value over the whole window.
//!
//! Uses a simple mean of the most recent `period` gains and losses rather
//! than Wilder's smoothing, recomputed from scratch on every call.
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss)), clamped to [0, 100].
//! Fewer than `period + 1` closes: 50 (neutral). avg_loss below 1e-6: 100.

use crate::domain::price::PriceSeries;

pub const NEUTRAL_RSI: f64 = 50.0;

const MIN_AVG_LOSS: f64 = 1e-6;

pub fn rsi(series: &PriceSeries, period: usize) -> f64 {
    let closes: Vec<f64> = series.closes().collect();
    rsi_values(&closes, period)
}

pub fn rsi_values(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|pair| {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            }
        })
        .unzip();

    let start = gains.len() - period;
    let avg_gain = gains[start..].iter().sum::<f64>() / period as f64;
    let avg_loss = losses[start..].iter().sum::<f64>() / period as f64;

    if avg_loss < MIN_AVG_LOSS {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}
