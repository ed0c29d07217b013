//! Simple Moving Average.
//!
//! For every index i >= window - 1, the arithmetic mean of the `window`
//! closes ending at i. Output length is `len - window + 1`, or empty when the
//! input is shorter than the window.

use crate::domain::price::PriceSeries;

pub fn simple_moving_average(series: &PriceSeries, window: usize) -> Vec<f64> {
    let closes: Vec<f64> = series.closes().collect();
    sma_values(&closes, window)
}

pub fn sma_values(closes: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    closes
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}
