//! Technical indicators computed over a [`PriceSeries`](crate::domain::price::PriceSeries).
//!
//! - `sma`: Simple Moving Average series
//! - `rsi`: single-value Relative Strength Index
//! - `IndicatorType`: indicator identity + parameters, used for labelling

pub mod rsi;
pub mod sma;

use std::fmt;

pub use rsi::{rsi, rsi_values, NEUTRAL_RSI};
pub use sma::{simple_moving_average, sma_values};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Rsi(usize),
}

impl IndicatorType {
    /// Observations needed before the indicator yields a real value.
    pub fn required_history(&self) -> usize {
        match self {
            IndicatorType::Sma(window) => *window,
            IndicatorType::Rsi(period) => period + 1,
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
        }
    }
}
