//! The two signal strategies: moving-average crossover and RSI threshold.
//!
//! Both are pure and stateless. They are evaluated independently, never
//! combined, in the order given by [`StrategyKind::ALL`].

use std::fmt;

use crate::domain::error::PapertraderError;
use crate::domain::indicator::{rsi, simple_moving_average, IndicatorType};
use crate::domain::params::TradingParameters;
use crate::domain::price::PriceSeries;
use crate::domain::signal::Signal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    MovingAverageCrossover,
    RsiThreshold,
}

impl StrategyKind {
    /// Per-tick evaluation order.
    pub const ALL: [StrategyKind; 2] = [
        StrategyKind::MovingAverageCrossover,
        StrategyKind::RsiThreshold,
    ];

    pub fn evaluate(
        &self,
        series: &PriceSeries,
        params: &TradingParameters,
    ) -> Result<Signal, PapertraderError> {
        match self {
            StrategyKind::MovingAverageCrossover => moving_average_crossover(series, params),
            StrategyKind::RsiThreshold => Ok(rsi_threshold(series, params)),
        }
    }

    /// Observations needed before the strategy produces a meaningful signal.
    pub fn required_history(&self, params: &TradingParameters) -> usize {
        match self {
            StrategyKind::MovingAverageCrossover => IndicatorType::Sma(params.short_window)
                .required_history()
                .max(IndicatorType::Sma(params.long_window).required_history()),
            StrategyKind::RsiThreshold => IndicatorType::Rsi(params.rsi_period).required_history(),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::MovingAverageCrossover => write!(f, "Moving Average"),
            StrategyKind::RsiThreshold => write!(f, "RSI"),
        }
    }
}

/// Smallest window in which every strategy eventually gets a full signal.
pub fn required_capacity(params: &TradingParameters) -> usize {
    StrategyKind::ALL
        .iter()
        .map(|strategy| strategy.required_history(params))
        .max()
        .unwrap_or(1)
}

/// Buy when the latest short SMA is above the latest long SMA, sell when below.
pub fn moving_average_crossover(
    series: &PriceSeries,
    params: &TradingParameters,
) -> Result<Signal, PapertraderError> {
    let short_ma = simple_moving_average(series, params.short_window);
    let long_ma = simple_moving_average(series, params.long_window);

    let (short_last, long_last) = match (short_ma.last(), long_ma.last()) {
        (Some(s), Some(l)) => (*s, *l),
        (None, _) => return Err(insufficient(series, IndicatorType::Sma(params.short_window))),
        (_, None) => return Err(insufficient(series, IndicatorType::Sma(params.long_window))),
    };

    Ok(if short_last > long_last {
        Signal::Buy
    } else if short_last < long_last {
        Signal::Sell
    } else {
        Signal::Hold
    })
}

/// Buy below the buy threshold, sell above the sell threshold, otherwise hold.
pub fn rsi_threshold(series: &PriceSeries, params: &TradingParameters) -> Signal {
    let value = rsi(series, params.rsi_period);
    if value < params.rsi_buy_threshold {
        Signal::Buy
    } else if value > params.rsi_sell_threshold {
        Signal::Sell
    } else {
        Signal::Hold
    }
}

fn insufficient(series: &PriceSeries, indicator: IndicatorType) -> PapertraderError {
    PapertraderError::InsufficientData {
        indicator: indicator.to_string(),
        have: series.len(),
        need: indicator.required_history(),
    }
}
