//! Trading parameters, fixed for the lifetime of a run.

/// Strategy and pacing parameters.
///
/// Expected to satisfy `short_window < long_window` and
/// `rsi_buy_threshold < rsi_sell_threshold`; the engine does not enforce this,
/// see [`config_validation`](crate::domain::config_validation).
#[derive(Debug, Clone, PartialEq)]
pub struct TradingParameters {
    pub short_window: usize,
    pub long_window: usize,
    pub rsi_period: usize,
    pub rsi_buy_threshold: f64,
    pub rsi_sell_threshold: f64,
    /// Seconds between ticks.
    pub tick_interval: u64,
}

impl Default for TradingParameters {
    fn default() -> Self {
        TradingParameters {
            short_window: 5,
            long_window: 10,
            rsi_period: 14,
            rsi_buy_threshold: 30.0,
            rsi_sell_threshold: 70.0,
            tick_interval: 3,
        }
    }
}
