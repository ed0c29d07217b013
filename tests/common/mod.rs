#![allow(dead_code)]

use papertrader::domain::error::PapertraderError;
pub use papertrader::domain::price::{PriceObservation, PriceSeries};
use papertrader::domain::simulation::TickReport;
use papertrader::ports::clock_port::Clock;
use papertrader::ports::price_port::PriceSource;
use papertrader::ports::status_port::StatusPort;
use std::collections::VecDeque;

/// Observations at timestamps 1..=n with the given closes.
pub fn observations(closes: &[f64]) -> Vec<PriceObservation> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &c)| PriceObservation::new(i as i64 + 1, c))
        .collect()
}

/// Series sized exactly to `closes`.
pub fn series_of(closes: &[f64]) -> PriceSeries {
    PriceSeries::seed(closes.len().max(1), observations(closes)).unwrap()
}

/// Returns scripted prices, then repeats the last one.
pub struct ScriptedPrices {
    prices: VecDeque<f64>,
    last: Option<f64>,
}

impl ScriptedPrices {
    pub fn new(prices: &[f64]) -> Self {
        Self {
            prices: prices.iter().copied().collect(),
            last: None,
        }
    }
}

impl PriceSource for ScriptedPrices {
    fn next_price(&mut self, current: f64) -> f64 {
        let price = self.prices.pop_front().or(self.last).unwrap_or(current);
        self.last = Some(price);
        price
    }
}

pub struct CountingClock(pub i64);

impl Clock for CountingClock {
    fn now(&mut self) -> i64 {
        self.0 += 1;
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PublishedTick {
    pub tick: u64,
    pub close: f64,
    pub cash_balance: f64,
    pub shares_held: u64,
}

#[derive(Default)]
pub struct RecordingStatus {
    pub published: Vec<PublishedTick>,
    pub fail: bool,
}

impl StatusPort for RecordingStatus {
    fn publish(&mut self, report: &TickReport) -> Result<(), PapertraderError> {
        self.published.push(PublishedTick {
            tick: report.tick,
            close: report.latest.close,
            cash_balance: report.account.cash_balance,
            shares_held: report.account.shares_held,
        });
        if self.fail {
            return Err(PapertraderError::Io(std::io::Error::other("display closed")));
        }
        Ok(())
    }
}
