//! Price observations and the fixed-capacity sliding window they live in.

use std::collections::VecDeque;

use crate::domain::error::PapertraderError;
use crate::ports::price_port::PriceSource;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceObservation {
    pub timestamp: i64,
    pub close: f64,
}

impl PriceObservation {
    pub fn new(timestamp: i64, close: f64) -> Self {
        PriceObservation { timestamp, close }
    }
}

/// Chronologically ordered window of at most `capacity` observations.
///
/// Appending past capacity evicts the oldest observation.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    capacity: usize,
    observations: VecDeque<PriceObservation>,
}

impl PriceSeries {
    pub fn new(capacity: usize) -> Result<Self, PapertraderError> {
        if capacity == 0 {
            return Err(PapertraderError::invalid_input(
                "price series capacity must be at least 1",
            ));
        }
        Ok(PriceSeries {
            capacity,
            observations: VecDeque::with_capacity(capacity),
        })
    }

    /// Build a window from an ordered seed history.
    ///
    /// If the history is longer than `capacity`, only the newest observations are kept.
    pub fn seed(
        capacity: usize,
        observations: impl IntoIterator<Item = PriceObservation>,
    ) -> Result<Self, PapertraderError> {
        let mut series = PriceSeries::new(capacity)?;
        for obs in observations {
            series.push(obs);
        }
        if series.is_empty() {
            return Err(PapertraderError::invalid_input(
                "seed history must contain at least one observation",
            ));
        }
        Ok(series)
    }

    /// Append an observation, evicting the oldest one when full.
    pub fn advance(&mut self, timestamp: i64, close: f64) {
        self.push(PriceObservation::new(timestamp, close));
    }

    /// Draw the next close from `source` based on the latest close and append it.
    pub fn extend_random_walk(
        &mut self,
        source: &mut dyn PriceSource,
        timestamp: i64,
    ) -> Result<PriceObservation, PapertraderError> {
        let current = self.latest()?.close;
        let next = PriceObservation::new(timestamp, source.next_price(current));
        self.push(next);
        Ok(next)
    }

    pub fn latest(&self) -> Result<&PriceObservation, PapertraderError> {
        self.observations.back().ok_or(PapertraderError::EmptySeries)
    }

    /// The last `k` observations in chronological order, or fewer if the series is shorter.
    pub fn window(&self, k: usize) -> Vec<PriceObservation> {
        let skip = self.observations.len().saturating_sub(k);
        self.observations.iter().skip(skip).copied().collect()
    }

    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|o| o.close)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn push(&mut self, obs: PriceObservation) {
        if self.observations.len() == self.capacity {
            self.observations.pop_front();
        }
        self.observations.push_back(obs);
    }
}

/// Built-in twelve-point history used when no seed file is configured.
pub fn sample_observations() -> Vec<PriceObservation> {
    [
        100.0, 105.0, 110.0, 107.0, 113.0, 120.0, 125.0, 130.0, 128.0, 135.0, 140.0, 145.0,
    ]
    .iter()
    .enumerate()
    .map(|(i, &close)| PriceObservation::new(i as i64 + 1, close))
    .collect()
}
