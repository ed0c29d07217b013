//! Gaussian random-walk price source.
//!
//! next = current * (1 + e), e ~ N(0, volatility). No floor is applied, so a
//! long run of negative draws can take the price to zero or below.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::domain::error::PapertraderError;
use crate::ports::price_port::PriceSource;

#[derive(Debug, Clone)]
pub struct RandomWalk {
    rng: StdRng,
    distribution: Normal<f64>,
}

impl RandomWalk {
    pub fn new(rng: StdRng, volatility: f64) -> Result<Self, PapertraderError> {
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(PapertraderError::invalid_input(format!(
                "volatility must be non-negative, got {volatility}"
            )));
        }
        let distribution = Normal::new(0.0, volatility).map_err(|e| {
            PapertraderError::invalid_input(format!("volatility {volatility}: {e}"))
        })?;
        Ok(RandomWalk { rng, distribution })
    }

    pub fn seeded(seed: u64, volatility: f64) -> Result<Self, PapertraderError> {
        Self::new(StdRng::seed_from_u64(seed), volatility)
    }

    pub fn from_entropy(volatility: f64) -> Result<Self, PapertraderError> {
        Self::new(StdRng::from_entropy(), volatility)
    }
}

impl PriceSource for RandomWalk {
    fn next_price(&mut self, current: f64) -> f64 {
        let change = self.distribution.sample(&mut self.rng);
        current * (1.0 + change)
    }
}
