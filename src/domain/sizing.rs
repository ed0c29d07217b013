//! Trade quantity policies.
//!
//! Each buy or sell asks a [`QuantitySizer`] how many units to trade.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::error::PapertraderError;

pub const DEFAULT_MIN_QUANTITY: u32 = 1;
pub const DEFAULT_MAX_QUANTITY: u32 = 5;

pub trait QuantitySizer {
    fn next_quantity(&mut self) -> u32;
}

/// Uniform draw from `min..=max` with an owned generator.
#[derive(Debug, Clone)]
pub struct UniformQuantity {
    rng: StdRng,
    min: u32,
    max: u32,
}

impl UniformQuantity {
    pub fn new(rng: StdRng, min: u32, max: u32) -> Result<Self, PapertraderError> {
        if min == 0 || min > max {
            return Err(PapertraderError::invalid_input(format!(
                "quantity range {min}..={max} must satisfy 1 <= min <= max"
            )));
        }
        Ok(UniformQuantity { rng, min, max })
    }

    pub fn seeded(seed: u64, min: u32, max: u32) -> Result<Self, PapertraderError> {
        Self::new(StdRng::seed_from_u64(seed), min, max)
    }

    pub fn from_entropy(min: u32, max: u32) -> Result<Self, PapertraderError> {
        Self::new(StdRng::from_entropy(), min, max)
    }
}

impl QuantitySizer for UniformQuantity {
    fn next_quantity(&mut self) -> u32 {
        self.rng.gen_range(self.min..=self.max)
    }
}

/// Always trades the same quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedQuantity(pub u32);

impl QuantitySizer for FixedQuantity {
    fn next_quantity(&mut self) -> u32 {
        self.0
    }
}
