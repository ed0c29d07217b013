//! Price source port traits.

use crate::domain::error::PapertraderError;
use crate::domain::price::PriceObservation;

/// Produces the next close from the current one.
pub trait PriceSource {
    fn next_price(&mut self, current: f64) -> f64;
}

/// Supplies the initial ordered history that seeds the price window.
pub trait SeedSource {
    fn load_observations(&self) -> Result<Vec<PriceObservation>, PapertraderError>;
}
