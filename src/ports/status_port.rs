//! Status display port trait.

use crate::domain::error::PapertraderError;
use crate::domain::simulation::TickReport;

/// Receives a read-only report after every completed tick.
pub trait StatusPort {
    fn publish(&mut self, report: &TickReport) -> Result<(), PapertraderError>;
}
