//! CSV seed history adapter.
//!
//! Expects a header row followed by `timestamp,close` records.

use crate::domain::error::PapertraderError;
use crate::domain::price::PriceObservation;
use crate::ports::price_port::SeedSource;
use std::fs;
use std::path::PathBuf;

pub struct CsvSeedAdapter {
    path: PathBuf,
}

impl CsvSeedAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn parse(content: &str, file: &str) -> Result<Vec<PriceObservation>, PapertraderError> {
        let seed_error = |reason: String| PapertraderError::SeedData {
            file: file.to_string(),
            reason,
        };

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut observations = Vec::new();

        for (line, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| seed_error(format!("CSV parse error: {}", e)))?;
            let row = line + 2;

            let timestamp: i64 = record
                .get(0)
                .ok_or_else(|| seed_error(format!("row {}: missing timestamp column", row)))?
                .trim()
                .parse()
                .map_err(|e| seed_error(format!("row {}: invalid timestamp: {}", row, e)))?;

            let close: f64 = record
                .get(1)
                .ok_or_else(|| seed_error(format!("row {}: missing close column", row)))?
                .trim()
                .parse()
                .map_err(|e| seed_error(format!("row {}: invalid close: {}", row, e)))?;

            if !close.is_finite() || close <= 0.0 {
                return Err(seed_error(format!(
                    "row {}: close must be positive, got {}",
                    row, close
                )));
            }

            observations.push(PriceObservation::new(timestamp, close));
        }

        observations.sort_by_key(|o| o.timestamp);
        Ok(observations)
    }
}

impl SeedSource for CsvSeedAdapter {
    fn load_observations(&self) -> Result<Vec<PriceObservation>, PapertraderError> {
        let file = self.path.display().to_string();
        let content = fs::read_to_string(&self.path).map_err(|e| PapertraderError::SeedData {
            file: file.clone(),
            reason: format!("failed to read: {}", e),
        })?;
        Self::parse(&content, &file)
    }
}
