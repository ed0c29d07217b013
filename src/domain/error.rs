//! Domain error types.
//!
//! Trade refusals (insufficient funds or shares) are not errors; they are
//! reported as [`TradeOutcome`](crate::domain::account::TradeOutcome) values.

/// Top-level error type for papertrader.
#[derive(Debug, thiserror::Error)]
pub enum PapertraderError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("insufficient data for {indicator}: have {have} observations, need {need}")]
    InsufficientData {
        indicator: String,
        have: usize,
        need: usize,
    },

    #[error("price series is empty")]
    EmptySeries,

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("seed data error in {file}: {reason}")]
    SeedData { file: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PapertraderError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        PapertraderError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Whether the error only affects the current tick.
    ///
    /// The simulation skips the failing step and retries on the next tick.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PapertraderError::InsufficientData { .. })
    }
}

impl From<&PapertraderError> for std::process::ExitCode {
    fn from(err: &PapertraderError) -> Self {
        let code: u8 = match err {
            PapertraderError::Io(_) => 1,
            PapertraderError::ConfigParse { .. }
            | PapertraderError::ConfigMissing { .. }
            | PapertraderError::ConfigInvalid { .. } => 2,
            PapertraderError::SeedData { .. } => 3,
            PapertraderError::InvalidInput { .. } => 4,
            PapertraderError::InsufficientData { .. } | PapertraderError::EmptySeries => 5,
        };
        std::process::ExitCode::from(code)
    }
}
