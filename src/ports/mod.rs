//! Port traits (hexagonal architecture boundaries).

pub mod clock_port;
pub mod config_port;
pub mod price_port;
pub mod status_port;
