//! Concrete adapter implementations for ports.

pub mod clock;
pub mod console_status_adapter;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod random_walk;
