//! Core domain types and logic.

pub mod price;
pub mod indicator;
pub mod signal;
pub mod params;
pub mod strategy;
pub mod sizing;
pub mod account;
pub mod simulation;
pub mod config_validation;
pub mod error;
