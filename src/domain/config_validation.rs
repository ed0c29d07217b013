//! Configuration validation.
//!
//! Enforces the accepted input ranges before a run starts. Numeric keys are
//! parsed strictly, so a present but malformed value is rejected rather than
//! replaced by its default. The simulation itself trusts whatever parameters
//! it is given.

use std::str::FromStr;

use crate::domain::error::PapertraderError;
use crate::domain::params::TradingParameters;
use crate::domain::strategy::required_capacity;
use crate::ports::config_port::ConfigPort;

pub const MIN_INITIAL_BALANCE: f64 = 1_000.0;
pub const MAX_INITIAL_BALANCE: f64 = 1_000_000.0;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), PapertraderError> {
    validate_account_config(config)?;
    validate_strategy_config(config)?;
    validate_simulation_config(config)?;
    Ok(())
}

pub fn validate_account_config(config: &dyn ConfigPort) -> Result<(), PapertraderError> {
    let balance: f64 = read_value(config, "account", "initial_balance", 10_000.0)?;
    if !(MIN_INITIAL_BALANCE..=MAX_INITIAL_BALANCE).contains(&balance) {
        return Err(invalid(
            "account",
            "initial_balance",
            format!("initial_balance must be between {MIN_INITIAL_BALANCE} and {MAX_INITIAL_BALANCE}"),
        ));
    }
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), PapertraderError> {
    let short = read_value(config, "strategy", "short_window", 5)?;
    check_int_range("strategy", "short_window", short, 2, 10)?;

    let long = read_value(config, "strategy", "long_window", 10)?;
    check_int_range("strategy", "long_window", long, short + 1, 20)?;

    let period = read_value(config, "strategy", "rsi_period", 14)?;
    check_int_range("strategy", "rsi_period", period, 2, 30)?;

    let buy = read_value(config, "strategy", "rsi_buy_threshold", 30.0)?;
    check_float_range("strategy", "rsi_buy_threshold", buy, 0.0, 40.0)?;

    let sell = read_value(config, "strategy", "rsi_sell_threshold", 70.0)?;
    check_float_range("strategy", "rsi_sell_threshold", sell, 60.0, 100.0)?;

    Ok(())
}

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), PapertraderError> {
    let interval = read_value(config, "simulation", "tick_interval", 3)?;
    check_int_range("simulation", "tick_interval", interval, 1, 60)?;

    let volatility: f64 = read_value(config, "simulation", "volatility", 0.05)?;
    if !volatility.is_finite() || volatility < 0.0 {
        return Err(invalid(
            "simulation",
            "volatility",
            "volatility must be non-negative".to_string(),
        ));
    }

    let min_qty: i64 = read_value(config, "simulation", "min_quantity", 1)?;
    let max_qty: i64 = read_value(config, "simulation", "max_quantity", 5)?;
    if min_qty < 1 || min_qty > max_qty || max_qty > i64::from(u32::MAX) {
        return Err(invalid(
            "simulation",
            "min_quantity",
            "quantities must satisfy 1 <= min_quantity <= max_quantity".to_string(),
        ));
    }

    if let Some(capacity) = read_optional::<usize>(config, "simulation", "window_capacity")? {
        let defaults = TradingParameters::default();
        let long = read_value(config, "strategy", "long_window", defaults.long_window)?;
        let period = read_value(config, "strategy", "rsi_period", defaults.rsi_period)?;
        let required = required_capacity(&TradingParameters {
            long_window: long,
            rsi_period: period,
            ..defaults
        });
        if capacity < required {
            return Err(invalid(
                "simulation",
                "window_capacity",
                format!(
                    "window_capacity must hold at least {required} observations \
                     (long_window {long}, rsi_period {period}), got {capacity}"
                ),
            ));
        }
    }

    read_optional::<u64>(config, "simulation", "seed")?;

    let max_ticks: i64 = read_value(config, "simulation", "max_ticks", 0)?;
    if max_ticks < 0 {
        return Err(invalid(
            "simulation",
            "max_ticks",
            "max_ticks must be non-negative".to_string(),
        ));
    }

    Ok(())
}

/// Parse `[section] key` strictly. Absent or blank keys are `None`.
pub fn read_optional<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<T>, PapertraderError> {
    match config
        .get_string(section, key)
        .filter(|s| !s.trim().is_empty())
    {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("cannot parse {raw:?}"))),
        None => Ok(None),
    }
}

fn read_value<T: FromStr>(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: T,
) -> Result<T, PapertraderError> {
    Ok(read_optional(config, section, key)?.unwrap_or(default))
}

fn check_int_range(
    section: &str,
    key: &str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), PapertraderError> {
    if value < min || value > max {
        return Err(invalid(
            section,
            key,
            format!("{key} must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(())
}

fn check_float_range(
    section: &str,
    key: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), PapertraderError> {
    if !(min..=max).contains(&value) {
        return Err(invalid(
            section,
            key,
            format!("{key} must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(())
}

fn invalid(section: &str, key: &str, reason: String) -> PapertraderError {
    PapertraderError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    }
}
