//! CLI integration tests for config loading and run orchestration.
//!
//! Tests cover:
//! - Config parsing (build_trading_parameters, build_simulation_config)
//! - Validation of real INI files on disk
//! - Seed history loading from CSV
//! - Full seeded runs through execute_run

mod common;

use papertrader::adapters::file_config_adapter::FileConfigAdapter;
use papertrader::cli::{self, RunOptions};
use papertrader::domain::config_validation::validate_config;
use papertrader::domain::error::PapertraderError;
use papertrader::domain::params::TradingParameters;
use papertrader::domain::simulation::SimulationConfig;
use std::io::Write;
use std::path::PathBuf;

fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[account]
initial_balance = 25000.0

[strategy]
short_window = 4
long_window = 12
rsi_period = 10
rsi_buy_threshold = 25
rsi_sell_threshold = 75

[simulation]
tick_interval = 2
volatility = 0.02
seed = 1234
window_capacity = 30
min_quantity = 2
max_quantity = 4
max_ticks = 50
show_status = false
"#;

mod config_loading {
    use super::*;

    #[test]
    fn build_trading_parameters_from_ini() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let params = cli::build_trading_parameters(&adapter);
        assert_eq!(
            params,
            TradingParameters {
                short_window: 4,
                long_window: 12,
                rsi_period: 10,
                rsi_buy_threshold: 25.0,
                rsi_sell_threshold: 75.0,
                tick_interval: 2,
            }
        );
    }

    #[test]
    fn build_trading_parameters_uses_defaults() {
        let adapter = FileConfigAdapter::from_string("").unwrap();
        assert_eq!(
            cli::build_trading_parameters(&adapter),
            TradingParameters::default()
        );
    }

    #[test]
    fn build_simulation_config_from_ini() {
        let adapter = FileConfigAdapter::from_string(VALID_INI).unwrap();
        let config = cli::build_simulation_config(&adapter).unwrap();
        assert!((config.initial_balance - 25_000.0).abs() < f64::EPSILON);
        assert!((config.volatility - 0.02).abs() < f64::EPSILON);
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.window_capacity, Some(30));
        assert_eq!(config.seed_file, None);
        assert_eq!(config.min_quantity, 2);
        assert_eq!(config.max_quantity, 4);
        assert_eq!(config.max_ticks, Some(50));
    }

    #[test]
    fn build_simulation_config_uses_defaults() {
        let adapter = FileConfigAdapter::from_string("[account]\n").unwrap();
        let config = cli::build_simulation_config(&adapter).unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn build_simulation_config_rejects_bad_seed() {
        let adapter = FileConfigAdapter::from_string("[simulation]\nseed = lucky\n").unwrap();
        let err = cli::build_simulation_config(&adapter).unwrap_err();
        assert!(matches!(err, PapertraderError::ConfigInvalid { key, .. } if key == "seed"));
    }

    #[test]
    fn zero_max_ticks_runs_forever() {
        let adapter = FileConfigAdapter::from_string("[simulation]\nmax_ticks = 0\n").unwrap();
        let config = cli::build_simulation_config(&adapter).unwrap();
        assert_eq!(config.max_ticks, None);
    }

    #[test]
    fn load_config_from_disk() {
        let file = write_temp_file(VALID_INI);
        let adapter = cli::load_config(file.path()).unwrap();
        assert!(validate_config(&adapter).is_ok());
    }

    #[test]
    fn load_config_missing_file() {
        let err = cli::load_config(&PathBuf::from("/nonexistent/papertrader.ini")).unwrap_err();
        assert!(matches!(err, PapertraderError::ConfigParse { .. }));
    }

    #[test]
    fn out_of_range_values_fail_validation() {
        let cases = [
            ("[account]\ninitial_balance = 500\n", "initial_balance"),
            ("[strategy]\nshort_window = 11\n", "short_window"),
            ("[strategy]\nshort_window = 8\nlong_window = 8\n", "long_window"),
            ("[strategy]\nrsi_period = 31\n", "rsi_period"),
            ("[strategy]\nrsi_buy_threshold = 45\n", "rsi_buy_threshold"),
            ("[strategy]\nrsi_sell_threshold = 55\n", "rsi_sell_threshold"),
            ("[simulation]\ntick_interval = 0\n", "tick_interval"),
            ("[account]\ninitial_balance = 5k\n", "initial_balance"),
            ("[strategy]\nshort_window = five\n", "short_window"),
            ("[strategy]\nlong_window = 12.5\n", "long_window"),
            ("[simulation]\ntick_interval = fast\n", "tick_interval"),
            ("[strategy]\nlong_window = 15\n[simulation]\nwindow_capacity = 12\n", "window_capacity"),
        ];
        for (ini, expected) in cases {
            let adapter = FileConfigAdapter::from_string(ini).unwrap();
            let err = validate_config(&adapter).unwrap_err();
            assert!(
                matches!(&err, PapertraderError::ConfigInvalid { key, .. } if key == expected),
                "{ini}: {err:?}"
            );
        }
    }
}

mod seed_history {
    use super::*;

    #[test]
    fn defaults_to_sample_history() {
        let history = cli::load_seed_history(&SimulationConfig::default()).unwrap();
        assert_eq!(history.len(), 12);
        assert_eq!(history.last().unwrap().close, 145.0);
    }

    #[test]
    fn loads_csv_seed_file() {
        let csv = write_temp_file("timestamp,close\n1,20.0\n2,21.0\n3,19.5\n");
        let config = SimulationConfig {
            seed_file: Some(csv.path().to_path_buf()),
            ..SimulationConfig::default()
        };
        let history = cli::load_seed_history(&config).unwrap();
        let closes: Vec<f64> = history.iter().map(|o| o.close).collect();
        assert_eq!(closes, vec![20.0, 21.0, 19.5]);
    }

    #[test]
    fn empty_seed_file_is_rejected() {
        let csv = write_temp_file("timestamp,close\n");
        let config = SimulationConfig {
            seed_file: Some(csv.path().to_path_buf()),
            ..SimulationConfig::default()
        };
        let err = cli::build_simulation(TradingParameters::default(), &config)
            .err()
            .unwrap();
        assert!(matches!(err, PapertraderError::SeedData { .. }));
    }

    #[test]
    fn window_capacity_defaults_to_history_length() {
        let history: Vec<String> = (1..=20).map(|t| format!("{t},{}", 100 + t)).collect();
        let csv = write_temp_file(&format!("timestamp,close\n{}\n", history.join("\n")));
        let sim = cli::build_simulation(
            TradingParameters::default(),
            &SimulationConfig {
                seed: Some(3),
                seed_file: Some(csv.path().to_path_buf()),
                ..SimulationConfig::default()
            },
        )
        .unwrap();
        assert_eq!(sim.series().capacity(), 20);
        assert_eq!(sim.series().len(), 20);
    }

    #[test]
    fn short_history_window_grows_to_fit_indicators() {
        // 12 sample points, but RSI(14) needs 15 closes
        let sim = cli::build_simulation(
            TradingParameters::default(),
            &SimulationConfig {
                seed: Some(3),
                ..SimulationConfig::default()
            },
        )
        .unwrap();
        assert_eq!(sim.series().capacity(), 15);
        assert_eq!(sim.series().len(), 12);
    }

    #[test]
    fn explicit_window_below_long_window_is_rejected() {
        let params = TradingParameters {
            long_window: 15,
            ..TradingParameters::default()
        };
        let err = cli::build_simulation(
            params,
            &SimulationConfig {
                seed: Some(3),
                window_capacity: Some(12),
                ..SimulationConfig::default()
            },
        )
        .err()
        .unwrap();
        assert!(matches!(err, PapertraderError::ConfigInvalid { key, .. } if key == "window_capacity"));
    }
}

mod run {
    use super::*;

    fn options(ticks: u64, seed: u64) -> RunOptions {
        RunOptions {
            ticks: Some(ticks),
            seed: Some(seed),
            no_wait: true,
            quiet: true,
        }
    }

    #[test]
    fn seeded_run_with_defaults() {
        let summary = cli::execute_run(None, &options(10, 7)).unwrap();
        assert_eq!(summary.ticks, 10);
        assert!(summary.final_account.cash_balance >= 0.0);
        assert_eq!(summary.final_account.trade_count, summary.trades_executed);
    }

    #[test]
    fn seeded_runs_match() {
        let first = cli::execute_run(None, &options(20, 99)).unwrap();
        let second = cli::execute_run(None, &options(20, 99)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn run_from_config_file() {
        let file = write_temp_file(VALID_INI);
        let summary = cli::execute_run(Some(file.path()), &options(5, 1)).unwrap();
        assert_eq!(summary.ticks, 5);
        assert!((summary.final_account.initial_balance - 25_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn long_window_beyond_sample_fills_after_a_few_ticks() {
        let file = write_temp_file("[strategy]\nlong_window = 15\n");
        let summary = cli::execute_run(Some(file.path()), &options(10, 1)).unwrap();
        assert_eq!(summary.ticks, 10);
        // 12 sample closes reach 15 on the third tick
        assert_eq!(summary.degraded_ticks, 2);
    }

    #[test]
    fn invalid_config_stops_before_running() {
        let file = write_temp_file("[strategy]\nrsi_period = 1\n");
        let err = cli::execute_run(Some(file.path()), &options(5, 1)).unwrap_err();
        assert!(matches!(err, PapertraderError::ConfigInvalid { .. }));
    }
}
