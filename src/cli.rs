//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, Level};

use crate::adapters::clock::{SystemClock, TickCounter};
use crate::adapters::console_status_adapter::ConsoleStatusAdapter;
use crate::adapters::csv_adapter::CsvSeedAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::random_walk::RandomWalk;
use crate::domain::account::Account;
use crate::domain::config_validation::{read_optional, validate_config};
use crate::domain::error::PapertraderError;
use crate::domain::params::TradingParameters;
use crate::domain::price::{sample_observations, PriceObservation, PriceSeries};
use crate::domain::simulation::{RunSummary, Simulation, SimulationConfig, DEFAULT_VOLATILITY};
use crate::domain::sizing::{UniformQuantity, DEFAULT_MAX_QUANTITY, DEFAULT_MIN_QUANTITY};
use crate::domain::strategy::required_capacity;
use crate::ports::clock_port::Clock;
use crate::ports::config_port::ConfigPort;
use crate::ports::price_port::SeedSource;
use crate::ports::status_port::StatusPort;

#[derive(Parser, Debug)]
#[command(name = "papertrader", about = "Paper-trading simulation loop")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the simulation until interrupted or the tick limit is reached
    Run {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Stop after this many ticks (0 runs forever)
        #[arg(long)]
        ticks: Option<u64>,
        /// RNG seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
        /// Do not sleep between ticks
        #[arg(long)]
        no_wait: bool,
        /// Do not render the status block
        #[arg(short, long)]
        quiet: bool,
    },
    /// Validate a configuration file and print the resolved parameters
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Overrides applied on top of the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    pub ticks: Option<u64>,
    pub seed: Option<u64>,
    pub no_wait: bool,
    pub quiet: bool,
}

pub fn run(cli: Cli) -> ExitCode {
    init_logging(cli.verbose);
    match cli.command {
        Command::Run {
            config,
            ticks,
            seed,
            no_wait,
            quiet,
        } => run_simulation(
            config.as_deref(),
            &RunOptions {
                ticks,
                seed,
                no_wait,
                quiet,
            },
        ),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, PapertraderError> {
    FileConfigAdapter::from_file(path).map_err(|e| PapertraderError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn load_or_default(path: Option<&Path>) -> Result<FileConfigAdapter, PapertraderError> {
    match path {
        Some(p) => {
            info!("Loading config from {}", p.display());
            load_config(p)
        }
        None => FileConfigAdapter::from_string("").map_err(|reason| {
            PapertraderError::ConfigParse {
                file: "<defaults>".into(),
                reason,
            }
        }),
    }
}

pub fn build_trading_parameters(adapter: &dyn ConfigPort) -> TradingParameters {
    let defaults = TradingParameters::default();
    TradingParameters {
        short_window: adapter.get_int("strategy", "short_window", defaults.short_window as i64)
            as usize,
        long_window: adapter.get_int("strategy", "long_window", defaults.long_window as i64)
            as usize,
        rsi_period: adapter.get_int("strategy", "rsi_period", defaults.rsi_period as i64) as usize,
        rsi_buy_threshold: adapter.get_double(
            "strategy",
            "rsi_buy_threshold",
            defaults.rsi_buy_threshold,
        ),
        rsi_sell_threshold: adapter.get_double(
            "strategy",
            "rsi_sell_threshold",
            defaults.rsi_sell_threshold,
        ),
        tick_interval: adapter.get_int("simulation", "tick_interval", defaults.tick_interval as i64)
            as u64,
    }
}

pub fn build_simulation_config(
    adapter: &dyn ConfigPort,
) -> Result<SimulationConfig, PapertraderError> {
    let seed = read_optional::<u64>(adapter, "simulation", "seed")?;
    let window_capacity = read_optional::<usize>(adapter, "simulation", "window_capacity")?;
    let seed_file = adapter
        .get_string("simulation", "seed_file")
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);
    let max_ticks = match adapter.get_int("simulation", "max_ticks", 0) {
        n if n > 0 => Some(n as u64),
        _ => None,
    };

    Ok(SimulationConfig {
        initial_balance: adapter.get_double("account", "initial_balance", 10_000.0),
        volatility: adapter.get_double("simulation", "volatility", DEFAULT_VOLATILITY),
        seed,
        window_capacity,
        seed_file,
        min_quantity: adapter.get_int("simulation", "min_quantity", DEFAULT_MIN_QUANTITY.into())
            as u32,
        max_quantity: adapter.get_int("simulation", "max_quantity", DEFAULT_MAX_QUANTITY.into())
            as u32,
        max_ticks,
    })
}

pub fn load_seed_history(
    config: &SimulationConfig,
) -> Result<Vec<PriceObservation>, PapertraderError> {
    match &config.seed_file {
        Some(path) => {
            info!("Loading seed history from {}", path.display());
            CsvSeedAdapter::new(path.clone()).load_observations()
        }
        None => Ok(sample_observations()),
    }
}

/// Wire the domain objects for one run.
///
/// The window defaults to the seed length, grown to [`required_capacity`] so
/// the slowest indicator can fill. With a fixed seed the price walk, trade
/// sizes and timestamps are all reproducible.
pub fn build_simulation(
    params: TradingParameters,
    config: &SimulationConfig,
) -> Result<Simulation, PapertraderError> {
    let history = load_seed_history(config)?;
    if history.is_empty() {
        return Err(PapertraderError::SeedData {
            file: config
                .seed_file
                .as_ref()
                .map_or_else(|| "<sample>".to_string(), |p| p.display().to_string()),
            reason: "no observations".into(),
        });
    }
    let required = required_capacity(&params);
    let capacity = match config.window_capacity {
        Some(capacity) if capacity < required => {
            return Err(PapertraderError::ConfigInvalid {
                section: "simulation".into(),
                key: "window_capacity".into(),
                reason: format!("window_capacity {capacity} is below the {required} observations the strategies need"),
            });
        }
        Some(capacity) => capacity,
        None => history.len().max(required),
    };
    let next_timestamp = history.last().map_or(1, |o| o.timestamp + 1);

    let series = PriceSeries::seed(capacity, history)?;
    let account = Account::new(config.initial_balance)?;

    let (walk, sizer) = match config.seed {
        Some(seed) => (
            RandomWalk::seeded(seed, config.volatility)?,
            UniformQuantity::seeded(seed.wrapping_add(1), config.min_quantity, config.max_quantity)?,
        ),
        None => (
            RandomWalk::from_entropy(config.volatility)?,
            UniformQuantity::from_entropy(config.min_quantity, config.max_quantity)?,
        ),
    };
    let clock: Box<dyn Clock> = match config.seed {
        Some(_) => Box::new(TickCounter::starting_at(next_timestamp)),
        None => Box::new(SystemClock),
    };

    Ok(Simulation::new(
        series,
        account,
        params,
        Box::new(walk),
        Box::new(sizer),
        clock,
    ))
}

/// Load, validate and run; the status block goes to stdout unless quiet.
pub fn execute_run(
    config_path: Option<&Path>,
    options: &RunOptions,
) -> Result<RunSummary, PapertraderError> {
    let adapter = load_or_default(config_path)?;
    validate_config(&adapter)?;

    let params = build_trading_parameters(&adapter);
    let mut sim_config = build_simulation_config(&adapter)?;
    if let Some(ticks) = options.ticks {
        sim_config.max_ticks = (ticks > 0).then_some(ticks);
    }
    if options.seed.is_some() {
        sim_config.seed = options.seed;
    }

    let show_status = !options.quiet && adapter.get_bool("simulation", "show_status", true);
    let mut status: Box<dyn StatusPort> = if show_status {
        Box::new(ConsoleStatusAdapter::stdout())
    } else {
        Box::new(ConsoleStatusAdapter::new(std::io::sink()))
    };

    info!(
        balance = sim_config.initial_balance,
        short_window = params.short_window,
        long_window = params.long_window,
        rsi_period = params.rsi_period,
        "Starting trading simulation"
    );

    let mut simulation = build_simulation(params, &sim_config)?;
    let no_wait = options.no_wait;
    simulation.run(sim_config.max_ticks, status.as_mut(), |interval| {
        if !no_wait {
            std::thread::sleep(interval);
        }
    })
}

pub fn run_simulation(config_path: Option<&Path>, options: &RunOptions) -> ExitCode {
    match execute_run(config_path, options) {
        Ok(summary) => {
            let account = &summary.final_account;
            info!(
                "Finished after {} ticks: {} trades executed, {} refused",
                summary.ticks, summary.trades_executed, summary.trades_refused
            );
            info!(
                "Final value ${:.2}, P/L ${:.2} ({:.2}%)",
                account.total_value, account.profit_loss, account.profit_loss_pct
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    info!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    if let Err(e) = validate_config(&adapter) {
        error!("{e}");
        return (&e).into();
    }

    let params = build_trading_parameters(&adapter);
    let sim_config = match build_simulation_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    println!("Account:");
    println!("  initial_balance:    {:.2}", sim_config.initial_balance);
    println!("Strategy:");
    println!("  short_window:       {}", params.short_window);
    println!("  long_window:        {}", params.long_window);
    println!("  rsi_period:         {}", params.rsi_period);
    println!("  rsi_buy_threshold:  {}", params.rsi_buy_threshold);
    println!("  rsi_sell_threshold: {}", params.rsi_sell_threshold);
    println!("Simulation:");
    println!("  tick_interval:      {}s", params.tick_interval);
    println!("  volatility:         {}", sim_config.volatility);
    println!(
        "  quantity:           {}..={}",
        sim_config.min_quantity, sim_config.max_quantity
    );
    match &sim_config.seed_file {
        Some(path) => println!("  seed_file:          {}", path.display()),
        None => println!("  seed_file:          (built-in sample)"),
    }
    match sim_config.seed {
        Some(seed) => println!("  seed:               {}", seed),
        None => println!("  seed:               (entropy)"),
    }
    match sim_config.max_ticks {
        Some(n) => println!("  max_ticks:          {}", n),
        None => println!("  max_ticks:          unlimited"),
    }

    info!("Configuration is valid");
    ExitCode::SUCCESS
}
