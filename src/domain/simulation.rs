//! Tick-driven simulation loop.
//!
//! Each tick: advance the price window with the price source, recompute the
//! RSI, evaluate every strategy in [`StrategyKind::ALL`] order and apply its
//! signal to the account at the latest close. The outcome of a tick is a
//! [`TickResult`]; the caller decides whether to continue.
//!
//! A `Simulation` owns its series and account. Parallel runs need separate
//! instances.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::account::{Account, AccountSnapshot, TradeOutcome};
use crate::domain::error::PapertraderError;
use crate::domain::indicator::rsi;
use crate::domain::params::TradingParameters;
use crate::domain::price::{PriceObservation, PriceSeries};
use crate::domain::signal::Signal;
use crate::domain::sizing::{QuantitySizer, DEFAULT_MAX_QUANTITY, DEFAULT_MIN_QUANTITY};
use crate::domain::strategy::StrategyKind;
use crate::ports::clock_port::Clock;
use crate::ports::price_port::PriceSource;
use crate::ports::status_port::StatusPort;

/// Number of recent closes carried in each report.
pub const RECENT_CLOSES: usize = 5;

/// Standard deviation of the per-tick percentage change.
pub const DEFAULT_VOLATILITY: f64 = 0.05;

/// Run settings outside [`TradingParameters`], resolved from config and CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub initial_balance: f64,
    pub volatility: f64,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Defaults to the seed history length.
    pub window_capacity: Option<usize>,
    pub seed_file: Option<PathBuf>,
    pub min_quantity: u32,
    pub max_quantity: u32,
    /// `None` runs until interrupted.
    pub max_ticks: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            initial_balance: 10_000.0,
            volatility: DEFAULT_VOLATILITY,
            seed: None,
            window_capacity: None,
            seed_file: None,
            min_quantity: DEFAULT_MIN_QUANTITY,
            max_quantity: DEFAULT_MAX_QUANTITY,
            max_ticks: None,
        }
    }
}

#[derive(Debug)]
pub enum StrategyDecision {
    Applied {
        strategy: StrategyKind,
        signal: Signal,
        outcome: TradeOutcome,
    },
    Skipped {
        strategy: StrategyKind,
        reason: PapertraderError,
    },
}

impl StrategyDecision {
    pub fn strategy(&self) -> StrategyKind {
        match self {
            StrategyDecision::Applied { strategy, .. }
            | StrategyDecision::Skipped { strategy, .. } => *strategy,
        }
    }
}

/// Read-only state after a tick, for display.
#[derive(Debug)]
pub struct TickReport {
    pub tick: u64,
    pub latest: PriceObservation,
    pub rsi: f64,
    pub decisions: Vec<StrategyDecision>,
    pub account: AccountSnapshot,
    pub recent_closes: Vec<f64>,
}

#[derive(Debug)]
pub enum TickResult {
    /// Every strategy produced a signal.
    Completed(TickReport),
    /// At least one strategy was skipped with a recoverable error.
    Degraded(TickReport),
    /// Invariant violation; the run must stop.
    Fatal(PapertraderError),
}

impl TickResult {
    pub fn report(&self) -> Option<&TickReport> {
        match self {
            TickResult::Completed(report) | TickResult::Degraded(report) => Some(report),
            TickResult::Fatal(_) => None,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, TickResult::Fatal(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub degraded_ticks: u64,
    pub trades_executed: usize,
    pub trades_refused: usize,
    pub final_account: AccountSnapshot,
}

pub struct Simulation {
    series: PriceSeries,
    account: Account,
    params: TradingParameters,
    price_source: Box<dyn PriceSource>,
    sizer: Box<dyn QuantitySizer>,
    clock: Box<dyn Clock>,
    ticks: u64,
}

impl Simulation {
    pub fn new(
        series: PriceSeries,
        account: Account,
        params: TradingParameters,
        price_source: Box<dyn PriceSource>,
        sizer: Box<dyn QuantitySizer>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Simulation {
            series,
            account,
            params,
            price_source,
            sizer,
            clock,
            ticks: 0,
        }
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.params.tick_interval)
    }

    pub fn tick(&mut self) -> TickResult {
        self.ticks += 1;
        let timestamp = self.clock.now();

        let latest = match self
            .series
            .extend_random_walk(self.price_source.as_mut(), timestamp)
        {
            Ok(obs) => obs,
            Err(e) => {
                error!(tick = self.ticks, "price update failed: {e}");
                return TickResult::Fatal(e);
            }
        };

        let rsi_value = rsi(&self.series, self.params.rsi_period);
        debug!(
            tick = self.ticks,
            price = latest.close,
            rsi = rsi_value,
            "price updated"
        );

        let mut decisions = Vec::with_capacity(StrategyKind::ALL.len());
        for strategy in StrategyKind::ALL {
            match strategy.evaluate(&self.series, &self.params) {
                Ok(signal) => {
                    let outcome = self
                        .account
                        .execute(signal, latest.close, self.sizer.as_mut());
                    log_outcome(strategy, signal, &outcome);
                    decisions.push(StrategyDecision::Applied {
                        strategy,
                        signal,
                        outcome,
                    });
                }
                Err(e) if e.is_recoverable() => {
                    warn!(%strategy, "strategy skipped: {e}");
                    decisions.push(StrategyDecision::Skipped {
                        strategy,
                        reason: e,
                    });
                }
                Err(e) => {
                    error!(%strategy, "strategy failed: {e}");
                    return TickResult::Fatal(e);
                }
            }
        }

        let degraded = decisions
            .iter()
            .any(|d| matches!(d, StrategyDecision::Skipped { .. }));

        let report = TickReport {
            tick: self.ticks,
            latest,
            rsi: rsi_value,
            decisions,
            account: self.account.snapshot(latest.close),
            recent_closes: self
                .series
                .window(RECENT_CLOSES)
                .iter()
                .map(|o| o.close)
                .collect(),
        };

        if degraded {
            TickResult::Degraded(report)
        } else {
            TickResult::Completed(report)
        }
    }

    /// Run ticks until `max_ticks` is reached (forever if `None`) or a tick is fatal.
    ///
    /// `Some(0)` runs no ticks and only summarises the account. `pace` is
    /// called between ticks with the configured interval.
    pub fn run(
        &mut self,
        max_ticks: Option<u64>,
        status: &mut dyn StatusPort,
        mut pace: impl FnMut(Duration),
    ) -> Result<RunSummary, PapertraderError> {
        let mut ran = 0u64;
        let mut degraded_ticks = 0u64;
        let mut trades_executed = 0usize;
        let mut trades_refused = 0usize;

        loop {
            if max_ticks.is_some_and(|max| ran >= max) {
                break;
            }
            if ran > 0 {
                pace(self.tick_interval());
            }

            let report = match self.tick() {
                TickResult::Completed(report) => report,
                TickResult::Degraded(report) => {
                    degraded_ticks += 1;
                    report
                }
                TickResult::Fatal(e) => return Err(e),
            };
            ran += 1;

            for decision in &report.decisions {
                if let StrategyDecision::Applied { outcome, .. } = decision {
                    if outcome.is_executed() {
                        trades_executed += 1;
                    } else if outcome.is_refused() {
                        trades_refused += 1;
                    }
                }
            }

            if let Err(e) = status.publish(&report) {
                warn!(tick = report.tick, "status update failed: {e}");
            }
        }

        let price = self.series.latest()?.close;
        let summary = RunSummary {
            ticks: ran,
            degraded_ticks,
            trades_executed,
            trades_refused,
            final_account: self.account.snapshot(price),
        };
        info!(
            ticks = summary.ticks,
            trades = summary.trades_executed,
            profit_loss = summary.final_account.profit_loss,
            "simulation finished"
        );
        Ok(summary)
    }
}

fn log_outcome(strategy: StrategyKind, signal: Signal, outcome: &TradeOutcome) {
    match outcome {
        TradeOutcome::Executed(record) => info!(
            %strategy,
            %signal,
            quantity = record.quantity,
            price = record.price,
            value = record.value(),
            "trade executed"
        ),
        TradeOutcome::Held => debug!(%strategy, "no action taken (hold)"),
        TradeOutcome::InsufficientFunds {
            required,
            available,
        } => warn!(
            %strategy,
            required, available, "insufficient funds to buy"
        ),
        TradeOutcome::InsufficientShares { requested, held } => {
            warn!(%strategy, requested, held, "insufficient shares to sell")
        }
        TradeOutcome::Rejected { price, quantity } => {
            warn!(%strategy, price, quantity, "trade rejected")
        }
    }
}
