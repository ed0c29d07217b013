//! Plain-text status adapter implementing StatusPort.
//!
//! Renders the market and account block after every tick.

use std::fmt::Write as _;
use std::io::Write;

use crate::domain::account::TradeOutcome;
use crate::domain::error::PapertraderError;
use crate::domain::signal::Signal;
use crate::domain::simulation::{StrategyDecision, TickReport};
use crate::ports::status_port::StatusPort;

pub struct ConsoleStatusAdapter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleStatusAdapter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl ConsoleStatusAdapter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> StatusPort for ConsoleStatusAdapter<W> {
    fn publish(&mut self, report: &TickReport) -> Result<(), PapertraderError> {
        self.out.write_all(render(report).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

pub fn render(report: &TickReport) -> String {
    let account = &report.account;
    let mut s = String::new();

    let _ = writeln!(s, "=== Market Status (tick {}) ===", report.tick);
    let _ = writeln!(s, "Current Price: ${:.2}", report.latest.close);
    let _ = writeln!(s, "RSI: {:.2}", report.rsi);

    let _ = writeln!(s, "\n=== Account Status ===");
    let _ = writeln!(s, "Cash Balance: ${:.2}", account.cash_balance);
    let _ = writeln!(s, "Shares Held: {}", account.shares_held);
    let _ = writeln!(s, "Current Share Value: ${:.2}", account.share_value);
    let _ = writeln!(s, "Total Value: ${:.2}", account.total_value);
    let _ = writeln!(
        s,
        "Profit/Loss: ${:.2} ({:.2}%)",
        account.profit_loss, account.profit_loss_pct
    );

    let recent: Vec<String> = report
        .recent_closes
        .iter()
        .map(|c| format!("${:.2}", c))
        .collect();
    let _ = writeln!(s, "\nRecent Prices: {}\n", recent.join(" "));

    for decision in &report.decisions {
        match decision {
            StrategyDecision::Applied {
                strategy,
                signal,
                outcome,
            } => {
                let _ = writeln!(s, "{} Signal: {}", strategy, signal);
                let _ = writeln!(s, "  {}", describe_outcome(outcome));
            }
            StrategyDecision::Skipped { strategy, reason } => {
                let _ = writeln!(s, "{} Signal: skipped ({})", strategy, reason);
            }
        }
    }
    s.push('\n');
    s
}

fn describe_outcome(outcome: &TradeOutcome) -> String {
    match outcome {
        TradeOutcome::Executed(record) => format!(
            "{} {} units at ${:.2}",
            if record.action == Signal::Buy {
                "Bought"
            } else {
                "Sold"
            },
            record.quantity,
            record.price
        ),
        TradeOutcome::Held => "No action taken (Hold)".to_string(),
        TradeOutcome::InsufficientFunds { required, .. } => {
            format!("Insufficient funds (need ${:.2})", required)
        }
        TradeOutcome::InsufficientShares { requested, held } => {
            format!("Insufficient shares to sell {} units (held {})", requested, held)
        }
        TradeOutcome::Rejected { price, quantity } => {
            format!("Rejected {} units at ${:.2}", quantity, price)
        }
    }
}
