//! Paper-trading account: cash, shares and an append-only trade log.
//!
//! [`Account::execute`] is the only mutator. A trade either updates cash,
//! shares and the log together or leaves the account untouched, so cash and
//! shares never go negative.

use crate::domain::error::PapertraderError;
use crate::domain::signal::Signal;
use crate::domain::sizing::QuantitySizer;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeRecord {
    /// Always `Buy` or `Sell`.
    pub action: Signal,
    pub price: f64,
    pub quantity: u32,
}

impl TradeRecord {
    pub fn value(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// Result of applying a signal to the account.
#[derive(Debug, Clone, PartialEq)]
pub enum TradeOutcome {
    Executed(TradeRecord),
    Held,
    InsufficientFunds { required: f64, available: f64 },
    InsufficientShares { requested: u32, held: u64 },
    /// Price not finite or not positive, or zero quantity.
    Rejected { price: f64, quantity: u32 },
}

impl TradeOutcome {
    pub fn is_executed(&self) -> bool {
        matches!(self, TradeOutcome::Executed(_))
    }

    /// Trade was attempted but refused; the account is unchanged.
    pub fn is_refused(&self) -> bool {
        matches!(
            self,
            TradeOutcome::InsufficientFunds { .. }
                | TradeOutcome::InsufficientShares { .. }
                | TradeOutcome::Rejected { .. }
        )
    }
}

/// Read-only view of the account valued at a given price.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountSnapshot {
    pub cash_balance: f64,
    pub initial_balance: f64,
    pub shares_held: u64,
    pub share_value: f64,
    pub total_value: f64,
    pub profit_loss: f64,
    pub profit_loss_pct: f64,
    pub trade_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    cash_balance: f64,
    initial_balance: f64,
    shares_held: u64,
    trade_history: Vec<TradeRecord>,
}

impl Account {
    pub fn new(initial_balance: f64) -> Result<Self, PapertraderError> {
        if !initial_balance.is_finite() || initial_balance <= 0.0 {
            return Err(PapertraderError::invalid_input(format!(
                "initial balance must be positive, got {initial_balance}"
            )));
        }
        Ok(Account {
            cash_balance: initial_balance,
            initial_balance,
            shares_held: 0,
            trade_history: Vec::new(),
        })
    }

    pub fn cash_balance(&self) -> f64 {
        self.cash_balance
    }

    pub fn initial_balance(&self) -> f64 {
        self.initial_balance
    }

    pub fn shares_held(&self) -> u64 {
        self.shares_held
    }

    pub fn trade_history(&self) -> &[TradeRecord] {
        &self.trade_history
    }

    /// Apply `signal` at `price`, asking `sizer` for the quantity of a buy or sell.
    pub fn execute(
        &mut self,
        signal: Signal,
        price: f64,
        sizer: &mut dyn QuantitySizer,
    ) -> TradeOutcome {
        if !signal.is_trade() {
            return TradeOutcome::Held;
        }
        let quantity = sizer.next_quantity();
        self.execute_quantity(signal, price, quantity)
    }

    pub fn execute_quantity(&mut self, signal: Signal, price: f64, quantity: u32) -> TradeOutcome {
        if !signal.is_trade() {
            return TradeOutcome::Held;
        }
        if !price.is_finite() || price <= 0.0 || quantity == 0 {
            return TradeOutcome::Rejected { price, quantity };
        }

        let total = quantity as f64 * price;
        if signal == Signal::Buy {
            if self.cash_balance < total {
                return TradeOutcome::InsufficientFunds {
                    required: total,
                    available: self.cash_balance,
                };
            }
            self.cash_balance -= total;
            self.shares_held += u64::from(quantity);
        } else {
            if self.shares_held < u64::from(quantity) {
                return TradeOutcome::InsufficientShares {
                    requested: quantity,
                    held: self.shares_held,
                };
            }
            self.cash_balance += total;
            self.shares_held -= u64::from(quantity);
        }

        let record = TradeRecord {
            action: signal,
            price,
            quantity,
        };
        self.trade_history.push(record);
        TradeOutcome::Executed(record)
    }

    pub fn share_value(&self, current_price: f64) -> f64 {
        self.shares_held as f64 * current_price
    }

    pub fn total_value(&self, current_price: f64) -> f64 {
        self.cash_balance + self.share_value(current_price)
    }

    /// cash - initial + shares * price
    pub fn profit_loss(&self, current_price: f64) -> f64 {
        self.cash_balance - self.initial_balance + self.share_value(current_price)
    }

    pub fn profit_loss_percentage(&self, current_price: f64) -> f64 {
        self.profit_loss(current_price) / self.initial_balance * 100.0
    }

    pub fn snapshot(&self, current_price: f64) -> AccountSnapshot {
        AccountSnapshot {
            cash_balance: self.cash_balance,
            initial_balance: self.initial_balance,
            shares_held: self.shares_held,
            share_value: self.share_value(current_price),
            total_value: self.total_value(current_price),
            profit_loss: self.profit_loss(current_price),
            profit_loss_pct: self.profit_loss_percentage(current_price),
            trade_count: self.trade_history.len(),
        }
    }
}
