//! Snapshots and the applied-item log.
//!
//! A `Snapshot` freezes every account balance at one month boundary; the
//! timeline appends one per advance and never mutates them afterwards.
//! `LogRecord`s form the audit trail of what fired and what it did,
//! including items that were skipped because they referenced an unknown
//! account.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// One account's balance within a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub name: String,
    pub balance: f64,
}

/// All account balances at one month boundary, in the timeline's account
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: Date,
    /// Months since the timeline start (0 = initial state).
    pub month: usize,
    pub balances: Vec<AccountBalance>,
}

impl Snapshot {
    /// The balance for a named account, if tracked.
    pub fn balance(&self, name: &str) -> Option<f64> {
        self.balances
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.balance)
    }

    /// Sum of all tracked balances (liabilities are negative).
    pub fn net_total(&self) -> f64 {
        self.balances.iter().map(|b| b.balance).sum()
    }
}

/// The concrete effect a fired (or skipped) item had.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogEffect {
    /// Interest accrued on one account.
    Interest {
        account: String,
        annual_rate: f64,
        amount: f64,
        /// Month-start balance plus everything staged so far this month.
        balance_after: f64,
    },
    /// An amount moved between endpoints. External sides are `None`.
    Transfer {
        source: Option<String>,
        dest: Option<String>,
        amount: f64,
    },
    /// The item referenced an unknown account and was skipped; the rest
    /// of the month proceeded normally.
    Skipped { account: String, handler: String },
}

/// One entry in the applied-item log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// The occurrence's due date.
    pub date: Date,
    /// The month (as a history index) whose advance delivered the item.
    pub month: usize,
    /// The firing item's stable insertion sequence number.
    pub seq: u64,
    pub effect: LogEffect,
}

impl LogRecord {
    /// The handler name, for kind-based filtering.
    pub fn handler(&self) -> &str {
        match &self.effect {
            LogEffect::Interest { .. } => "interest",
            LogEffect::Transfer { .. } => "transfer",
            LogEffect::Skipped { handler, .. } => handler,
        }
    }

    /// The tracked account names this record touches.
    pub fn accounts(&self) -> impl Iterator<Item = &str> {
        let (a, b) = match &self.effect {
            LogEffect::Interest { account, .. } => (Some(account.as_str()), None),
            LogEffect::Transfer { source, dest, .. } => (source.as_deref(), dest.as_deref()),
            LogEffect::Skipped { account, .. } => (Some(account.as_str()), None),
        };
        a.into_iter().chain(b)
    }

    /// Whether this record marks a skipped item rather than an applied one.
    pub fn is_skipped(&self) -> bool {
        matches!(self.effect, LogEffect::Skipped { .. })
    }
}
