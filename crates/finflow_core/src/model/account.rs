//! Accounts: named balance buckets advanced one month at a time.
//!
//! An account is a lazily-advancing sequence of monthly balances. Effects
//! for the month (interest, transfers) are staged as deltas against the
//! month-start balance; `advance` commits them all at once and yields the
//! next month's balance. Staging against the month-start value keeps the
//! arithmetic independent of the order effects were staged in.

use serde::{Deserialize, Serialize};

/// Advisory classification of an account.
///
/// The classification never constrains the balance sign: an asset may go
/// negative and a liability positive without being reclassified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    #[default]
    Asset,
    Liability,
}

/// A named balance with the staged-effect state for the current month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub kind: AccountKind,
    balance: f64,
    /// Net delta staged for the month in progress, not yet committed.
    #[serde(skip)]
    pending: f64,
}

impl Account {
    pub fn new(name: impl Into<String>, balance: f64, kind: AccountKind) -> Self {
        Self {
            name: name.into(),
            kind,
            balance,
            pending: 0.0,
        }
    }

    pub fn asset(name: impl Into<String>, balance: f64) -> Self {
        Self::new(name, balance, AccountKind::Asset)
    }

    pub fn liability(name: impl Into<String>, balance: f64) -> Self {
        Self::new(name, balance, AccountKind::Liability)
    }

    /// The committed month-start balance. Staged deltas are not included.
    #[inline]
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// The committed balance plus everything staged so far this month.
    #[inline]
    pub fn projected(&self) -> f64 {
        self.balance + self.pending
    }

    /// Stage a delta to be committed by the next `advance`.
    pub(crate) fn stage(&mut self, delta: f64) {
        self.pending += delta;
    }

    /// Commit the staged deltas and yield the next month's balance.
    ///
    /// The sequence is infinite and not restartable: once advanced, the
    /// prior balance survives only in the timeline's history.
    pub fn advance(&mut self) -> f64 {
        self.balance += self.pending;
        self.pending = 0.0;
        self.balance
    }
}
