//! Timeline builder.
//!
//! A fluent API for assembling a timeline programmatically, with
//! name-based references resolved at build time:
//!
//! ```
//! use finflow_core::config::TimelineBuilder;
//! use finflow_core::model::Recurrence;
//!
//! let timeline = TimelineBuilder::new()
//!     .start(2025, 1)
//!     .asset("Checking", 5_000.0)
//!     .asset("Savings", 20_000.0)
//!     .interest("Savings", 0.045)
//!     .transfer("Checking", "Savings", 500.0, Recurrence::monthly())
//!     .build()
//!     .unwrap();
//! ```

use jiff::civil::Date;

use crate::error::ConfigError;
use crate::model::{Account, AccountKind, Endpoint, ItemEffect, Recurrence};
use crate::schedule::ScheduledItem;
use crate::timeline::Timeline;

/// Builder for a [`Timeline`] with its accounts and scheduled items.
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    start: Option<Date>,
    accounts: Vec<Account>,
    items: Vec<ScheduledItem>,
}

impl TimelineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the starting month.
    #[must_use]
    pub fn start(mut self, year: i16, month: i8) -> Self {
        self.start = Some(jiff::civil::date(year, month, 1));
        self
    }

    /// Set the starting month from a date (normalised to its month).
    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.start = Some(crate::date_math::month_start(date));
        self
    }

    #[must_use]
    pub fn account(mut self, name: impl Into<String>, balance: f64, kind: AccountKind) -> Self {
        self.accounts.push(Account::new(name, balance, kind));
        self
    }

    #[must_use]
    pub fn asset(self, name: impl Into<String>, balance: f64) -> Self {
        self.account(name, balance, AccountKind::Asset)
    }

    #[must_use]
    pub fn liability(self, name: impl Into<String>, balance: f64) -> Self {
        self.account(name, balance, AccountKind::Liability)
    }

    /// Monthly interest accrual on `account` at an effective annual rate,
    /// starting at the timeline start.
    #[must_use]
    pub fn interest(self, account: impl Into<String>, annual_rate: f64) -> Self {
        self.item(ScheduledItem {
            due: None,
            recurrence: Some(Recurrence::monthly()),
            effect: ItemEffect::interest(account, annual_rate),
        })
    }

    /// Recurring transfer between two tracked accounts, starting at the
    /// timeline start.
    #[must_use]
    pub fn transfer(
        self,
        source: impl Into<String>,
        dest: impl Into<String>,
        amount: f64,
        recurrence: Recurrence,
    ) -> Self {
        self.item(ScheduledItem {
            due: None,
            recurrence: Some(recurrence),
            effect: ItemEffect::transfer(
                Endpoint::internal(source),
                Endpoint::internal(dest),
                amount,
            ),
        })
    }

    /// Recurring deposit from the outside world into `dest`.
    #[must_use]
    pub fn income(self, dest: impl Into<String>, amount: f64, recurrence: Recurrence) -> Self {
        self.item(ScheduledItem {
            due: None,
            recurrence: Some(recurrence),
            effect: ItemEffect::transfer(Endpoint::External, Endpoint::internal(dest), amount),
        })
    }

    /// Recurring payment from `source` to the outside world.
    #[must_use]
    pub fn expense(self, source: impl Into<String>, amount: f64, recurrence: Recurrence) -> Self {
        self.item(ScheduledItem {
            due: None,
            recurrence: Some(recurrence),
            effect: ItemEffect::transfer(Endpoint::internal(source), Endpoint::External, amount),
        })
    }

    /// Add any scheduled item. Items without a due date fire first at the
    /// timeline start.
    #[must_use]
    pub fn item(mut self, item: ScheduledItem) -> Self {
        self.items.push(item);
        self
    }

    /// Resolve references and build the timeline.
    pub fn build(self) -> Result<Timeline, ConfigError> {
        let start = self.start.ok_or(ConfigError::MissingStart)?;

        let mut names = std::collections::HashSet::new();
        for account in &self.accounts {
            if !names.insert(account.name.clone()) {
                return Err(ConfigError::DuplicateAccount(account.name.clone()));
            }
        }

        let mut timeline = Timeline::new(start, self.accounts);
        for mut item in self.items {
            for account in item.effect.accounts() {
                if !names.contains(account) {
                    return Err(ConfigError::UnknownAccount(account.to_string()));
                }
            }
            item.due.get_or_insert(start);
            timeline.add_item(item)?;
        }
        Ok(timeline)
    }
}
