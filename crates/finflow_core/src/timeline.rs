//! The timeline: accounts plus a schedule, advanced one month at a time.
//!
//! Each advance pops the month's due items, applies them, commits every
//! account, and records an immutable snapshot. Nothing advances unless a
//! caller asks: the timeline is pull-based and has no terminal state.
//!
//! Same-date ordering is fixed as: all due events fire first, then all due
//! transfers, each group in (due date, insertion sequence) order, and only
//! then do the accounts advance. Effects are computed against month-start
//! balances and committed atomically by the advance, so handler order
//! within a month cannot change the arithmetic.

use std::collections::HashSet;

use jiff::civil::Date;
use rustc_hash::FxHashMap;

use crate::date_math::next_month;
use crate::error::{ScheduleError, StepError};
use crate::model::{
    Account, AccountBalance, Endpoint, EventKind, ItemEffect, LogEffect, LogRecord, Snapshot,
    TransferGuards,
};
use crate::schedule::{DueItem, Schedule, ScheduledItem};

/// Orchestrates accounts and a schedule into a monthly series of
/// snapshots.
#[derive(Debug)]
pub struct Timeline {
    accounts: Vec<Account>,
    /// Account name -> slot in `accounts`. Slots are insertion-ordered and
    /// that order is observable in every snapshot.
    index: FxHashMap<String, usize>,
    schedule: Schedule,
    start: Date,
    current: Date,
    history: Vec<Snapshot>,
    log: Vec<LogRecord>,
}

impl Timeline {
    /// Create a timeline at `start` (normalised to a month boundary is the
    /// caller's job; scenario and builder layers always hand one over).
    ///
    /// History begins with a snapshot of the initial balances, so after
    /// `n` advances it holds `n + 1` entries.
    pub fn new(start: Date, accounts: Vec<Account>) -> Self {
        let index = accounts
            .iter()
            .enumerate()
            .map(|(slot, account)| (account.name.clone(), slot))
            .collect();
        let mut timeline = Self {
            accounts,
            index,
            schedule: Schedule::new(),
            start,
            current: start,
            history: Vec::new(),
            log: Vec::new(),
        };
        let initial = timeline.take_snapshot(start);
        timeline.history.push(initial);
        timeline
    }

    pub fn start_date(&self) -> Date {
        self.start
    }

    /// The month boundary the next advance will process.
    pub fn current_date(&self) -> Date {
        self.current
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.index.get(name).map(|&slot| &self.accounts[slot])
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Add an item to the schedule. Validation failures are reported
    /// before the item can reach a future month.
    pub fn add_item(&mut self, item: ScheduledItem) -> Result<(), ScheduleError> {
        self.schedule.add(item)
    }

    /// Advance one month and return the resulting snapshot.
    ///
    /// A due item naming an unknown account is reported and skipped; the
    /// remaining items and the rest of the month proceed normally.
    pub fn advance_month(&mut self) -> Snapshot {
        let month = self.history.len();
        let due = self.schedule.pop_due(self.current);

        for item in &due {
            if matches!(item.effect, ItemEffect::Event { .. }) {
                self.apply_item(item, month);
            }
        }
        for item in &due {
            if matches!(item.effect, ItemEffect::Transfer { .. }) {
                self.apply_item(item, month);
            }
        }

        for account in &mut self.accounts {
            account.advance();
        }

        self.current = next_month(self.current);
        let snapshot = self.take_snapshot(self.current);
        self.history.push(snapshot.clone());
        snapshot
    }

    /// Bounded pull of `n` successive months.
    pub fn advance_months(&mut self, n: usize) -> Vec<Snapshot> {
        (0..n).map(|_| self.advance_month()).collect()
    }

    /// Every snapshot recorded so far, oldest first. Index 0 is the
    /// initial state.
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    /// Applied-item records, oldest first, optionally filtered.
    ///
    /// `end` keeps records delivered up to and including that month index;
    /// `accounts` keeps records touching any of the named accounts;
    /// `handlers` keeps records whose handler name is in the set.
    pub fn transaction_log(
        &self,
        end: Option<usize>,
        accounts: Option<&HashSet<String>>,
        handlers: Option<&HashSet<String>>,
    ) -> Vec<&LogRecord> {
        self.log
            .iter()
            .filter(|record| end.is_none_or(|end| record.month <= end))
            .filter(|record| {
                accounts.is_none_or(|set| record.accounts().any(|name| set.contains(name)))
            })
            .filter(|record| handlers.is_none_or(|set| set.contains(record.handler())))
            .collect()
    }

    fn slot(&self, name: &str) -> Result<usize, StepError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| StepError::UnknownAccount(name.to_string()))
    }

    fn apply_item(&mut self, item: &DueItem, month: usize) {
        let result = match &item.effect {
            ItemEffect::Event { account, event } => self.apply_event(item, account, *event, month),
            ItemEffect::Transfer {
                source,
                dest,
                amount,
                guards,
            } => self.apply_transfer(item, source, dest, *amount, guards, month),
        };
        if let Err(StepError::UnknownAccount(name)) = result {
            tracing::warn!(
                account = %name,
                handler = item.effect.handler(),
                due = %item.due,
                "scheduled item references unknown account; skipping"
            );
            self.log.push(LogRecord {
                date: item.due,
                month,
                seq: item.seq,
                effect: LogEffect::Skipped {
                    account: name,
                    handler: item.effect.handler().to_string(),
                },
            });
        }
    }

    fn apply_event(
        &mut self,
        item: &DueItem,
        account: &str,
        event: EventKind,
        month: usize,
    ) -> Result<(), StepError> {
        let slot = self.slot(account)?;
        let target = &mut self.accounts[slot];
        let balance = target.balance();
        let amount = event.apply(balance) - balance;
        target.stage(amount);
        let EventKind::Interest { annual_rate } = event;
        self.log.push(LogRecord {
            date: item.due,
            month,
            seq: item.seq,
            effect: LogEffect::Interest {
                account: account.to_string(),
                annual_rate,
                amount,
                balance_after: self.accounts[slot].projected(),
            },
        });
        Ok(())
    }

    fn apply_transfer(
        &mut self,
        item: &DueItem,
        source: &Endpoint,
        dest: &Endpoint,
        amount: f64,
        guards: &TransferGuards,
        month: usize,
    ) -> Result<(), StepError> {
        // Resolve both endpoints before staging anything, so a bad name
        // cannot leave a half-applied transfer behind.
        let source_slot = source.name().map(|name| self.slot(name)).transpose()?;
        let dest_slot = dest.name().map(|name| self.slot(name)).transpose()?;

        let moved = guards.limit(
            amount,
            source_slot.map(|slot| self.accounts[slot].balance()),
            dest_slot.map(|slot| self.accounts[slot].balance()),
        );
        if let Some(slot) = source_slot {
            self.accounts[slot].stage(-moved);
        }
        if let Some(slot) = dest_slot {
            self.accounts[slot].stage(moved);
        }
        self.log.push(LogRecord {
            date: item.due,
            month,
            seq: item.seq,
            effect: LogEffect::Transfer {
                source: source.name().map(str::to_string),
                dest: dest.name().map(str::to_string),
                amount: moved,
            },
        });
        Ok(())
    }

    fn take_snapshot(&self, date: Date) -> Snapshot {
        Snapshot {
            date,
            month: self.history.len(),
            balances: self
                .accounts
                .iter()
                .map(|account| AccountBalance {
                    name: account.name.clone(),
                    balance: account.balance(),
                })
                .collect(),
        }
    }
}
