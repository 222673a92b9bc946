//! The schedule: a priority queue of due-dated items.
//!
//! Items are ordered by (due date, insertion sequence). The sequence
//! number is the only tie-break for same-day items — the model has no
//! other signal for relative priority, so insertion order is the
//! deterministic one. Recurring items are reinserted at `due + period`
//! after being popped, keeping their sequence number so ties stay stable
//! across occurrences.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::date_math::add_months;
use crate::error::ScheduleError;
use crate::model::{ItemEffect, Recurrence};

/// A unit of scheduled work, as handed to [`Schedule::add`].
///
/// `due` may be left unset by layers that resolve start dates later (the
/// builder fills it with the timeline start); the schedule itself rejects
/// unset due dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledItem {
    pub due: Option<Date>,
    pub recurrence: Option<Recurrence>,
    pub effect: ItemEffect,
}

impl ScheduledItem {
    /// An item that fires exactly once.
    pub fn once(due: Date, effect: ItemEffect) -> Self {
        Self {
            due: Some(due),
            recurrence: None,
            effect,
        }
    }

    /// An item that first fires at `start` and then recurs.
    pub fn recurring(start: Date, recurrence: Recurrence, effect: ItemEffect) -> Self {
        Self {
            due: Some(start),
            recurrence: Some(recurrence),
            effect,
        }
    }
}

/// One due occurrence of a scheduled item, as delivered by
/// [`Schedule::pop_due`]. Recurring items produce a fresh occurrence per
/// due date; the sequence number is stable across occurrences.
#[derive(Debug, Clone, PartialEq)]
pub struct DueItem {
    pub due: Date,
    pub seq: u64,
    pub effect: ItemEffect,
}

#[derive(Debug, Clone)]
struct Pending {
    due: Date,
    seq: u64,
    recurrence: Option<Recurrence>,
    effect: ItemEffect,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// A time-ordered priority structure over scheduled items.
#[derive(Debug, Default)]
pub struct Schedule {
    queue: BinaryHeap<Reverse<Pending>>,
    next_seq: u64,
    last_popped: Option<Date>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item, assigning it the next insertion sequence number.
    ///
    /// Fails fast on malformed items: a recurring period that is not
    /// strictly positive, a missing due date, or a due date the schedule
    /// has already moved past.
    pub fn add(&mut self, item: ScheduledItem) -> Result<(), ScheduleError> {
        if let Some(recurrence) = &item.recurrence
            && recurrence.months() <= 0
        {
            return Err(ScheduleError::NonPositivePeriod {
                every: recurrence.every,
            });
        }
        let due = item.due.ok_or(ScheduleError::MissingDueDate)?;
        if let Some(last_popped) = self.last_popped
            && due <= last_popped
        {
            return Err(ScheduleError::PastDue { due, last_popped });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Reverse(Pending {
            due,
            seq,
            recurrence: item.recurrence,
            effect: item.effect,
        }));
        Ok(())
    }

    /// Remove and return every occurrence due at or before `date`, in
    /// (due date, insertion sequence) order.
    ///
    /// Recurring items are reinserted at `due + period` immediately after
    /// being returned, so an occurrence whose successor is still within
    /// `date` is delivered again in the same call (catch-up). One-time
    /// items, and recurrences past their `until` date, are discarded.
    pub fn pop_due(&mut self, date: Date) -> Vec<DueItem> {
        self.last_popped = Some(date);
        let mut due = Vec::new();
        while self
            .queue
            .peek()
            .is_some_and(|Reverse(head)| head.due <= date)
        {
            let Some(Reverse(entry)) = self.queue.pop() else {
                break;
            };
            due.push(DueItem {
                due: entry.due,
                seq: entry.seq,
                effect: entry.effect.clone(),
            });
            if let Some(recurrence) = entry.recurrence {
                let next = add_months(entry.due, recurrence.months());
                let expired = recurrence.until.is_some_and(|until| next > until);
                if !expired {
                    self.queue.push(Reverse(Pending { due: next, ..entry }));
                }
            }
        }
        due
    }

    /// The earliest pending due date, for callers that want to skip ahead.
    pub fn peek_next_due(&self) -> Option<Date> {
        self.queue.peek().map(|Reverse(entry)| entry.due)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
