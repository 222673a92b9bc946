//! Events, transfers, and recurrence: the effects a schedule can deliver.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::interest::monthly_rate;

/// Unit for a recurrence period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Month,
    Quarter,
    Year,
}

impl PeriodUnit {
    /// Length of one unit in months.
    #[inline]
    pub fn months(self) -> i32 {
        match self {
            PeriodUnit::Month => 1,
            PeriodUnit::Quarter => 3,
            PeriodUnit::Year => 12,
        }
    }
}

/// How often a scheduled item recurs, with an optional end date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recurrence {
    pub every: i32,
    pub unit: PeriodUnit,
    /// Last month boundary (inclusive) on which the item may fire.
    #[serde(default)]
    pub until: Option<Date>,
}

impl Recurrence {
    pub fn every(every: i32, unit: PeriodUnit) -> Self {
        Self {
            every,
            unit,
            until: None,
        }
    }

    pub fn monthly() -> Self {
        Self::every(1, PeriodUnit::Month)
    }

    pub fn quarterly() -> Self {
        Self::every(1, PeriodUnit::Quarter)
    }

    pub fn yearly() -> Self {
        Self::every(1, PeriodUnit::Year)
    }

    #[must_use]
    pub fn until(mut self, date: Date) -> Self {
        self.until = Some(date);
        self
    }

    /// The whole period expressed in months.
    #[inline]
    pub fn months(&self) -> i32 {
        self.every * self.unit.months()
    }
}

/// A unilateral effect on one account: a pure function of the month-start
/// balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Compound interest accrual at an effective annual rate.
    Interest { annual_rate: f64 },
}

impl EventKind {
    /// The new balance produced by this event for the month.
    #[must_use]
    pub fn apply(&self, balance: f64) -> f64 {
        match self {
            EventKind::Interest { annual_rate } => balance * (1.0 + monthly_rate(*annual_rate)),
        }
    }
}

/// One side of a transfer. External endpoints are not tracked: money
/// entering from or leaving to the outside world touches only the
/// internal side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    External,
    Internal(String),
}

impl Endpoint {
    pub fn internal(name: impl Into<String>) -> Self {
        Endpoint::Internal(name.into())
    }

    /// The tracked account name, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Endpoint::External => None,
            Endpoint::Internal(name) => Some(name),
        }
    }
}

/// Optional limits on a transfer, evaluated against month-start balances.
///
/// The defaults are unbounded, reproducing a plain unconditional transfer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransferGuards {
    /// Suppress the transfer entirely when the source balance is below
    /// this floor.
    pub source_floor: f64,
    /// Clip the transferred amount so the destination does not exceed
    /// this ceiling.
    pub dest_ceiling: f64,
}

impl Default for TransferGuards {
    fn default() -> Self {
        Self {
            source_floor: f64::NEG_INFINITY,
            dest_ceiling: f64::INFINITY,
        }
    }
}

impl TransferGuards {
    /// The amount actually moved, given the endpoints' month-start
    /// balances (`None` for external endpoints, which are never limited).
    #[must_use]
    pub fn limit(&self, amount: f64, source: Option<f64>, dest: Option<f64>) -> f64 {
        if let Some(balance) = source
            && balance < self.source_floor
        {
            return 0.0;
        }
        if let Some(balance) = dest
            && balance + amount > self.dest_ceiling
        {
            return (self.dest_ceiling - balance).max(0.0);
        }
        amount
    }
}

/// What a scheduled item does when it fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// Apply an event to one account.
    Event { account: String, event: EventKind },
    /// Move a fixed amount between two endpoints. No balance-sufficiency
    /// check is made unless guards are set; balances may cross zero
    /// freely.
    Transfer {
        source: Endpoint,
        dest: Endpoint,
        amount: f64,
        #[serde(default)]
        guards: TransferGuards,
    },
}

impl ItemEffect {
    pub fn interest(account: impl Into<String>, annual_rate: f64) -> Self {
        ItemEffect::Event {
            account: account.into(),
            event: EventKind::Interest { annual_rate },
        }
    }

    pub fn transfer(source: Endpoint, dest: Endpoint, amount: f64) -> Self {
        ItemEffect::Transfer {
            source,
            dest,
            amount,
            guards: TransferGuards::default(),
        }
    }

    /// The handler name used for log filtering.
    pub fn handler(&self) -> &'static str {
        match self {
            ItemEffect::Event {
                event: EventKind::Interest { .. },
                ..
            } => "interest",
            ItemEffect::Transfer { .. } => "transfer",
        }
    }

    /// The tracked account names this effect touches.
    pub fn accounts(&self) -> impl Iterator<Item = &str> {
        let (a, b) = match self {
            ItemEffect::Event { account, .. } => (Some(account.as_str()), None),
            ItemEffect::Transfer { source, dest, .. } => (source.name(), dest.name()),
        };
        a.into_iter().chain(b)
    }
}
