//! Scenario configuration.
//!
//! A scenario document describes the initial accounts and the scheduled
//! items that drive them. The document is plain data (serde-derived, so
//! any self-describing format works at the boundary); validating it with
//! [`ScenarioConfig::build`] produces a runnable [`Timeline`]. All
//! reference and shape errors are caught here, before the first month
//! advances.
//!
//! For programmatic setup (tests, embedding) use the fluent
//! [`TimelineBuilder`] instead.

use serde::{Deserialize, Serialize};

use crate::date_math::parse_month;
use crate::error::ConfigError;
use crate::model::{
    Account, AccountKind, Endpoint, ItemEffect, PeriodUnit, Recurrence, TransferGuards,
};
use crate::schedule::ScheduledItem;
use crate::timeline::Timeline;

mod builder;

pub use builder::TimelineBuilder;

/// A whole scenario document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Month the timeline starts at (`yy/mm` or `yyyy-mm`). When absent
    /// the caller must supply a default — typically the month after
    /// "now", resolved at call time.
    #[serde(default)]
    pub start: Option<String>,
    pub accounts: Vec<AccountConfig>,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

/// An initial account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub name: String,
    pub balance: f64,
    #[serde(default)]
    pub kind: AccountKind,
}

/// A recurrence period descriptor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PeriodConfig {
    #[serde(default = "default_every")]
    pub every: i32,
    pub unit: PeriodUnit,
}

fn default_every() -> i32 {
    1
}

/// A scheduled-item descriptor.
///
/// `period` absent means the item fires once; `start` absent means the
/// timeline start. A transfer endpoint that is absent is external
/// (untracked income or expense).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemConfig {
    Interest {
        account: String,
        /// Effective annual rate as a fraction (0.05 = 5% APR).
        rate: f64,
        #[serde(default)]
        period: Option<PeriodConfig>,
        #[serde(default)]
        start: Option<String>,
        #[serde(default)]
        until: Option<String>,
    },
    Transfer {
        #[serde(default)]
        source: Option<String>,
        #[serde(default)]
        dest: Option<String>,
        amount: f64,
        #[serde(default)]
        period: Option<PeriodConfig>,
        #[serde(default)]
        start: Option<String>,
        #[serde(default)]
        until: Option<String>,
        #[serde(default)]
        source_floor: Option<f64>,
        #[serde(default)]
        dest_ceiling: Option<f64>,
    },
}

impl ScenarioConfig {
    /// Validate the document and build a timeline.
    ///
    /// `default_start` is used when the document carries no start month;
    /// it must be resolved by the caller at call time, never baked into a
    /// stored default.
    pub fn build(&self, default_start: Option<jiff::civil::Date>) -> Result<Timeline, ConfigError> {
        let start = match &self.start {
            Some(s) => parse_date(s)?,
            None => default_start.ok_or(ConfigError::MissingStart)?,
        };

        let mut accounts = Vec::with_capacity(self.accounts.len());
        let mut names = std::collections::HashSet::new();
        for account in &self.accounts {
            if !names.insert(account.name.as_str()) {
                return Err(ConfigError::DuplicateAccount(account.name.clone()));
            }
            if !account.balance.is_finite() {
                return Err(ConfigError::NonFiniteNumber {
                    field: "balance",
                    value: account.balance,
                });
            }
            accounts.push(Account::new(&account.name, account.balance, account.kind));
        }

        let mut timeline = Timeline::new(start, accounts);
        for item in &self.items {
            let item = resolve_item(item, start, &names)?;
            timeline.add_item(item)?;
        }
        Ok(timeline)
    }
}

fn parse_date(s: &str) -> Result<jiff::civil::Date, ConfigError> {
    parse_month(s).ok_or_else(|| ConfigError::InvalidDate(s.to_string()))
}

fn resolve_start(
    start: &Option<String>,
    default: jiff::civil::Date,
) -> Result<jiff::civil::Date, ConfigError> {
    match start {
        Some(s) => parse_date(s),
        None => Ok(default),
    }
}

fn resolve_recurrence(
    period: &Option<PeriodConfig>,
    until: &Option<String>,
) -> Result<Option<Recurrence>, ConfigError> {
    let Some(period) = period else {
        return Ok(None);
    };
    let mut recurrence = Recurrence::every(period.every, period.unit);
    if let Some(until) = until {
        recurrence = recurrence.until(parse_date(until)?);
    }
    Ok(Some(recurrence))
}

fn check_known(
    name: &str,
    names: &std::collections::HashSet<&str>,
) -> Result<(), ConfigError> {
    if names.contains(name) {
        Ok(())
    } else {
        Err(ConfigError::UnknownAccount(name.to_string()))
    }
}

fn endpoint(
    name: &Option<String>,
    names: &std::collections::HashSet<&str>,
) -> Result<Endpoint, ConfigError> {
    match name {
        None => Ok(Endpoint::External),
        Some(name) => {
            check_known(name, names)?;
            Ok(Endpoint::internal(name))
        }
    }
}

fn resolve_item(
    item: &ItemConfig,
    timeline_start: jiff::civil::Date,
    names: &std::collections::HashSet<&str>,
) -> Result<ScheduledItem, ConfigError> {
    match item {
        ItemConfig::Interest {
            account,
            rate,
            period,
            start,
            until,
        } => {
            check_known(account, names)?;
            if !rate.is_finite() {
                return Err(ConfigError::NonFiniteNumber {
                    field: "rate",
                    value: *rate,
                });
            }
            Ok(ScheduledItem {
                due: Some(resolve_start(start, timeline_start)?),
                recurrence: resolve_recurrence(period, until)?,
                effect: ItemEffect::interest(account, *rate),
            })
        }
        ItemConfig::Transfer {
            source,
            dest,
            amount,
            period,
            start,
            until,
            source_floor,
            dest_ceiling,
        } => {
            if !amount.is_finite() {
                return Err(ConfigError::NonFiniteNumber {
                    field: "amount",
                    value: *amount,
                });
            }
            let guards = TransferGuards {
                source_floor: source_floor.unwrap_or(f64::NEG_INFINITY),
                dest_ceiling: dest_ceiling.unwrap_or(f64::INFINITY),
            };
            Ok(ScheduledItem {
                due: Some(resolve_start(start, timeline_start)?),
                recurrence: resolve_recurrence(period, until)?,
                effect: ItemEffect::Transfer {
                    source: endpoint(source, names)?,
                    dest: endpoint(dest, names)?,
                    amount: *amount,
                    guards,
                },
            })
        }
    }
}
