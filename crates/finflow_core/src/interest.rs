//! Compound interest rate conversions and closed-form checks.
//!
//! Compound interest is trickier than it seems: you cannot divide an annual
//! rate by 12 to get the monthly rate, because interest earned in one month
//! itself earns interest in the next. The effective rate for a shorter
//! period is `(1 + annual)^(1/periods) - 1`.
//!
//! `compound_balance` is the closed-form counterpart of a timeline that
//! accrues interest monthly with no transfers. It is used to cross-check
//! the simulation, not as part of it.

/// Effective monthly rate for an annual rate. NOT `annual / 12`.
#[must_use]
#[inline]
pub fn monthly_rate(annual: f64) -> f64 {
    (1.0 + annual).powf(1.0 / 12.0) - 1.0
}

/// Effective quarterly rate for an annual rate. NOT `annual / 4`.
#[must_use]
#[inline]
pub fn quarterly_rate(annual: f64) -> f64 {
    (1.0 + annual).powf(0.25) - 1.0
}

/// Effective daily rate for an annual rate. NOT `annual / 365.25`.
#[must_use]
#[inline]
pub fn daily_rate(annual: f64) -> f64 {
    (1.0 + annual).powf(1.0 / 365.25) - 1.0
}

/// Effective rate for one of `periods_per_year` equal compounding periods.
#[must_use]
#[inline]
pub fn periodic_rate(annual: f64, periods_per_year: f64) -> f64 {
    (1.0 + annual).powf(1.0 / periods_per_year) - 1.0
}

/// Balance after `months` months of monthly compounding at an effective
/// annual rate, starting from `initial`.
#[must_use]
pub fn compound_balance(initial: f64, annual: f64, months: u32) -> f64 {
    initial * (1.0 + monthly_rate(annual)).powi(months as i32)
}
