//! Monthly account timeline simulation engine.
//!
//! This crate models the month-by-month evolution of a set of financial
//! accounts driven by scheduled recurring and one-time operations:
//! - Accounts are lazily-advancing sequences of monthly balances
//! - A schedule delivers due items (interest events, transfers) in
//!   deterministic (due date, insertion order) order
//! - A timeline combines both into a replayable series of snapshots
//!
//! Nothing advances unless a caller pulls the next month; the series is
//! infinite and single-threaded.
//!
//! ```
//! use finflow_core::config::TimelineBuilder;
//!
//! let mut timeline = TimelineBuilder::new()
//!     .start(2025, 1)
//!     .asset("Fidelity", 100_000.0)
//!     .liability("Mortgage", -100_000.0)
//!     .interest("Fidelity", 0.10)
//!     .interest("Mortgage", 0.0385)
//!     .build()
//!     .unwrap();
//!
//! for snapshot in timeline.advance_months(12) {
//!     println!("{}: {:.2}", snapshot.date, snapshot.net_total());
//! }
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod date_math;
pub mod error;
pub mod interest;
pub mod schedule;
pub mod timeline;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{ScenarioConfig, TimelineBuilder};
pub use error::{ConfigError, ScheduleError, StepError};
pub use model::{Account, AccountKind, Endpoint, EventKind, ItemEffect, Recurrence, Snapshot};
pub use schedule::{Schedule, ScheduledItem};
pub use timeline::Timeline;
