//! Integration tests for the timeline engine
//!
//! Tests are organized by topic:
//! - `basic` - Timeline construction and month stepping
//! - `schedule` - Priority ordering, validation, recurrence
//! - `properties` - Conservation, cross-check, and isolation properties
//! - `scenario` - Scenario config, builder DSL, and the reference table

mod basic;
mod scenario;
