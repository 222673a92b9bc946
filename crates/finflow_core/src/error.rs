use std::fmt;

/// Errors raised when adding an item to the schedule.
///
/// These are validation failures: a malformed item is rejected before it
/// can reach a future month.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// A recurring item's period resolves to zero or negative months.
    NonPositivePeriod { every: i32 },
    /// The item has no due date and none can be inferred.
    MissingDueDate,
    /// The item's due date is at or before a date the schedule has already
    /// delivered, so it could never fire.
    PastDue {
        due: jiff::civil::Date,
        last_popped: jiff::civil::Date,
    },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::NonPositivePeriod { every } => {
                write!(f, "recurring item period must be positive, got {every}")
            }
            ScheduleError::MissingDueDate => write!(f, "scheduled item has no due date"),
            ScheduleError::PastDue { due, last_popped } => {
                write!(
                    f,
                    "can only add future dates: due={due}, last popped={last_popped}"
                )
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Errors raised while applying a single scheduled item during a month step.
///
/// Scoped to the item: the timeline reports the error and continues with
/// the remaining items due that month.
#[derive(Debug, Clone, PartialEq)]
pub enum StepError {
    /// The item references an account name the timeline does not track.
    UnknownAccount(String),
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::UnknownAccount(name) => write!(f, "unknown account {name:?}"),
        }
    }
}

impl std::error::Error for StepError {}

/// Errors raised while validating a scenario document or builder input
/// into a runnable timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// No start date was given and the caller supplied no default.
    MissingStart,
    /// A date string did not parse as a month.
    InvalidDate(String),
    /// Two accounts share a name.
    DuplicateAccount(String),
    /// A scheduled item references an account the scenario does not define.
    UnknownAccount(String),
    /// A rate or amount is NaN or infinite.
    NonFiniteNumber { field: &'static str, value: f64 },
    /// The item failed schedule validation.
    Schedule(ScheduleError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingStart => write!(f, "no start month given"),
            ConfigError::InvalidDate(s) => write!(f, "invalid month {s:?} (expected yy/mm)"),
            ConfigError::DuplicateAccount(name) => {
                write!(f, "duplicate account name {name:?}")
            }
            ConfigError::UnknownAccount(name) => {
                write!(f, "scheduled item references unknown account {name:?}")
            }
            ConfigError::NonFiniteNumber { field, value } => {
                write!(f, "{field} must be finite, got {value}")
            }
            ConfigError::Schedule(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Schedule(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ScheduleError> for ConfigError {
    fn from(e: ScheduleError) -> Self {
        ConfigError::Schedule(e)
    }
}
