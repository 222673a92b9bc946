mod account;
mod items;
mod snapshot;

pub use account::{Account, AccountKind};
pub use items::{Endpoint, EventKind, ItemEffect, PeriodUnit, Recurrence, TransferGuards};
pub use snapshot::{AccountBalance, LogEffect, LogRecord, Snapshot};
