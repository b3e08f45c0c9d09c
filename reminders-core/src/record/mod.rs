//! Mapping reminders into flat JSON records.
//!
//! Every key is emitted by an explicit presence check, so a record never
//! carries a null value.

mod alarm;
mod recurrence;
mod reminder;

pub use alarm::map_alarm;
pub use recurrence::map_recurrence;
pub use reminder::{map_full, map_simple};

use serde_json::{Map, Value};

use crate::error::ExportResult;
use crate::reminder::Reminder;

/// A mapped reminder, alarm or recurrence rule.
pub type Record = Map<String, Value>;

/// Which key set to export.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Schema {
    /// Nearly every reminder field, with nested alarms and recurrence rules
    #[default]
    Full,
    /// Reduced key set with a single `recurrence` field
    Simple,
}

impl Schema {
    pub fn map(self, reminder: &Reminder) -> ExportResult<Record> {
        match self {
            Schema::Full => Ok(map_full(reminder)),
            Schema::Simple => map_simple(reminder),
        }
    }
}
