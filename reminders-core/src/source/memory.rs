use crate::error::ExportResult;
use crate::reminder::Reminder;

use super::ReminderSource;

/// A fixed, already materialized batch.
#[derive(Debug, Clone)]
pub struct MemorySource {
    reminders: Vec<Reminder>,
    granted: bool,
}

impl MemorySource {
    pub fn new(reminders: Vec<Reminder>) -> Self {
        MemorySource {
            reminders,
            granted: true,
        }
    }

    pub fn with_access(mut self, granted: bool) -> Self {
        self.granted = granted;
        self
    }
}

impl ReminderSource for MemorySource {
    async fn request_access(&self) -> ExportResult<bool> {
        Ok(self.granted)
    }

    async fn fetch_reminders(&self) -> ExportResult<Vec<Reminder>> {
        Ok(self.reminders.clone())
    }
}
