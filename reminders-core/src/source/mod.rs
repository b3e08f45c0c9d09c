//! Where reminders come from.
//!
//! A source bundles the host's permission gate with the fetch of the full
//! reminder batch. The pipeline only depends on this trait.

mod file;
mod memory;
mod provider;

pub use file::FileSource;
pub use memory::MemorySource;
pub use provider::ProviderSource;

use crate::error::ExportResult;
use crate::reminder::Reminder;

pub trait ReminderSource {
    /// Ask for read access. `false` means the host refused.
    fn request_access(&self) -> impl Future<Output = ExportResult<bool>> + Send;

    /// Fetch every reminder in every list.
    fn fetch_reminders(&self) -> impl Future<Output = ExportResult<Vec<Reminder>>> + Send;
}
