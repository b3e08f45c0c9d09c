//! Reminder export pipeline for reminders-json.
//!
//! - `reminder`: read-only reminder snapshot types
//! - `filter`, `record`, `aggregate`, `export`: filter by list, map to
//!   records, group by account and list, serialize as sorted-key JSON
//! - `source` and `protocol`: where reminders come from (provider
//!   binaries, snapshot files, in-memory batches)

pub mod aggregate;
pub mod config;
pub mod date_format;
pub mod error;
pub mod export;
pub mod filter;
pub mod protocol;
pub mod record;
pub mod reminder;
pub mod source;

pub use aggregate::{Grouped, aggregate};
pub use config::{ExportConfig, OutputFormat};
pub use error::{ExportError, ExportResult};
pub use export::{export, run_export};
pub use filter::ListFilter;
pub use record::{Record, Schema};
pub use reminder::{Alarm, DateComponents, Proximity, RecurrenceRule, Reminder, StructuredLocation};
pub use source::{FileSource, MemorySource, ProviderSource, ReminderSource};
