//! Error types for the reminders export pipeline.

use thiserror::Error;

/// Errors that can occur while exporting reminders.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid list pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Reminder source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Provider '{0}' not found in PATH. Install it, or export a snapshot with --input <FILE> (--input - for stdin)")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("Reminder '{0}' has no creation date, cannot order the export")]
    MissingCreationDate(String),

    #[error("Unexpected multiple recurrence rules ({count}) on reminder '{identifier}'")]
    MultipleRecurrenceRules { identifier: String, count: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
