use std::path::PathBuf;

use tokio::io::AsyncReadExt;

use crate::error::{ExportError, ExportResult};
use crate::reminder::Reminder;

use super::ReminderSource;

/// A JSON snapshot of reminders (an array), read from a file or from stdin
/// when the path is `-`.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }

    async fn read(&self) -> ExportResult<String> {
        if self.is_stdin() {
            let mut contents = String::new();
            tokio::io::stdin().read_to_string(&mut contents).await?;
            return Ok(contents);
        }

        tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ExportError::SourceUnavailable(format!("Could not read {}: {e}", self.path.display()))
        })
    }
}

impl ReminderSource for FileSource {
    async fn request_access(&self) -> ExportResult<bool> {
        Ok(true)
    }

    async fn fetch_reminders(&self) -> ExportResult<Vec<Reminder>> {
        let contents = self.read().await?;

        if contents.trim().is_empty() {
            return Err(ExportError::SourceUnavailable(format!(
                "{} contained no reminder data",
                if self.is_stdin() {
                    "stdin".to_string()
                } else {
                    self.path.display().to_string()
                }
            )));
        }

        serde_json::from_str(&contents).map_err(|e| {
            ExportError::Serialization(format!(
                "Failed to parse reminders from {}: {e}",
                self.path.display()
            ))
        })
    }
}
