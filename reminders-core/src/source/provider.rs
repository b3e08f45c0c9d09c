//! Provider subprocess source.
//!
//! Reminders are read through an external provider binary (for example
//! `reminders-provider-eventkit`), which owns the host permission prompt
//! and the store query. Communication is one JSON request on stdin and
//! one JSON response on stdout.

use std::path::PathBuf;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

use crate::error::{ExportError, ExportResult};
use crate::protocol::{ListReminders, ProviderCommand, Request, RequestAccess, Response};
use crate::reminder::Reminder;

use super::ReminderSource;

const BINARY_PREFIX: &str = "reminders-provider-";

#[derive(Debug, Clone)]
pub struct ProviderSource {
    name: String,
    binary: Option<PathBuf>,
    timeout: Duration,
}

impl ProviderSource {
    pub fn from_name(name: &str, timeout: Duration) -> Self {
        ProviderSource {
            name: name.to_string(),
            binary: None,
            timeout,
        }
    }

    /// Use this executable instead of looking the provider up on PATH.
    pub fn with_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.binary = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn binary_path(&self) -> ExportResult<PathBuf> {
        if let Some(path) = &self.binary {
            return Ok(path.clone());
        }

        let binary_name = format!("{BINARY_PREFIX}{}", self.name);
        which::which(&binary_name).map_err(|_| ExportError::ProviderNotInstalled(binary_name))
    }

    /// Call a provider command, giving up after the configured timeout.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> ExportResult<C::Response> {
        timeout(self.timeout, self.call_inner(cmd))
            .await
            .map_err(|_| ExportError::ProviderTimeout(self.timeout.as_secs()))?
    }

    async fn call_inner<C: ProviderCommand>(&self, cmd: C) -> ExportResult<C::Response> {
        let params =
            serde_json::to_value(&cmd).map_err(|e| ExportError::Serialization(e.to_string()))?;
        let request = Request {
            command: C::command(),
            params,
        };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| ExportError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;
        log::debug!("Calling {} ({:?})", binary_path.display(), request.command);

        let mut child = Command::new(&binary_path)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ExportError::Provider(format!("Failed to spawn {}: {e}", binary_path.display()))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ExportError::Provider("Provider stdin unavailable".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(ExportError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        parse_response(&String::from_utf8_lossy(&output.stdout))
    }
}

fn parse_response<R: DeserializeOwned>(raw: &str) -> ExportResult<R> {
    if raw.trim().is_empty() {
        return Err(ExportError::SourceUnavailable(
            "Provider returned no response".into(),
        ));
    }

    let response: Response<R> = serde_json::from_str(raw)
        .map_err(|e| ExportError::Provider(format!("Failed to parse response: {e}")))?;

    match response {
        Response::Success { data } => Ok(data),
        Response::Error { error } => Err(ExportError::Provider(error)),
    }
}

impl ReminderSource for ProviderSource {
    async fn request_access(&self) -> ExportResult<bool> {
        self.call(RequestAccess::default()).await
    }

    async fn fetch_reminders(&self) -> ExportResult<Vec<Reminder>> {
        self.call(ListReminders::default()).await?.ok_or_else(|| {
            ExportError::SourceUnavailable(format!("Provider '{}' returned no reminders", self.name))
        })
    }
}
