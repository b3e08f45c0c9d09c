//! Provider protocol types.
//!
//! Defines the JSON protocol used between reminders-json and provider
//! binaries over stdin/stdout. Any executable that reads one request line
//! and writes one response can act as a provider.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::reminder::Reminder;

pub trait ProviderCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

/// Commands that providers must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    RequestAccess,
    ListReminders,
}

/// Request sent from the CLI to a provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent from a provider back to the CLI.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

/// Ask the host for read access to reminders. Providers answer with the grant.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RequestAccess {}

impl ProviderCommand for RequestAccess {
    type Response = bool;
    fn command() -> Command {
        Command::RequestAccess
    }
}

/// Fetch every reminder in every list.
///
/// A `null` payload means the store returned nothing usable.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListReminders {}

impl ProviderCommand for ListReminders {
    type Response = Option<Vec<Reminder>>;
    fn command() -> Command {
        Command::ListReminders
    }
}
