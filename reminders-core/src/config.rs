//! Export configuration at ~/.config/reminders-json/config.toml
//!
//! Every key is optional; command-line flags override file values.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, File};
use serde::Deserialize;

use crate::error::{ExportError, ExportResult};
use crate::filter::DEFAULT_INCLUDE_LISTS;
use crate::record::Schema;

pub const DEFAULT_PROVIDER: &str = "eventkit";
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Output schema selection, as named on the command line and in config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    #[serde(alias = "fullJson", alias = "full-json")]
    Full,
    #[serde(alias = "remindmd")]
    Simple,
}

impl OutputFormat {
    pub fn schema(self) -> Schema {
        match self {
            OutputFormat::Full => Schema::Full,
            OutputFormat::Simple => Schema::Simple,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" | "full-json" | "fullJson" => Ok(OutputFormat::Full),
            "simple" | "remindmd" => Ok(OutputFormat::Simple),
            other => Err(format!(
                "Unknown output format '{other}'. Expected one of: full, simple (aliases: full-json, remindmd)"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Full => write!(f, "full"),
            OutputFormat::Simple => write!(f, "simple"),
        }
    }
}

fn default_include_lists() -> String {
    DEFAULT_INCLUDE_LISTS.to_string()
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_provider_timeout_secs() -> u64 {
    DEFAULT_PROVIDER_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportConfig {
    /// Regex over list names to include; empty includes every list
    #[serde(default = "default_include_lists")]
    pub include_lists: String,

    /// Regex over list names to exclude; empty excludes none
    #[serde(default)]
    pub exclude_lists: String,

    #[serde(default)]
    pub include_completed: bool,

    #[serde(default)]
    pub output_format: OutputFormat,

    /// Provider name, resolved to `reminders-provider-<name>` on PATH
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Explicit provider executable, bypassing the PATH lookup
    #[serde(default)]
    pub provider_path: Option<PathBuf>,

    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            include_lists: default_include_lists(),
            exclude_lists: String::new(),
            include_completed: false,
            output_format: OutputFormat::default(),
            provider: default_provider(),
            provider_path: None,
            provider_timeout_secs: default_provider_timeout_secs(),
        }
    }
}

impl ExportConfig {
    pub fn config_path() -> ExportResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ExportError::Config("Could not determine config directory".into()))?
            .join("reminders-json");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location; a missing file yields the defaults.
    pub fn load() -> ExportResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> ExportResult<Self> {
        let mut config: ExportConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| ExportError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| ExportError::Config(e.to_string()))?;

        if let Some(provider_path) = &config.provider_path {
            let expanded = shellexpand::tilde(&provider_path.to_string_lossy()).into_owned();
            config.provider_path = Some(PathBuf::from(expanded));
        }

        Ok(config)
    }

    /// Write a config file with every option commented out.
    /// Returns false without touching anything if the file already exists.
    pub fn create_default_config(path: &Path) -> ExportResult<bool> {
        if path.exists() {
            return Ok(false);
        }

        let contents = format!(
            "\
# reminders-json configuration

# Regex over list names to include (empty includes every list):
# include_lists = \"{DEFAULT_INCLUDE_LISTS}\"

# Regex over list names to exclude (empty excludes none):
# exclude_lists = \"\"

# Export completed reminders too:
# include_completed = false

# Output schema, \"full\" or \"simple\":
# output_format = \"full\"

# Reminder provider, run as reminders-provider-<name>:
# provider = \"{DEFAULT_PROVIDER}\"
# provider_path = \"~/bin/reminders-provider-{DEFAULT_PROVIDER}\"
# provider_timeout_secs = {DEFAULT_PROVIDER_TIMEOUT_SECS}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExportError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ExportError::Config(format!("Could not write config file: {e}")))?;

        Ok(true)
    }
}
