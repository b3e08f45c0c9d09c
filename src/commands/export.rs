use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use reminders_core::{ExportConfig, FileSource, OutputFormat, ProviderSource, run_export};

#[derive(Args, Debug, Default, Clone, PartialEq)]
pub struct ExportArgs {
    /// Regex over list names to include (default ".*", all lists)
    #[arg(long, value_name = "REGEX")]
    pub include_lists: Option<String>,

    /// Regex over list names to exclude (default "", no lists)
    #[arg(long, value_name = "REGEX")]
    pub exclude_lists: Option<String>,

    /// Also export completed reminders (`--include-completed=false` to turn off)
    #[arg(
        long,
        alias = "include-deleted",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub include_completed: Option<bool>,

    /// Output schema: full (alias full-json) or simple (alias remindmd)
    #[arg(long, value_name = "FORMAT")]
    pub output_format: Option<OutputFormat>,

    /// Read a JSON snapshot of reminders instead of asking a provider ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Provider to query, run as reminders-provider-<name>
    #[arg(long)]
    pub provider: Option<String>,

    /// Write the JSON here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    /// Command-line values take precedence over the config file.
    pub fn apply(&self, mut config: ExportConfig) -> ExportConfig {
        if let Some(include) = &self.include_lists {
            config.include_lists = include.clone();
        }
        if let Some(exclude) = &self.exclude_lists {
            config.exclude_lists = exclude.clone();
        }
        if let Some(include_completed) = self.include_completed {
            config.include_completed = include_completed;
        }
        if let Some(format) = self.output_format {
            config.output_format = format;
        }
        if let Some(provider) = &self.provider {
            config.provider = provider.clone();
            config.provider_path = None;
        }
        config
    }
}

pub async fn run(args: ExportArgs) -> Result<()> {
    let config = args.apply(ExportConfig::load().context("Failed to load config")?);
    let bytes = export_bytes(&args, &config).await?;
    write_output(&bytes, args.output.as_deref())
}

async fn export_bytes(args: &ExportArgs, config: &ExportConfig) -> Result<Vec<u8>> {
    let bytes = match &args.input {
        Some(path) => {
            log::info!("Reading reminders from {}", path.display());
            run_export(&FileSource::new(path), config).await?
        }
        None => {
            let mut source = ProviderSource::from_name(
                &config.provider,
                Duration::from_secs(config.provider_timeout_secs),
            );
            if let Some(path) = &config.provider_path {
                source = source.with_binary(path);
            }
            log::info!("Reading reminders from provider '{}'", source.name());
            run_export(&source, config).await?
        }
    };

    Ok(bytes)
}

fn write_output(bytes: &[u8], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"[
        {
            "calendarItemIdentifier": "R2",
            "title": "Pay rent",
            "creationDate": "2025-02-02T09:00:00Z",
            "isCompleted": true,
            "list": "Personal",
            "account": "iCloud"
        },
        {
            "calendarItemIdentifier": "R1",
            "title": "Buy milk",
            "creationDate": "2025-02-01T09:00:00Z",
            "list": "Personal",
            "account": "iCloud"
        }
    ]"#;

    #[test]
    fn test_flags_override_config() {
        let args = ExportArgs {
            exclude_lists: Some("Work".to_string()),
            include_completed: Some(true),
            output_format: Some(OutputFormat::Simple),
            provider: Some("fake".to_string()),
            ..Default::default()
        };
        let file_config = ExportConfig {
            include_lists: "Home".to_string(),
            provider_path: Some(PathBuf::from("/opt/provider")),
            ..Default::default()
        };

        let config = args.apply(file_config);
        assert_eq!(config.include_lists, "Home");
        assert_eq!(config.exclude_lists, "Work");
        assert!(config.include_completed);
        assert_eq!(config.output_format, OutputFormat::Simple);
        assert_eq!(config.provider, "fake");
        assert!(config.provider_path.is_none());

        let args = ExportArgs {
            include_completed: Some(false),
            ..Default::default()
        };
        let file_config = ExportConfig {
            include_completed: true,
            ..Default::default()
        };
        assert!(!args.apply(file_config).include_completed);
    }

    #[test]
    fn test_unset_flags_keep_config() {
        let file_config = ExportConfig {
            include_completed: true,
            ..Default::default()
        };
        assert_eq!(ExportArgs::default().apply(file_config.clone()), file_config);
    }

    #[tokio::test]
    async fn test_snapshot_file_to_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("snapshot.json");
        let output = dir.path().join("out.json");
        std::fs::write(&input, SNAPSHOT).unwrap();

        let args = ExportArgs {
            input: Some(input),
            output: Some(output.clone()),
            ..Default::default()
        };
        let config = args.apply(ExportConfig::default());
        let bytes = export_bytes(&args, &config).await.unwrap();
        write_output(&bytes, args.output.as_deref()).unwrap();

        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({
                "reminders": { "iCloud": { "Personal": [{
                    "calendarItemIdentifier": "R1",
                    "title": "Buy milk",
                    "creationDate": "2025-02-01 09:00:00",
                    "priority": 0,
                    "completed": false
                }]}}
            })
        );
    }
}
