mod commands;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use commands::export::ExportArgs;

#[derive(Parser)]
#[command(name = "reminders-json", version)]
#[command(about = "Export your reminders as JSON, grouped by account and list")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    export: ExportArgs,

    /// Log more to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Export reminders (what runs when no command is given)
    Export(ExportArgs),
    /// Show where the config file lives
    Config {
        /// Write a commented default config file if there is none
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    /// The command to run. Top-level export flags stand for the `export`
    /// subcommand and can't be combined with an explicit subcommand.
    fn into_command(self) -> Result<Commands, clap::Error> {
        match self.command {
            None => Ok(Commands::Export(self.export)),
            Some(_) if self.export != ExportArgs::default() => Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "export flags go after `export`, or are used without a subcommand",
            )),
            Some(command) => Ok(command),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.into_command().unwrap_or_else(|e| e.exit()) {
        Commands::Export(args) => commands::export::run(args).await,
        Commands::Config { init } => commands::config::run(init),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}
