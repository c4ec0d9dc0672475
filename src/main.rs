use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use taskboard::config::BoardToml;
use taskboard::logging;

mod cmd;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(version, about = "Terminal task board - move project cards between stages")]
pub struct Cli {
    /// Log at debug level (overridden by TASKBOARD_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to taskboard.toml. Defaults to ./taskboard.toml, then the user config dir.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the board (the default when no command is given)
    Board {
        /// Read commands from this file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
    },
    /// View or validate configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Validate configuration and show any warnings
    Validate,
    /// Initialize a default taskboard.toml file
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None => run_board(&cli, None),
        Some(Commands::Board { script }) => run_board(&cli, script.clone()),
        Some(Commands::Config { command }) => {
            // Config commands report a broken file themselves, so log with defaults.
            let _guard = logging::init(&BoardToml::default().logging, cli.verbose)?;
            cmd::cmd_config(cli.config.as_deref(), command.clone())
        }
    }
}

fn run_board(cli: &Cli, script: Option<PathBuf>) -> Result<()> {
    let (config, source) = BoardToml::load_or_default(cli.config.as_deref())?;
    let _guard = logging::init(&config.logging, cli.verbose)?;
    match &source {
        Some(path) => tracing::debug!(path = %path.display(), "Loaded config"),
        None => tracing::debug!("No config file found, using defaults"),
    }
    for warning in config.validate() {
        tracing::warn!("{}", warning);
    }
    cmd::cmd_board(&config, script.as_deref())
}
