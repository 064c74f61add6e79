//! Waffle Helper - CLI
//!
//! Manual tile-swap helper for Waffle puzzles with TUI and line-based modes.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use waffle_helper::{
    commands::{ReplayConfig, replay, run_simple},
    config::HelperConfig,
    output::print_replay_result,
};

#[derive(Parser)]
#[command(
    name = "waffle_helper",
    about = "Swap, lock and undo tiles while working through a Waffle puzzle",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Initial board: 5/3/5/3/5 letters, lowercase = grey, uppercase = colored
    #[arg(short, long, global = true)]
    board: Option<String>,

    /// Milliseconds a locked tile waits for its confirming unlock click
    #[arg(long, global = true)]
    unlock_ms: Option<u64>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (line commands without TUI)
    Simple,

    /// Apply a list of moves to the --board board and print the result
    Replay {
        /// Moves: 'r,c:r,c', 'lock:r,c', 'unlock:r,c', 'undo', 'reset', 'unlock-all'
        moves: Vec<String>,

        /// Show every step and the initial board
        #[arg(short = 'V', long)]
        steps: bool,
    },
}

/// Set up the tracing subscriber
///
/// `RUST_LOG` wins over `--verbose`. Without a log file, output goes to stderr.
fn init_logging(verbose: bool, log_file: Option<&PathBuf>) -> Result<()> {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into());
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_ref())?;

    let config = HelperConfig::new(cli.board, cli.unlock_ms);

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    match command {
        Commands::Play => run_play_command(config),
        Commands::Simple => run_simple(&config).map_err(|e| anyhow::anyhow!(e)),
        Commands::Replay { moves, steps } => run_replay_command(&config, moves, steps),
    }
}

fn run_replay_command(config: &HelperConfig, moves: Vec<String>, verbose: bool) -> Result<()> {
    let result =
        replay(ReplayConfig::from_helper(config, moves)).map_err(|e| anyhow::anyhow!(e))?;
    print_replay_result(&result, verbose);
    Ok(())
}

fn run_play_command(config: HelperConfig) -> Result<()> {
    use waffle_helper::interactive::{App, run_tui};

    let app = App::new(config);
    run_tui(app)
}
