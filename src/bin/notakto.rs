//! Notakto CLI - exact solver for misère tic-tac-toe on one or more boards
//!
//! This CLI provides:
//! - Solving a position (single-line value on stdout)
//! - Per-move analysis with optional JSON export

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "notakto")]
#[command(version, about = "Exact alpha-beta solver for multi-board Notakto", long_about = None)]
struct Cli {
    /// Log search progress to stderr (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the game value of a position
    Solve(notakto::cli::commands::solve::SolveArgs),

    /// Evaluate every legal move from a position
    Analyze(notakto::cli::commands::analyze::AnalyzeArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "notakto=debug" } else { "notakto=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve(args) => notakto::cli::commands::solve::execute(args),
        Commands::Analyze(args) => notakto::cli::commands::analyze::execute(args),
    }
}
