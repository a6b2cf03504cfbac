//! Hexapawn CLI - Command-line interface
//!
//! Commands:
//! - move: Compute the engine's next board for a position
//! - play: Engine self-play from the standard start
//! - solve: Root value of the standard start for each first mover

mod move_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexapawn")]
#[command(about = "Hexapawn alpha-beta move engine")]
struct Cli {
    /// Search root moves on all cores (same result as serial search)
    #[arg(long, global = true)]
    parallel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the next board for the side to move
    Move(move_cmd::MoveArgs),
    /// Play the engine against itself
    Play(play_cmd::PlayArgs),
    /// Report the root value of the standard start
    Solve(play_cmd::SolveArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so board output on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Move(args) => move_cmd::run(args, cli.parallel),
        Commands::Play(args) => play_cmd::run_play(args, cli.parallel),
        Commands::Solve(args) => play_cmd::run_solve(args, cli.parallel),
    }
}
