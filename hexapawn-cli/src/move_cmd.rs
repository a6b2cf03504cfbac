//! Move command - compute the engine's reply for one position

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use hexapawn_core::{search, Board, Move, Player, Puzzle, SearchConfig};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct MoveArgs {
    /// Board rows separated by commas, top row first (e.g. "www,---,bbb")
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        required_unless_present = "file",
        conflicts_with = "file"
    )]
    pub board: Vec<String>,

    /// Side to move and maximize ('w' or 'b')
    #[arg(long, default_value = "w")]
    pub player: char,

    /// Search depth in plies
    #[arg(long, default_value = "4")]
    pub depth: u32,

    /// Read board, player and depth from a JSON puzzle file instead
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output result as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON report of a single search
#[derive(Serialize)]
struct MoveReport {
    board: Vec<String>,
    player: char,
    value: i32,
    best_move: Option<Move>,
    nodes: u64,
    cutoffs: u64,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: MoveArgs, parallel: bool) -> Result<()> {
    let puzzle = load_puzzle(&args)?;
    let (board, player) = puzzle.to_board().context("Invalid position")?;

    tracing::info!(
        "Searching {}x{} board for {} at depth {}",
        board.size(),
        board.size(),
        player,
        puzzle.depth
    );

    let config = SearchConfig::with_depth(puzzle.depth).parallel(parallel);
    let outcome = search(&board, player, &config);

    if args.json {
        let report = MoveReport {
            board: outcome.board.to_output(),
            player: player.tag(),
            value: outcome.value,
            best_move: outcome.best_move,
            nodes: outcome.stats.nodes,
            cutoffs: outcome.stats.cutoffs,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report_text(&outcome.board, player, outcome.best_move, outcome.value);
    }

    Ok(())
}

fn load_puzzle(args: &MoveArgs) -> Result<Puzzle> {
    match &args.file {
        Some(path) => Puzzle::load(path),
        None => Ok(Puzzle {
            board: args.board.clone(),
            player: args.player,
            depth: args.depth,
        }),
    }
}

fn report_text(board: &Board, player: Player, best_move: Option<Move>, value: i32) {
    match best_move {
        Some(mv) => tracing::info!("{} plays {} -> {} (value {})", player, mv.from, mv.to, value),
        None => tracing::info!("{} has no move to make (value {})", player, value),
    }
    println!("{}", board);
}
