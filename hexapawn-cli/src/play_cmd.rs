//! Play and solve commands - self-play from the standard start

use anyhow::Result;
use clap::Args;

use hexapawn_core::{play_game, search, Board, Player, SearchConfig, WIN_VALUE};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board size (N for an NxN board)
    #[arg(long, default_value = "3")]
    pub size: usize,

    /// Search depth for both sides
    #[arg(long, default_value = "9")]
    pub depth: u32,

    /// Side that moves first ('w' or 'b')
    #[arg(long, default_value = "w")]
    pub first: char,

    /// Stop after this many plies
    #[arg(long, default_value = "200")]
    pub max_plies: usize,
}

#[derive(Args)]
pub struct SolveArgs {
    /// Board size (N for an NxN board)
    #[arg(long, default_value = "3")]
    pub size: usize,

    /// Search depth
    #[arg(long, default_value = "9")]
    pub depth: u32,
}

// ============================================================================
// PLAY
// ============================================================================

pub fn run_play(args: PlayArgs, parallel: bool) -> Result<()> {
    let first = Player::from_tag(args.first)?;
    let board = Board::standard(args.size)?;
    let config = SearchConfig::with_depth(args.depth).parallel(parallel);

    tracing::info!(
        "Self-play on {}x{} at depth {}, {} first",
        args.size,
        args.size,
        args.depth,
        first
    );

    let record = play_game(board, first, &config, args.max_plies);

    let mut to_move = first;
    println!("{}\n", record.boards[0]);
    for (mv, board) in record.moves.iter().zip(&record.boards[1..]) {
        println!("{}: {} -> {}", to_move, mv.from, mv.to);
        println!("{}\n", board);
        to_move = to_move.opponent();
    }

    match record.result.winner() {
        Some(winner) => println!("{} wins after {} plies", winner, record.plies()),
        None => println!("No result after {} plies", record.plies()),
    }

    Ok(())
}

// ============================================================================
// SOLVE
// ============================================================================

pub fn run_solve(args: SolveArgs, parallel: bool) -> Result<()> {
    let board = Board::standard(args.size)?;
    let config = SearchConfig::with_depth(args.depth).parallel(parallel);

    for first in [Player::White, Player::Black] {
        let outcome = search(&board, first, &config);
        let verdict = match outcome.value {
            WIN_VALUE => "wins",
            v if v == -WIN_VALUE => "loses",
            _ => "undecided at this depth",
        };
        println!(
            "{} moving first {} (value {}, {} nodes, {} cutoffs)",
            first, verdict, outcome.value, outcome.stats.nodes, outcome.stats.cutoffs
        );
    }

    Ok(())
}
