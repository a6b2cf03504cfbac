//! Minimax search with alpha-beta pruning

use rayon::prelude::*;

use crate::board::{Board, Move, Player};
use crate::error::Result;
use crate::eval::evaluate;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Initial window bounds. Scores never reach these.
pub const SCORE_INF: i32 = i32::MAX;
pub const SCORE_NEG_INF: i32 = i32::MIN;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Search configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to search below the root
    pub depth: u32,
    /// Search root children on the rayon pool
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            parallel: false,
        }
    }
}

impl SearchConfig {
    /// Serial search at given depth
    pub fn with_depth(depth: u32) -> Self {
        Self {
            depth,
            ..Default::default()
        }
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Node and cutoff counters for one search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub cutoffs: u64,
}

impl SearchStats {
    fn merge(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.cutoffs += other.cutoffs;
    }
}

/// Result of a root search
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Minimax value from the searching player's perspective
    pub value: i32,
    /// Chosen move, `None` when the root was terminal or depth was 0
    pub best_move: Option<Move>,
    /// Board after the chosen move (the root itself when no move was made)
    pub board: Board,
    pub stats: SearchStats,
}

/// Best value at a node plus the immediate child that produced it
type Line = (i32, Option<(Move, Board)>);

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Alpha-Beta AI player
#[derive(Clone, Debug, Default)]
pub struct AlphaBetaAI {
    pub config: SearchConfig,
}

impl AlphaBetaAI {
    pub fn new(depth: u32) -> Self {
        Self {
            config: SearchConfig::with_depth(depth),
        }
    }

    pub fn with_config(config: SearchConfig) -> Self {
        Self { config }
    }

    /// Search for `player`'s best next board
    pub fn best_board(&self, board: &Board, player: Player) -> SearchOutcome {
        search(board, player, &self.config)
    }

    /// Get best move for `player`, `None` if the position is already decided
    pub fn best_move(&self, board: &Board, player: Player) -> Option<Move> {
        self.best_board(board, player).best_move
    }
}

/// Single entry point: parse the grid and player tag, search `depth` plies,
/// and return the rows of the chosen next board.
///
/// A root with no legal move (or `depth == 0`) returns the input unchanged.
pub fn hexapawn<S: AsRef<str>>(rows: &[S], size: usize, player: char, depth: u32) -> Result<Vec<String>> {
    let player = Player::from_tag(player)?;
    let board = Board::from_rows(rows, size)?;
    let outcome = search(&board, player, &SearchConfig::with_depth(depth));
    Ok(outcome.board.to_output())
}

// ============================================================================
// ROOT SEARCH
// ============================================================================

/// Search `config.depth` plies with `player` maximizing and moving first
pub fn search(board: &Board, player: Player, config: &SearchConfig) -> SearchOutcome {
    let mut stats = SearchStats::default();

    let (value, best) = if config.parallel {
        search_root_parallel(board, player, config.depth, &mut stats)
    } else {
        search_maximize(
            board,
            player,
            player,
            SCORE_NEG_INF,
            SCORE_INF,
            config.depth,
            &mut stats,
        )
    };

    tracing::debug!(
        "{} search depth={} value={} nodes={} cutoffs={}",
        player,
        config.depth,
        value,
        stats.nodes,
        stats.cutoffs
    );

    match best {
        Some((mv, next)) => SearchOutcome {
            value,
            best_move: Some(mv),
            board: next,
            stats,
        },
        None => SearchOutcome {
            value,
            best_move: None,
            board: board.clone(),
            stats,
        },
    }
}

/// Root children searched concurrently with a full window, merged in
/// generation order with the same strict comparison as the serial search.
/// Value and chosen child match `search_maximize` at the root.
fn search_root_parallel(board: &Board, player: Player, depth: u32, stats: &mut SearchStats) -> Line {
    stats.nodes += 1;

    if depth == 0 || board.is_finished() {
        return (evaluate(board, player, player), None);
    }

    let moves = board.generate_moves(player);
    if moves.is_empty() {
        return (evaluate(board, player, player), None);
    }

    let results: Vec<(Move, Board, i32, SearchStats)> = moves
        .par_iter()
        .map(|&mv| {
            let child = board.child(mv);
            let mut child_stats = SearchStats::default();
            let (value, _) = search_minimize(
                &child,
                player,
                player.opponent(),
                SCORE_NEG_INF,
                SCORE_INF,
                depth - 1,
                &mut child_stats,
            );
            (mv, child, value, child_stats)
        })
        .collect();

    let mut best_value = SCORE_NEG_INF;
    let mut best = None;
    for (mv, child, value, child_stats) in results {
        stats.merge(child_stats);
        tracing::trace!("root {} -> {} value={}", mv.from, mv.to, value);
        if value > best_value {
            best_value = value;
            best = Some((mv, child));
        }
    }

    (best_value, best)
}

// ============================================================================
// MAXIMIZE / MINIMIZE
// ============================================================================

/// Maximizing ply. `alpha` rises as better children are found; `beta` is the
/// caller's bound and is passed through unchanged.
fn search_maximize(
    board: &Board,
    maximizer: Player,
    to_move: Player,
    mut alpha: i32,
    beta: i32,
    depth: u32,
    stats: &mut SearchStats,
) -> Line {
    stats.nodes += 1;

    if depth == 0 || board.is_finished() {
        return (evaluate(board, maximizer, to_move), None);
    }

    let moves = board.generate_moves(to_move);
    if moves.is_empty() {
        return (evaluate(board, maximizer, to_move), None);
    }

    let mut best_value = SCORE_NEG_INF;
    let mut best = None;

    for mv in moves {
        let child = board.child(mv);
        let (value, _) = search_minimize(
            &child,
            maximizer,
            to_move.opponent(),
            alpha,
            beta,
            depth - 1,
            stats,
        );

        // Strict: ties keep the earliest move
        if value > best_value {
            best_value = value;
            best = Some((mv, child));
        }

        if best_value >= beta {
            stats.cutoffs += 1;
            return (best_value, best);
        }

        if best_value > alpha {
            alpha = best_value;
        }
    }

    (best_value, best)
}

/// Minimizing ply, symmetric to `search_maximize`
fn search_minimize(
    board: &Board,
    maximizer: Player,
    to_move: Player,
    alpha: i32,
    mut beta: i32,
    depth: u32,
    stats: &mut SearchStats,
) -> Line {
    stats.nodes += 1;

    if depth == 0 || board.is_finished() {
        return (evaluate(board, maximizer, to_move), None);
    }

    let moves = board.generate_moves(to_move);
    if moves.is_empty() {
        return (evaluate(board, maximizer, to_move), None);
    }

    let mut best_value = SCORE_INF;
    let mut best = None;

    for mv in moves {
        let child = board.child(mv);
        let (value, _) = search_maximize(
            &child,
            maximizer,
            to_move.opponent(),
            alpha,
            beta,
            depth - 1,
            stats,
        );

        if value < best_value {
            best_value = value;
            best = Some((mv, child));
        }

        if best_value <= alpha {
            stats.cutoffs += 1;
            return (best_value, best);
        }

        if best_value < beta {
            beta = best_value;
        }
    }

    (best_value, best)
}

// ============================================================================
// TESTS
// ============================================================================
