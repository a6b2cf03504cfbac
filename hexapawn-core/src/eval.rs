//! Position evaluation

use crate::board::{Board, Cell, Player};

/// Score of a decided game (win for the evaluating side)
pub const WIN_VALUE: i32 = 10;

/// Evaluate `board` from `player`'s perspective with `to_move` next to play.
///
/// Goal-row wins are checked first, then a side to move with no legal move
/// loses. Otherwise the heuristic score is returned. Never mutates the board.
pub fn evaluate(board: &Board, player: Player, to_move: Player) -> i32 {
    if let Some(winner) = board.winner(to_move) {
        return if winner == player { WIN_VALUE } else { -WIN_VALUE };
    }

    if !board.has_moves(to_move) {
        return if to_move == player { -WIN_VALUE } else { WIN_VALUE };
    }

    heuristic(board, player)
}

/// Pawn advantage plus clear-path balance for `player`
pub fn heuristic(board: &Board, player: Player) -> i32 {
    let material = board.pawn_count(player) as i32 - board.pawn_count(player.opponent()) as i32;

    let paths: i32 = (0..board.size())
        .map(|col| clear_path_score(board, col, player))
        .sum();

    material + paths
}

/// +1 / -1 when a column holds a single color whose bottommost pawn belongs
/// to `player` / the opponent; 0 for empty or contested columns.
fn clear_path_score(board: &Board, col: usize, player: Player) -> i32 {
    let mut contested = false;
    let mut last: Option<Player> = None;

    for cell in board.column(col) {
        if cell == Cell::Empty {
            continue;
        }
        let owner = cell.player();
        if last.is_some() && last != owner {
            contested = true;
        }
        last = owner;
    }

    let clear = if contested { 0 } else { 1 };
    match last {
        Some(p) if p == player => clear,
        Some(_) => -clear,
        None => 0,
    }
}
