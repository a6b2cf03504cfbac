//! Engine self-play

use serde::{Deserialize, Serialize};

use crate::ai::{AlphaBetaAI, SearchConfig};
use crate::board::{Board, Move, Player};

/// Game result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Ongoing,
    WhiteWins,
    BlackWins,
}

impl GameResult {
    fn win_for(player: Player) -> Self {
        match player {
            Player::White => GameResult::WhiteWins,
            Player::Black => GameResult::BlackWins,
        }
    }

    /// Get winner (None while ongoing)
    pub fn winner(self) -> Option<Player> {
        match self {
            GameResult::WhiteWins => Some(Player::White),
            GameResult::BlackWins => Some(Player::Black),
            GameResult::Ongoing => None,
        }
    }
}

/// Result of a decided (or ply-limited) game
#[derive(Clone, Debug)]
pub struct GameRecord {
    pub result: GameResult,
    /// Side that moved first
    pub first: Player,
    pub moves: Vec<Move>,
    /// Boards after each move, starting with the initial board
    pub boards: Vec<Board>,
}

impl GameRecord {
    pub fn plies(&self) -> usize {
        self.moves.len()
    }

    pub fn final_board(&self) -> &Board {
        // boards always holds at least the initial board
        &self.boards[self.boards.len() - 1]
    }
}

/// Result of `board` with `to_move` next to play
pub fn game_result(board: &Board, to_move: Player) -> GameResult {
    if let Some(winner) = board.winner(to_move) {
        return GameResult::win_for(winner);
    }
    if !board.has_moves(to_move) {
        return GameResult::win_for(to_move.opponent());
    }
    GameResult::Ongoing
}

/// Play both sides with the same search settings until a side wins or
/// `max_plies` moves have been made.
pub fn play_game(initial: Board, first: Player, config: &SearchConfig, max_plies: usize) -> GameRecord {
    let ai = AlphaBetaAI::with_config(config.clone());
    let mut board = initial;
    let mut to_move = first;
    let mut moves = Vec::new();
    let mut boards = vec![board.clone()];

    let result = loop {
        let result = game_result(&board, to_move);
        if result != GameResult::Ongoing || moves.len() >= max_plies {
            break result;
        }

        let outcome = ai.best_board(&board, to_move);
        let mv = match outcome.best_move {
            Some(mv) => mv,
            // depth 0 never picks a move
            None => break GameResult::Ongoing,
        };

        tracing::debug!("{} plays {} -> {} (value {})", to_move, mv.from, mv.to, outcome.value);

        moves.push(mv);
        board = outcome.board;
        boards.push(board.clone());
        to_move = to_move.opponent();
    };

    GameRecord {
        result,
        first,
        moves,
        boards,
    }
}
