//! Hexapawn Core - Board, evaluation and alpha-beta search
//!
//! This crate provides:
//! - N×N board with pawn lists kept in sync with the grid
//! - Move generation (forward advances, diagonal captures)
//! - Position evaluation (goal row, stalemate, pawn and clear-path balance)
//! - Minimax search with alpha-beta pruning, optionally root-parallel
//! - Engine self-play and JSON puzzle files

pub mod board;
pub mod error;
pub mod eval;
pub mod ai;
pub mod game;
pub mod setup;

// Re-exports for convenient access
pub use board::{Board, Cell, Move, Player, Pos};
pub use error::{HexapawnError, Result};
pub use eval::{evaluate, heuristic, WIN_VALUE};
pub use ai::{hexapawn, search, AlphaBetaAI, SearchConfig, SearchOutcome, SearchStats};
pub use game::{play_game, game_result, GameRecord, GameResult};
pub use setup::{random_position, random_positions, Puzzle};
