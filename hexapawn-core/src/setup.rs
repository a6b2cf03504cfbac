//! Puzzle files and position generators

use std::path::Path;

use anyhow::Context;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::ai::SearchConfig;
use crate::board::{Board, Cell, Player};

/// A single move request: board rows, side to move, search depth
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    pub board: Vec<String>,
    pub player: char,
    #[serde(default = "default_depth")]
    pub depth: u32,
}

fn default_depth() -> u32 {
    SearchConfig::default().depth
}

impl Puzzle {
    /// Standard opening of the given size with White to move
    pub fn standard(size: usize, depth: u32) -> anyhow::Result<Self> {
        let board = Board::standard(size)?;
        Ok(Self {
            board: board.to_output(),
            player: Player::White.tag(),
            depth,
        })
    }

    /// Validate and build the board and player
    pub fn to_board(&self) -> anyhow::Result<(Board, Player)> {
        let player = Player::from_tag(self.player)?;
        let board = Board::from_rows(&self.board, self.board.len())?;
        Ok((board, player))
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read puzzle: {}", path.display()))?;
        let puzzle: Puzzle = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse puzzle: {}", path.display()))?;
        Ok(puzzle)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Random position with up to `pawns_per_side` pawns for each color.
///
/// White never stands on row N-1 and Black never on row 0, so the position
/// is not already decided by goal row. The side to move may still be stuck.
pub fn random_position<R: Rng>(rng: &mut R, size: usize, pawns_per_side: usize) -> Board {
    let mut cells = vec![Cell::Empty; size * size];
    if size < 2 {
        return Board::from_cells(size, cells);
    }

    let mut free: Vec<usize> = (0..size * size).collect();
    free.shuffle(rng);

    // White may not start on its goal row (last row)
    let white_ok = |i: &usize| *i < size * (size - 1);
    // Black may not start on its goal row (first row)
    let black_ok = |i: &usize| *i >= size;

    let whites: Vec<usize> = free.iter().copied().filter(white_ok).take(pawns_per_side).collect();
    free.retain(|i| !whites.contains(i));
    let blacks: Vec<usize> = free.iter().copied().filter(black_ok).take(pawns_per_side).collect();

    for i in whites {
        cells[i] = Cell::White;
    }
    for i in blacks {
        cells[i] = Cell::Black;
    }

    Board::from_cells(size, cells)
}

/// Seeded batch of random positions
pub fn random_positions(seed: u64, count: usize, size: usize, pawns_per_side: usize) -> Vec<Board> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let pawns = rng.gen_range(1..=pawns_per_side.max(1));
            random_position(&mut rng, size, pawns)
        })
        .collect()
}
