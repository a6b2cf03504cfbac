//! Square Hexapawn board with per-player pawn lists

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{HexapawnError, Result};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Player color
///
/// White starts on row 0 and advances toward row N-1; Black starts on row
/// N-1 and advances toward row 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    White = 0,
    Black = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Parse a player tag (`'w'` or `'b'`)
    pub fn from_tag(tag: char) -> Result<Self> {
        match tag {
            'w' => Ok(Player::White),
            'b' => Ok(Player::Black),
            other => Err(HexapawnError::InvalidInput(format!(
                "unknown player tag '{}' (expected 'w' or 'b')",
                other
            ))),
        }
    }

    pub fn tag(self) -> char {
        self.cell().tag()
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::White => Cell::White,
            Player::Black => Cell::Black,
        }
    }

    /// Row delta of a forward step
    fn forward(self) -> isize {
        match self {
            Player::White => 1,
            Player::Black => -1,
        }
    }

    /// Row on which a pawn of this color wins
    pub fn goal_row(self, size: usize) -> usize {
        match self {
            Player::White => size - 1,
            Player::Black => 0,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

/// Contents of a single square
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    White,
    Black,
}

impl Cell {
    pub fn from_tag(tag: char) -> Option<Cell> {
        match tag {
            '-' => Some(Cell::Empty),
            'w' => Some(Cell::White),
            'b' => Some(Cell::Black),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::White => 'w',
            Cell::Black => 'b',
        }
    }

    /// Owner of the pawn on this square, if any
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::White => Some(Player::White),
            Cell::Black => Some(Player::Black),
        }
    }
}

/// Board coordinates as (column, row)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub col: usize,
    pub row: usize,
}

impl Pos {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// Neighbor one row forward for `player`, shifted `dcol` columns.
    /// `None` when the target falls off a board of `size`.
    fn step(self, player: Player, dcol: isize, size: usize) -> Option<Pos> {
        let col = self.col.checked_add_signed(dcol)?;
        let row = self.row.checked_add_signed(player.forward())?;
        (col < size && row < size).then_some(Pos::new(col, row))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A pawn move: forward advance or diagonal capture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Pos,
    pub to: Pos,
}

impl Move {
    pub const fn new(from: Pos, to: Pos) -> Self {
        Self { from, to }
    }

    pub fn is_capture(&self) -> bool {
        self.from.col != self.to.col
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// N×N board. The grid is rebuilt from the pawn lists after every move.
///
/// Equality compares the grid only; pawn list order is not part of a
/// position's identity.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    /// Row-major cells, `cells[row * size + col]`
    cells: Vec<Cell>,
    white_pawns: Vec<Pos>,
    black_pawns: Vec<Pos>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cells == other.cells
    }
}

impl Eq for Board {}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Build a board from row strings of `'w'`, `'b'` and `'-'`
    pub fn from_rows<S: AsRef<str>>(rows: &[S], size: usize) -> Result<Self> {
        if size == 0 {
            return Err(HexapawnError::InvalidBoard("board size must be at least 1".into()));
        }
        if rows.len() != size {
            return Err(HexapawnError::InvalidBoard(format!(
                "expected {} rows, got {}",
                size,
                rows.len()
            )));
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let width = line.chars().count();
            if width != size {
                return Err(HexapawnError::InvalidBoard(format!(
                    "row {} has {} cells, expected {}",
                    row, width, size
                )));
            }
            for (col, tag) in line.chars().enumerate() {
                let cell = Cell::from_tag(tag).ok_or_else(|| {
                    HexapawnError::InvalidBoard(format!(
                        "unrecognized cell tag '{}' at {}",
                        tag,
                        Pos::new(col, row)
                    ))
                })?;
                cells.push(cell);
            }
        }

        Ok(Self::from_cells(size, cells))
    }

    /// Standard opening: White fills row 0, Black fills row N-1
    pub fn standard(size: usize) -> Result<Self> {
        if size < 2 {
            return Err(HexapawnError::InvalidBoard(format!(
                "standard start needs size >= 2, got {}",
                size
            )));
        }
        let mut cells = vec![Cell::Empty; size * size];
        cells[..size].fill(Cell::White);
        cells[size * (size - 1)..].fill(Cell::Black);
        Ok(Self::from_cells(size, cells))
    }

    /// Scan a validated grid once to derive the pawn lists
    pub(crate) fn from_cells(size: usize, cells: Vec<Cell>) -> Self {
        let mut white_pawns = Vec::new();
        let mut black_pawns = Vec::new();
        for row in 0..size {
            for col in 0..size {
                match cells[row * size + col] {
                    Cell::White => white_pawns.push(Pos::new(col, row)),
                    Cell::Black => black_pawns.push(Pos::new(col, row)),
                    Cell::Empty => {}
                }
            }
        }
        Self {
            size,
            cells,
            white_pawns,
            black_pawns,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at `pos`, or `None` off the board
    pub fn get(&self, pos: Pos) -> Option<Cell> {
        if pos.col < self.size && pos.row < self.size {
            Some(self.cells[pos.row * self.size + pos.col])
        } else {
            None
        }
    }

    /// Pawn positions for `player`, in list order
    pub fn pawns(&self, player: Player) -> &[Pos] {
        match player {
            Player::White => &self.white_pawns,
            Player::Black => &self.black_pawns,
        }
    }

    fn pawns_mut(&mut self, player: Player) -> &mut Vec<Pos> {
        match player {
            Player::White => &mut self.white_pawns,
            Player::Black => &mut self.black_pawns,
        }
    }

    pub fn pawn_count(&self, player: Player) -> usize {
        self.pawns(player).len()
    }

    /// Cells of one column, top to bottom
    pub(crate) fn column(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        (0..self.size).map(move |row| self.cells[row * self.size + col])
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Legal moves for `player`: forward advances first, then diagonal
    /// captures, each in pawn-list order. Search tie-breaks depend on this
    /// order.
    pub fn generate_moves(&self, player: Player) -> Vec<Move> {
        let mut moves = Vec::new();
        self.generate_forward_moves(player, &mut moves);
        self.generate_diagonal_moves(player, &mut moves);
        moves
    }

    fn generate_forward_moves(&self, player: Player, moves: &mut Vec<Move>) {
        for &pawn in self.pawns(player) {
            if let Some(to) = pawn.step(player, 0, self.size) {
                if self.get(to) == Some(Cell::Empty) {
                    moves.push(Move::new(pawn, to));
                }
            }
        }
    }

    fn generate_diagonal_moves(&self, player: Player, moves: &mut Vec<Move>) {
        let enemy = player.opponent().cell();
        for &pawn in self.pawns(player) {
            // Right capture before left
            for dcol in [1, -1] {
                if let Some(to) = pawn.step(player, dcol, self.size) {
                    if self.get(to) == Some(enemy) {
                        moves.push(Move::new(pawn, to));
                    }
                }
            }
        }
    }

    pub fn has_moves(&self, player: Player) -> bool {
        !self.generate_moves(player).is_empty()
    }

    // ========================================================================
    // MOVE APPLICATION
    // ========================================================================

    /// Apply a move in place after checking it against move generation for
    /// the pawn standing on `from`.
    pub fn make_move(&mut self, from: Pos, to: Pos) -> Result<()> {
        let mover = self
            .get(from)
            .and_then(Cell::player)
            .ok_or(HexapawnError::IllegalMove { from, to })?;

        let mv = Move::new(from, to);
        if !self.generate_moves(mover).contains(&mv) {
            return Err(HexapawnError::IllegalMove { from, to });
        }

        self.apply(mv);
        Ok(())
    }

    /// Apply a move produced by `generate_moves` without re-checking it
    pub(crate) fn apply(&mut self, mv: Move) {
        let mover = match self.get(mv.from).and_then(Cell::player) {
            Some(p) => p,
            None => return,
        };

        if let Some(slot) = self.pawns_mut(mover).iter_mut().find(|p| **p == mv.from) {
            *slot = mv.to;
        }
        self.pawns_mut(mover.opponent()).retain(|p| *p != mv.to);

        self.sync_cells();
    }

    /// Independent copy of this board with `mv` applied
    pub(crate) fn child(&self, mv: Move) -> Board {
        let mut next = self.clone();
        next.apply(mv);
        next
    }

    /// Rebuild the grid from the pawn lists
    fn sync_cells(&mut self) {
        self.cells.fill(Cell::Empty);
        for &p in &self.white_pawns {
            self.cells[p.row * self.size + p.col] = Cell::White;
        }
        for &p in &self.black_pawns {
            self.cells[p.row * self.size + p.col] = Cell::Black;
        }
    }

    // ========================================================================
    // TERMINAL CHECKS
    // ========================================================================

    fn on_goal_row(&self, player: Player) -> bool {
        let goal = player.goal_row(self.size);
        self.pawns(player).iter().any(|p| p.row == goal)
    }

    /// Winner by goal row. When both colors stand on their goal rows (only
    /// possible on a hand-built board) the side that is not to move wins.
    pub fn winner(&self, to_move: Player) -> Option<Player> {
        let last_mover = to_move.opponent();
        if self.on_goal_row(last_mover) {
            Some(last_mover)
        } else if self.on_goal_row(to_move) {
            Some(to_move)
        } else {
            None
        }
    }

    /// True once any pawn has reached its goal row
    pub fn is_finished(&self) -> bool {
        self.on_goal_row(Player::White) || self.on_goal_row(Player::Black)
    }

    // ========================================================================
    // OUTPUT
    // ========================================================================

    /// Rows as tag strings, same shape as the input to `from_rows`
    pub fn to_output(&self) -> Vec<String> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|c| c.tag()).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_output().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", row)?;
        }
        Ok(())
    }
}
