use crate::engine::zobrist::ZobristKeys;
use crate::logic::rules::MoveError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ROWS: usize = 8;
pub const COLS: usize = 8;

/// Rows each side fills in the starting position.
const HOME_ROWS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Light => 0,
            Self::Dark => 1,
        }
    }

    /// Row delta of a man's step. Light starts at the top (row 0) and moves down.
    pub const fn forward(self) -> i8 {
        match self {
            Self::Light => 1,
            Self::Dark => -1,
        }
    }

    /// The opponent's back row, where a man of this color is crowned.
    pub const fn promotion_row(self) -> u8 {
        match self {
            Self::Light => 7,
            Self::Dark => 0,
        }
    }

    pub const fn back_row(self) -> u8 {
        self.opposite().promotion_row()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Man,
    King,
}

impl Rank {
    pub const fn index(self) -> usize {
        match self {
            Self::Man => 0,
            Self::King => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: u8,
    pub col: u8,
}

impl Coordinate {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < ROWS && col < COLS {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Neighbouring square `(dr, dc)` away, if it is still on the board.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = i16::from(self.row) + i16::from(dr);
        let col = i16::from(self.col) + i16::from(dc);
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as usize, col as usize)
    }

    pub const fn row(self) -> usize {
        self.row as usize
    }

    pub const fn col(self) -> usize {
        self.col as usize
    }
}

impl TryFrom<(usize, usize)> for Coordinate {
    type Error = MoveError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(row, col).ok_or(MoveError::OutOfBounds)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A piece together with the square it stands on. Two pieces are the same
/// piece when they share a square, which is how captures are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
    pub row: u8,
    pub col: u8,
}

impl Piece {
    #[must_use]
    pub const fn new(color: Color, rank: Rank, at: Coordinate) -> Self {
        Self {
            color,
            rank,
            row: at.row,
            col: at.col,
        }
    }

    pub const fn coord(&self) -> Coordinate {
        Coordinate {
            row: self.row,
            col: self.col,
        }
    }

    pub const fn is_king(&self) -> bool {
        matches!(self.rank, Rank::King)
    }

    /// Index into the four (color, rank) combinations used by the hash table.
    pub const fn kind_index(&self) -> usize {
        self.color.index() * 2 + self.rank.index()
    }

    /// Rows travelled from its own back row; a man is one step from the crown at 6.
    pub const fn advance(&self) -> u8 {
        match self.color {
            Color::Light => self.row,
            Color::Dark => 7 - self.row,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Square {
    #[default]
    Empty,
    Occupied(Piece),
}

impl Square {
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Self::Empty => None,
            Self::Occupied(piece) => Some(piece),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: [[Square; COLS]; ROWS],
    // Indexed by Color::index()
    pieces_left: [u8; 2],
    kings: [u8; 2],
    zobrist_hash: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard starting position: twelve men per side on the dark squares.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        for row in 0..ROWS {
            for col in 0..COLS {
                if (row + col) % 2 == 0 {
                    continue;
                }
                let color = if row < HOME_ROWS {
                    Color::Light
                } else if row >= ROWS - HOME_ROWS {
                    Color::Dark
                } else {
                    continue;
                };
                if let Some(at) = Coordinate::new(row, col) {
                    board.add_piece(at, color, Rank::Man);
                }
            }
        }
        board.zobrist_hash = board.calculate_hash();
        board
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            grid: [[Square::Empty; COLS]; ROWS],
            pieces_left: [0; 2],
            kings: [0; 2],
            zobrist_hash: 0,
        }
    }

    /// Puts a piece on `at`, replacing whatever stood there.
    pub fn add_piece(&mut self, at: Coordinate, color: Color, rank: Rank) -> Piece {
        if let Some(existing) = self.get_piece(at) {
            self.clear_square(&existing);
        }
        let piece = Piece::new(color, rank, at);
        self.grid[at.row()][at.col()] = Square::Occupied(piece);
        self.pieces_left[color.index()] += 1;
        if piece.is_king() {
            self.kings[color.index()] += 1;
        }
        self.zobrist_hash ^= ZobristKeys::get().piece_key(&piece);
        piece
    }

    fn clear_square(&mut self, piece: &Piece) {
        self.grid[usize::from(piece.row)][usize::from(piece.col)] = Square::Empty;
        self.pieces_left[piece.color.index()] -= 1;
        if piece.is_king() {
            self.kings[piece.color.index()] -= 1;
        }
        self.zobrist_hash ^= ZobristKeys::get().piece_key(piece);
    }

    #[must_use]
    pub const fn square(&self, at: Coordinate) -> Square {
        self.grid[at.row()][at.col()]
    }

    #[must_use]
    pub const fn get_piece(&self, at: Coordinate) -> Option<Piece> {
        self.square(at).piece()
    }

    /// All pieces of `color`, row by row from the top.
    pub fn pieces(&self, color: Color) -> Vec<Piece> {
        self.grid
            .iter()
            .flatten()
            .filter_map(|sq| sq.piece())
            .filter(|p| p.color == color)
            .collect()
    }

    pub fn all_pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.grid.iter().flatten().filter_map(|sq| sq.piece())
    }

    pub const fn piece_count(&self, color: Color) -> u8 {
        self.pieces_left[color.index()]
    }

    pub const fn king_count(&self, color: Color) -> u8 {
        self.kings[color.index()]
    }

    pub const fn total_pieces(&self) -> u8 {
        self.pieces_left[0] + self.pieces_left[1]
    }

    pub const fn zobrist_hash(&self) -> u64 {
        self.zobrist_hash
    }

    /// Hash rebuilt from scratch. Only used at setup and to verify the
    /// incrementally maintained key.
    pub fn calculate_hash(&self) -> u64 {
        let keys = ZobristKeys::get();
        self.all_pieces().fold(0, |hash, p| hash ^ keys.piece_key(&p))
    }

    /// True when the counters and the hash agree with the grid.
    pub fn is_consistent(&self) -> bool {
        let mut left = [0u8; 2];
        let mut kings = [0u8; 2];
        for piece in self.all_pieces() {
            left[piece.color.index()] += 1;
            if piece.is_king() {
                kings[piece.color.index()] += 1;
            }
        }
        left == self.pieces_left
            && kings == self.kings
            && self.zobrist_hash == self.calculate_hash()
    }

    /// Relocates `piece` to `to` and crowns it on the far row. No legality
    /// check beyond "the piece is where it claims and `to` is empty".
    /// Returns the piece as it stands after the move.
    pub fn move_piece(&mut self, piece: &Piece, to: Coordinate) -> Option<Piece> {
        let from = piece.coord();
        if self.get_piece(from) != Some(*piece) || self.get_piece(to).is_some() {
            return None;
        }
        let keys = ZobristKeys::get();

        self.grid[from.row()][from.col()] = Square::Empty;
        self.zobrist_hash ^= keys.piece_key(piece);

        let mut moved = Piece::new(piece.color, piece.rank, to);
        self.zobrist_hash ^= keys.piece_key(&moved);

        if !moved.is_king() && to.row == moved.color.promotion_row() {
            self.zobrist_hash ^= keys.piece_key(&moved);
            moved.rank = Rank::King;
            self.zobrist_hash ^= keys.piece_key(&moved);
            self.kings[moved.color.index()] += 1;
        }

        self.grid[to.row()][to.col()] = Square::Occupied(moved);
        Some(moved)
    }

    /// Moves `piece` to `to` if that is one of its legal destinations and
    /// returns the pieces jumped on the way. The captured pieces stay on the
    /// board until the caller passes them to [`Board::remove`].
    pub fn apply_move(&mut self, piece: &Piece, to: Coordinate) -> Option<Vec<Piece>> {
        let captured = self.valid_moves_for(piece).get(to)?.to_vec();
        self.move_piece(piece, to)?;
        Some(captured)
    }

    /// Takes captured pieces off the board. Squares no longer holding the
    /// given piece are left alone.
    pub fn remove(&mut self, pieces: &[Piece]) {
        for piece in pieces {
            if self.get_piece(piece.coord()) == Some(*piece) {
                self.clear_square(piece);
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.grid {
            for square in row {
                let c = match square.piece() {
                    None => '.',
                    Some(p) => match (p.color, p.rank) {
                        (Color::Light, Rank::Man) => 'w',
                        (Color::Light, Rank::King) => 'W',
                        (Color::Dark, Rank::Man) => 'b',
                        (Color::Dark, Rank::King) => 'B',
                    },
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
