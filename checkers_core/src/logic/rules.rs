use crate::logic::board::{Board, Color, Piece};
use crate::logic::generator::MoveSet;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaptureMode {
    /// A capture anywhere on the board makes every non-capturing move illegal.
    #[default]
    Mandatory,
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    WinLight,
    WinDark,
    Draw,
}

impl GameStatus {
    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::Light => Self::WinLight,
            Color::Dark => Self::WinDark,
        }
    }

    pub const fn winner(self) -> Option<Color> {
        match self {
            Self::WinLight => Some(Color::Light),
            Self::WinDark => Some(Color::Dark),
            Self::Ongoing | Self::Draw => None,
        }
    }

    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    OutOfBounds,
    NoPieceAtSource,
    NotYourTurn,
    IllegalDestination,
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::OutOfBounds => "square is off the board",
            Self::NoPieceAtSource => "no piece on the source square",
            Self::NotYourTurn => "piece belongs to the side not on move",
            Self::IllegalDestination => "destination is not a legal move for this piece",
            Self::GameOver => "the game is already over",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for MoveError {}

/// Result of the game with `turn` to move. A side without pieces has lost;
/// a side that cannot move has lost unless its opponent is stuck as well,
/// which is a draw.
pub fn game_status(board: &Board, turn: Color) -> GameStatus {
    let light = board.piece_count(Color::Light);
    let dark = board.piece_count(Color::Dark);
    match (light, dark) {
        (0, 0) => return GameStatus::Draw,
        (_, 0) => return GameStatus::WinLight,
        (0, _) => return GameStatus::WinDark,
        _ => {}
    }

    if board.has_valid_moves(turn) {
        return GameStatus::Ongoing;
    }
    if board.has_valid_moves(turn.opposite()) {
        GameStatus::win_for(turn.opposite())
    } else {
        GameStatus::Draw
    }
}

/// Moves `piece` may make right now. Under mandatory capture a piece that
/// cannot capture gets nothing while some other piece can.
pub fn legal_moves(board: &Board, piece: &Piece, mode: CaptureMode) -> MoveSet {
    if mode == CaptureMode::Mandatory {
        if let Some(forced) = board.forced_moves_for(piece.color) {
            return forced
                .into_iter()
                .find(|(p, _)| p == piece)
                .map(|(_, moves)| moves)
                .unwrap_or_default();
        }
    }
    board.valid_moves_for(piece)
}
