use crate::engine::{Move, SearchOutcome};
use crate::logic::board::{Board, Color, Coordinate, Piece};
use crate::logic::generator::MoveSet;
use crate::logic::rules::{game_status, legal_moves, CaptureMode, GameStatus, MoveError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Vec<Piece>,
    pub color: Color,
    pub promoted: bool,
    pub hash: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub mode: CaptureMode,
    pub status: GameStatus,
    pub selected: Option<Coordinate>,
    /// Legal destinations of the selected piece.
    pub valid_moves: MoveSet,
    pub last_move: Option<Move>,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(CaptureMode::default())
    }
}

impl GameState {
    /// Standard start position, Dark to move.
    #[must_use]
    pub fn new(mode: CaptureMode) -> Self {
        Self::from_board(Board::new(), Color::Dark, mode)
    }

    #[must_use]
    pub fn from_board(board: Board, turn: Color, mode: CaptureMode) -> Self {
        let status = game_status(&board, turn);
        Self {
            board,
            turn,
            mode,
            status,
            selected: None,
            valid_moves: MoveSet::new(),
            last_move: None,
            history: Vec::new(),
        }
    }

    pub fn legal_moves_for(&self, at: Coordinate) -> MoveSet {
        match self.board.get_piece(at) {
            Some(piece) if piece.color == self.turn => legal_moves(&self.board, &piece, self.mode),
            _ => MoveSet::new(),
        }
    }

    /// Click handling. A friendly piece becomes the selection; a legal
    /// destination of the current selection plays the move. Anything else
    /// clears the selection and returns `false`.
    pub fn select(&mut self, row: usize, col: usize) -> bool {
        let Some(at) = Coordinate::new(row, col) else {
            self.deselect();
            return false;
        };
        if self.status.is_over() {
            return false;
        }

        if let Some(from) = self.selected {
            if self.valid_moves.contains(at) {
                return self.make_move(from, at).is_ok();
            }
        }

        match self.board.get_piece(at) {
            Some(piece) if piece.color == self.turn => {
                self.selected = Some(at);
                self.valid_moves = legal_moves(&self.board, &piece, self.mode);
                true
            }
            _ => {
                self.deselect();
                false
            }
        }
    }

    fn deselect(&mut self) {
        self.selected = None;
        self.valid_moves = MoveSet::new();
    }

    /// Plays `from -> to` for the side to move and returns the captured
    /// pieces.
    pub fn make_move(&mut self, from: Coordinate, to: Coordinate) -> Result<Vec<Piece>, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        let piece = self
            .board
            .get_piece(from)
            .ok_or(MoveError::NoPieceAtSource)?;
        if piece.color != self.turn {
            return Err(MoveError::NotYourTurn);
        }

        let captured = legal_moves(&self.board, &piece, self.mode)
            .get(to)
            .map(<[Piece]>::to_vec)
            .ok_or_else(|| {
                log::debug!("rejected {:?} move {} -> {}", self.turn, from, to);
                MoveError::IllegalDestination
            })?;

        let moved = self
            .board
            .move_piece(&piece, to)
            .ok_or(MoveError::IllegalDestination)?;
        self.board.remove(&captured);

        self.record(Move { from, to }, piece, moved, captured.clone());
        Ok(captured)
    }

    /// Adopts a position produced by the search for the side to move. The
    /// outcome must be one of the current successors; a reply computed for
    /// another position is rejected.
    pub fn apply_engine_move(&mut self, outcome: &SearchOutcome) -> Result<(), MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        let piece = self
            .board
            .get_piece(outcome.mv.from)
            .ok_or(MoveError::NoPieceAtSource)?;
        if piece.color != self.turn {
            return Err(MoveError::NotYourTurn);
        }
        let successor = self
            .board
            .successors(self.turn, self.mode)
            .into_iter()
            .find(|s| s.mv == outcome.mv && s.board == outcome.board)
            .ok_or_else(|| {
                log::debug!(
                    "rejected engine move {} -> {}",
                    outcome.mv.from,
                    outcome.mv.to
                );
                MoveError::IllegalDestination
            })?;
        let moved = successor
            .board
            .get_piece(outcome.mv.to)
            .ok_or(MoveError::IllegalDestination)?;

        self.board = successor.board;
        self.record(outcome.mv, piece, moved, successor.captured);
        Ok(())
    }

    fn record(&mut self, mv: Move, piece: Piece, moved: Piece, captured: Vec<Piece>) {
        self.history.push(MoveRecord {
            mv,
            piece,
            captured,
            color: self.turn,
            promoted: moved.rank != piece.rank,
            hash: self.board.zobrist_hash(),
        });
        self.last_move = Some(mv);
        self.deselect();
        self.turn = self.turn.opposite();
        self.update_status();
    }

    fn update_status(&mut self) {
        self.status = game_status(&self.board, self.turn);
        if self.status.is_over() {
            log::info!(
                "game over after {} moves: {:?}",
                self.history.len(),
                self.status
            );
        }
    }

    /// Winning side, if the game has been decided.
    pub const fn winner(&self) -> Option<Color> {
        self.status.winner()
    }
}
