use crate::engine::Move;
use crate::logic::board::{Board, Color, Coordinate, Piece};
use crate::logic::rules::CaptureMode;
use serde::{Deserialize, Serialize};

/// Diagonals in generation order: the two upward ones, then the two downward.
const DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Squares looked at along a ray: a step, or an enemy plus the landing square.
const RAY_REACH: usize = 2;

/// Destinations of one piece, each with the pieces jumped to get there.
/// Keeps insertion order so the search visits moves deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSet {
    entries: Vec<(Coordinate, Vec<Piece>)>,
}

impl MoveSet {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds a destination. When another path already reaches it, the one
    /// that captures more stays.
    fn insert(&mut self, to: Coordinate, captured: Vec<Piece>) {
        match self.entries.iter_mut().find(|(dest, _)| *dest == to) {
            Some((_, existing)) => {
                if captured.len() > existing.len() {
                    *existing = captured;
                }
            }
            None => self.entries.push((to, captured)),
        }
    }

    pub fn get(&self, to: Coordinate) -> Option<&[Piece]> {
        self.entries
            .iter()
            .find(|(dest, _)| *dest == to)
            .map(|(_, captured)| captured.as_slice())
    }

    pub fn contains(&self, to: Coordinate) -> bool {
        self.get(to).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinate, &[Piece])> + '_ {
        self.entries
            .iter()
            .map(|(dest, captured)| (*dest, captured.as_slice()))
    }

    pub fn destinations(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.entries.iter().map(|(dest, _)| *dest)
    }

    pub fn has_capture(&self) -> bool {
        self.entries.iter().any(|(_, captured)| !captured.is_empty())
    }

    #[must_use]
    pub fn captures_only(&self) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(_, captured)| !captured.is_empty())
                .cloned()
                .collect(),
        }
    }
}

/// A position reachable in one move, with the move that produced it.
#[derive(Debug, Clone)]
pub struct Successor {
    pub board: Board,
    pub mv: Move,
    pub captured: Vec<Piece>,
}

impl Board {
    /// Every destination of `piece`, ignoring the mandatory-capture rule.
    pub fn valid_moves_for(&self, piece: &Piece) -> MoveSet {
        let mut moves = MoveSet::new();
        for &(dr, dc) in &DIRECTIONS {
            if piece.is_king() || dr == piece.color.forward() {
                self.scan_ray(piece.color, piece.coord(), dr, dc, &[], &mut moves);
            }
        }
        moves
    }

    /// Walks one diagonal from `from`. A free square right away is a step; an
    /// enemy followed by a free square is a jump, after which the scan goes
    /// on from the landing square in the same vertical direction. Inside a
    /// chain (`captured` non-empty) only further jumps count.
    fn scan_ray(
        &self,
        color: Color,
        from: Coordinate,
        dr: i8,
        dc: i8,
        captured: &[Piece],
        moves: &mut MoveSet,
    ) {
        let mut jumped: Option<Piece> = None;
        let mut cursor = from;
        for _ in 0..RAY_REACH {
            let Some(next) = cursor.offset(dr, dc) else {
                break;
            };
            cursor = next;
            match self.get_piece(next) {
                None => {
                    if let Some(enemy) = jumped {
                        let mut path = captured.to_vec();
                        path.push(enemy);
                        moves.insert(next, path.clone());
                        for side in [-1, 1] {
                            self.scan_ray(color, next, dr, side, &path, moves);
                        }
                    } else if captured.is_empty() {
                        moves.insert(next, Vec::new());
                    }
                    break;
                }
                Some(other) if other.color == color => break,
                Some(enemy) => {
                    if jumped.is_some() {
                        break;
                    }
                    jumped = Some(enemy);
                }
            }
        }
    }

    /// Capturing moves of every `color` piece that has one, or `None` when
    /// nobody can capture and ordinary moves are allowed.
    pub fn forced_moves_for(&self, color: Color) -> Option<Vec<(Piece, MoveSet)>> {
        let forced: Vec<(Piece, MoveSet)> = self
            .pieces(color)
            .into_iter()
            .filter_map(|piece| {
                let captures = self.valid_moves_for(&piece).captures_only();
                (!captures.is_empty()).then_some((piece, captures))
            })
            .collect();
        (!forced.is_empty()).then_some(forced)
    }

    pub fn has_valid_moves(&self, color: Color) -> bool {
        self.pieces(color)
            .iter()
            .any(|piece| !self.valid_moves_for(piece).is_empty())
    }

    /// Per-piece moves available to `turn` under `mode`, pieces without a
    /// move left out.
    pub fn moves_for_turn(&self, turn: Color, mode: CaptureMode) -> Vec<(Piece, MoveSet)> {
        if mode == CaptureMode::Mandatory {
            if let Some(forced) = self.forced_moves_for(turn) {
                return forced;
            }
        }
        self.pieces(turn)
            .into_iter()
            .map(|piece| {
                let moves = self.valid_moves_for(&piece);
                (piece, moves)
            })
            .filter(|(_, moves)| !moves.is_empty())
            .collect()
    }

    /// One board copy per legal move, in generation order.
    pub fn successors(&self, turn: Color, mode: CaptureMode) -> Vec<Successor> {
        let mut successors = Vec::new();
        for (piece, moves) in self.moves_for_turn(turn, mode) {
            for (to, captured) in moves.iter() {
                let mut board = self.clone();
                if board.move_piece(&piece, to).is_none() {
                    continue;
                }
                board.remove(captured);
                successors.push(Successor {
                    board,
                    mv: Move {
                        from: piece.coord(),
                        to,
                    },
                    captured: captured.to_vec(),
                });
            }
        }
        successors
    }
}
