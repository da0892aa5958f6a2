use crate::engine::config::{EngineConfig, PhaseWeights};
use crate::engine::Evaluator;
use crate::logic::board::{Board, Color, Piece};
use crate::logic::rules::{game_status, GameStatus};
use std::sync::Arc;

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Phase-aware static evaluation. Light positive, Dark negative.
pub struct PhaseEvaluator {
    config: Arc<EngineConfig>,
}

impl PhaseEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    pub fn terminal_score(&self, status: GameStatus) -> i32 {
        match status {
            GameStatus::WinLight => self.config.win_score,
            GameStatus::WinDark => -self.config.win_score,
            GameStatus::Draw | GameStatus::Ongoing => 0,
        }
    }

    /// Sum of the per-piece scores, Light minus Dark. Ignores whether the
    /// game is over.
    pub fn positional_score(&self, board: &Board) -> i32 {
        let phase = self.config.phase(board.total_pieces());
        let weights = self.config.weights(phase);

        let mut light_score = 0;
        let mut dark_score = 0;
        for piece in board.all_pieces() {
            let value = self.piece_score(board, &piece, weights);
            match piece.color {
                Color::Light => light_score += value,
                Color::Dark => dark_score += value,
            }
        }
        light_score - dark_score
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn piece_score(&self, board: &Board, piece: &Piece, w: &PhaseWeights) -> i32 {
        let mut value = if piece.is_king() { w.king } else { w.man };

        if (2..=5).contains(&piece.row) && (2..=5).contains(&piece.col) {
            value += w.center;
        }
        if piece.col == 0 || piece.col == 7 || piece.row == piece.color.back_row() {
            value += w.safe;
        }

        let moves = board.valid_moves_for(piece);
        value += w.mobility * moves.len() as i32;
        for (_, captured) in moves.iter() {
            if !captured.is_empty() {
                value += self.capture_bonus(captured, w);
            }
        }

        if is_protected(board, piece) {
            value += w.protected;
        }

        if !piece.is_king() {
            let advance = piece.advance();
            if advance == 6 {
                value += w.near_promotion;
            }
            if advance <= 1 {
                value += w.defender;
            } else if advance >= 4 {
                value += w.attacker;
            }
        }

        value
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn capture_bonus(&self, captured: &[Piece], w: &PhaseWeights) -> i32 {
        let kings = captured.iter().filter(|p| p.is_king()).count() as i32;
        w.capture * self.config.capture_scaling.factor(captured.len() as i32)
            + self.config.king_capture_bonus * kings
    }
}

impl Evaluator for PhaseEvaluator {
    fn evaluate(&self, board: &Board, turn: Color) -> i32 {
        let status = game_status(board, turn);
        if status.is_over() {
            return self.terminal_score(status);
        }
        self.positional_score(board)
    }
}

/// A friendly piece on any diagonal neighbour.
fn is_protected(board: &Board, piece: &Piece) -> bool {
    DIAGONALS.iter().any(|&(dr, dc)| {
        piece
            .coord()
            .offset(dr, dc)
            .and_then(|at| board.get_piece(at))
            .is_some_and(|n| n.color == piece.color)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::CaptureScaling;
    use crate::logic::board::{Coordinate, Rank};

    fn at(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col).unwrap()
    }

    fn evaluator() -> PhaseEvaluator {
        PhaseEvaluator::new(Arc::new(EngineConfig::default()))
    }

    #[test]
    fn test_start_position_is_balanced() {
        let board = Board::new();
        let eval = evaluator();
        assert_eq!(eval.evaluate(&board, Color::Dark), 0);
        assert_eq!(eval.evaluate(&board, Color::Light), 0);
    }

    #[test]
    fn test_terminal_scores() {
        let eval = evaluator();
        let mut board = Board::empty();
        board.add_piece(at(2, 1), Color::Light, Rank::Man);
        assert_eq!(eval.evaluate(&board, Color::Dark), 100_000);

        let mut board = Board::empty();
        board.add_piece(at(5, 2), Color::Dark, Rank::Man);
        assert_eq!(eval.evaluate(&board, Color::Light), -100_000);

        // Neither side can move.
        let mut board = Board::empty();
        for col in [0, 2, 4, 6] {
            board.add_piece(at(7, col), Color::Dark, Rank::Man);
            board.add_piece(at(6, col + 1), Color::Light, Rank::Man);
            board.add_piece(at(5, col), Color::Light, Rank::Man);
        }
        assert_eq!(eval.evaluate(&board, Color::Light), 0);
        assert_eq!(eval.evaluate(&board, Color::Dark), 0);
    }

    #[test]
    fn test_mirror_positions_cancel() {
        let eval = evaluator();
        let mut board = Board::empty();
        board.add_piece(at(2, 3), Color::Light, Rank::Man);
        board.add_piece(at(5, 4), Color::Dark, Rank::Man);
        board.add_piece(at(0, 7), Color::Light, Rank::King);
        board.add_piece(at(7, 0), Color::Dark, Rank::King);
        assert_eq!(eval.positional_score(&board), 0);
    }

    #[test]
    fn test_extra_king_favours_its_side() {
        let eval = evaluator();
        let mut board = Board::empty();
        board.add_piece(at(2, 3), Color::Light, Rank::Man);
        board.add_piece(at(5, 4), Color::Dark, Rank::Man);
        board.add_piece(at(4, 1), Color::Light, Rank::King);
        assert!(eval.evaluate(&board, Color::Dark) > 0);
    }

    #[test]
    fn test_capture_bonus_scaling() {
        let mut board = Board::empty();
        board.add_piece(at(5, 0), Color::Dark, Rank::Man);
        board.add_piece(at(4, 1), Color::Light, Rank::Man);
        board.add_piece(at(2, 3), Color::Light, Rank::King);

        let linear = evaluator();
        let quadratic = PhaseEvaluator::new(Arc::new(EngineConfig {
            capture_scaling: CaptureScaling::Quadratic,
            ..EngineConfig::default()
        }));
        // Only the two-piece jump differs: (4 - 2) * capture weight.
        let w = EngineConfig::default().endgame;
        assert_eq!(
            linear.positional_score(&board) - quadratic.positional_score(&board),
            2 * w.capture
        );
    }

    #[test]
    fn test_defender_and_attacker_exclusive() {
        let bumped = |defender: i32, attacker: i32| {
            let mut config = EngineConfig::default();
            config.endgame.defender += defender;
            config.endgame.attacker += attacker;
            PhaseEvaluator::new(Arc::new(config))
        };
        let base = evaluator();

        let mut home = Board::empty();
        home.add_piece(at(1, 0), Color::Light, Rank::Man);
        let mut advanced = Board::empty();
        advanced.add_piece(at(5, 2), Color::Light, Rank::Man);

        let home_score = base.positional_score(&home);
        assert_eq!(bumped(0, 1000).positional_score(&home), home_score);
        assert_eq!(bumped(1000, 0).positional_score(&home), home_score + 1000);

        let advanced_score = base.positional_score(&advanced);
        assert_eq!(bumped(1000, 0).positional_score(&advanced), advanced_score);
        assert_eq!(bumped(0, 1000).positional_score(&advanced), advanced_score + 1000);
    }

    #[test]
    fn test_evaluation_does_not_mutate() {
        let board = Board::new();
        let snapshot = board.clone();
        let _ = evaluator().evaluate(&board, Color::Dark);
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_protected() {
        let mut board = Board::empty();
        let a = board.add_piece(at(3, 2), Color::Light, Rank::Man);
        board.add_piece(at(2, 1), Color::Light, Rank::Man);
        let lonely = board.add_piece(at(6, 5), Color::Dark, Rank::Man);
        assert!(is_protected(&board, &a));
        assert!(!is_protected(&board, &lonely));
    }
}
