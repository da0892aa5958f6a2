#[cfg(test)]
mod tests {
    use checkers_core::logic::board::{Board, Color, Coordinate, Rank};
    use checkers_core::logic::game::GameState;
    use checkers_core::logic::rules::{game_status, legal_moves, CaptureMode, GameStatus};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn at(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col).unwrap()
    }

    #[test]
    fn test_hash_stays_consistent_over_random_games() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        for _ in 0..20 {
            let mode = if rng.gen_bool(0.5) {
                CaptureMode::Mandatory
            } else {
                CaptureMode::Free
            };
            let mut board = Board::new();
            let mut turn = Color::Dark;
            for _ in 0..120 {
                let moves = board.moves_for_turn(turn, mode);
                if moves.is_empty() {
                    break;
                }
                let (piece, set) = &moves[rng.gen_range(0..moves.len())];
                let to = set.destinations().nth(rng.gen_range(0..set.len())).unwrap();

                let captured = board.apply_move(piece, to).unwrap();
                board.remove(&captured);
                assert!(board.is_consistent(), "inconsistent after {piece:?} -> {to}");
                assert_eq!(board.zobrist_hash(), board.calculate_hash());
                turn = turn.opposite();
            }
        }
    }

    #[test]
    fn test_same_position_same_hash() {
        // Two move orders reaching one position.
        let mut a = Board::new();
        let p = a.get_piece(at(5, 0)).unwrap();
        a.apply_move(&p, at(4, 1)).unwrap();
        let p = a.get_piece(at(5, 6)).unwrap();
        a.apply_move(&p, at(4, 7)).unwrap();

        let mut b = Board::new();
        let p = b.get_piece(at(5, 6)).unwrap();
        b.apply_move(&p, at(4, 7)).unwrap();
        let p = b.get_piece(at(5, 0)).unwrap();
        b.apply_move(&p, at(4, 1)).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.zobrist_hash(), b.zobrist_hash());
        assert_ne!(a.zobrist_hash(), Board::new().zobrist_hash());
    }

    #[test]
    fn test_opening_move_scenario() {
        let mut game = GameState::new(CaptureMode::Mandatory);
        let piece = game.board.get_piece(at(5, 0)).unwrap();
        let moves = legal_moves(&game.board, &piece, game.mode);
        assert_eq!(moves.get(at(4, 1)), Some(&[][..]));

        let captured = game.make_move(at(5, 0), at(4, 1)).unwrap();
        assert!(captured.is_empty());
        assert_eq!(game.board.piece_count(Color::Light), 12);
        assert_eq!(game.board.piece_count(Color::Dark), 12);
        assert_eq!(game.turn, Color::Light);
    }

    #[test]
    fn test_capture_scenario() {
        let mut board = Board::empty();
        let dark = board.add_piece(at(3, 2), Color::Dark, Rank::Man);
        board.add_piece(at(2, 3), Color::Light, Rank::Man);
        board.add_piece(at(0, 5), Color::Light, Rank::Man);

        let captured = board.apply_move(&dark, at(1, 4)).unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].coord(), at(2, 3));
        board.remove(&captured);

        assert_eq!(board.piece_count(Color::Light), 1);
        let moved = board.get_piece(at(1, 4)).unwrap();
        assert_eq!(moved.color, Color::Dark);
        assert_eq!(moved.rank, Rank::Man);
        assert!(board.get_piece(at(3, 2)).is_none());
        assert!(board.get_piece(at(2, 3)).is_none());
    }

    #[test]
    fn test_illegal_apply_leaves_board() {
        let mut board = Board::new();
        let snapshot = board.clone();
        let piece = board.get_piece(at(5, 0)).unwrap();
        assert!(board.apply_move(&piece, at(3, 2)).is_none());
        assert!(board.apply_move(&piece, at(6, 1)).is_none());
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_terminal_detection() {
        let mut board = Board::empty();
        board.add_piece(at(5, 2), Color::Dark, Rank::Man);
        assert_eq!(game_status(&board, Color::Light), GameStatus::WinDark);

        // The only Dark man is boxed in on its back row.
        let mut board = Board::empty();
        board.add_piece(at(7, 0), Color::Dark, Rank::Man);
        board.add_piece(at(6, 1), Color::Light, Rank::Man);
        board.add_piece(at(5, 2), Color::Light, Rank::Man);
        assert_eq!(game_status(&board, Color::Dark), GameStatus::WinLight);
        assert_eq!(game_status(&board, Color::Light), GameStatus::Ongoing);
    }
}
