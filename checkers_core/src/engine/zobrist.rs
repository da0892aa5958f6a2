use crate::logic::board::{Color, Piece, COLS, ROWS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::OnceLock;

// Light man, Light king, Dark man, Dark king
const NUM_KINDS: usize = 4;
const ZOBRIST_SEED: u64 = 0x5EED_C4EC_6E25_u64;

pub struct ZobristKeys {
    piece_keys: [[[u64; NUM_KINDS]; COLS]; ROWS],
    side_keys: [u64; 2],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_keys = [[[0; NUM_KINDS]; COLS]; ROWS];
        for row in &mut piece_keys {
            for square in row.iter_mut() {
                for key in square.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        let side_keys = [rng.gen(), rng.gen()];

        Self {
            piece_keys,
            side_keys,
        }
    }

    /// Process-wide table, built on first use and never changed afterwards.
    pub fn get() -> &'static Self {
        static INSTANCE: OnceLock<ZobristKeys> = OnceLock::new();
        INSTANCE.get_or_init(ZobristKeys::new)
    }

    pub fn piece_key(&self, piece: &Piece) -> u64 {
        self.piece_keys[usize::from(piece.row)][usize::from(piece.col)][piece.kind_index()]
    }

    /// Not part of the board hash; the search mixes it in so the same
    /// arrangement with a different side to move gets its own table slot.
    pub fn side_key(&self, color: Color) -> u64 {
        self.side_keys[color.index()]
    }
}
