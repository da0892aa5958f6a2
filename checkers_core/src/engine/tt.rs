use crate::engine::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TTFlag {
    Exact,
    LowerBound, // Beta cutoff (fail-high)
    UpperBound, // Alpha cutoff (fail-low)
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: i32,
    pub flag: TTFlag,
    pub best_move: Option<Move>,
}

impl TTEntry {
    /// The stored score if it settles a node searched with `(alpha, beta)`.
    pub const fn usable_score(&self, alpha: i32, beta: i32) -> Option<i32> {
        match self.flag {
            TTFlag::Exact => Some(self.score),
            TTFlag::LowerBound if self.score >= beta => Some(self.score),
            TTFlag::UpperBound if self.score <= alpha => Some(self.score),
            TTFlag::LowerBound | TTFlag::UpperBound => None,
        }
    }
}

/// Fixed-size table keyed by (position key, remaining depth). A store always
/// overwrites its slot.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    mask: usize,
}

impl TranspositionTable {
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let num_entries = (size_mb * 1024 * 1024) / entry_size;

        // Power of 2 size for efficient masking
        let mut size = 1;
        while size <= num_entries {
            size *= 2;
        }
        size /= 2;

        if size < 1024 {
            size = 1024;
        }

        Self {
            entries: vec![None; size],
            mask: size - 1,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn index(&self, key: u64, depth: u8) -> usize {
        let mixed = key ^ u64::from(depth).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        (mixed as usize) & self.mask
    }

    pub fn probe(&self, key: u64, depth: u8) -> Option<TTEntry> {
        self.entries
            .get(self.index(key, depth))
            .copied()
            .flatten()
            .filter(|e| e.key == key && e.depth == depth)
    }

    pub fn get_move(&self, key: u64, depth: u8) -> Option<Move> {
        self.probe(key, depth).and_then(|e| e.best_move)
    }

    pub fn store(
        &mut self,
        key: u64,
        depth: u8,
        score: i32,
        flag: TTFlag,
        best_move: Option<Move>,
    ) {
        let idx = self.index(key, depth);
        if let Some(slot) = self.entries.get_mut(idx) {
            *slot = Some(TTEntry {
                key,
                depth,
                score,
                flag,
                best_move,
            });
        }
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }
}
