// Default evaluation weights, one set per game phase.
// Phase is picked by the total number of pieces left on the board.

pub const OPENING_MIN_PIECES: u8 = 17;
pub const MIDGAME_MIN_PIECES: u8 = 10;

pub const WIN_SCORE: i32 = 100_000;
pub const KING_CAPTURE_BONUS: i32 = 10;

// Material
pub const VAL_MAN: i32 = 20;
pub const VAL_KING_OPENING: i32 = 70;
pub const VAL_KING_MIDGAME: i32 = 75;
pub const VAL_KING_ENDGAME: i32 = 85;

// Centre squares: rows 2..=5, cols 2..=5
pub const BONUS_CENTER_OPENING: i32 = 40;
pub const BONUS_CENTER_MIDGAME: i32 = 30;
pub const BONUS_CENTER_ENDGAME: i32 = 20;

// Per legal destination
pub const WEIGHT_MOBILITY_OPENING: i32 = 6;
pub const WEIGHT_MOBILITY_MIDGAME: i32 = 8;
pub const WEIGHT_MOBILITY_ENDGAME: i32 = 10;

// Diagonal neighbour of the same colour
pub const BONUS_PROTECTED_OPENING: i32 = 10;
pub const BONUS_PROTECTED_MIDGAME: i32 = 14;
pub const BONUS_PROTECTED_ENDGAME: i32 = 20;

// Per captured piece on an available jump
pub const BONUS_CAPTURE_OPENING: i32 = 16;
pub const BONUS_CAPTURE_MIDGAME: i32 = 20;
pub const BONUS_CAPTURE_ENDGAME: i32 = 24;

// Side edge or own back row
pub const BONUS_SAFE_OPENING: i32 = 4;
pub const BONUS_SAFE_MIDGAME: i32 = 6;
pub const BONUS_SAFE_ENDGAME: i32 = 4;

// Man one step from the crown
pub const BONUS_NEAR_PROMOTION_OPENING: i32 = 8;
pub const BONUS_NEAR_PROMOTION_MIDGAME: i32 = 12;
pub const BONUS_NEAR_PROMOTION_ENDGAME: i32 = 18;

// Man still on its two home rows
pub const BONUS_DEFENDER_OPENING: i32 = 6;
pub const BONUS_DEFENDER_MIDGAME: i32 = 4;
pub const BONUS_DEFENDER_ENDGAME: i32 = 2;

// Man in the opponent's half
pub const BONUS_ATTACKER_OPENING: i32 = 4;
pub const BONUS_ATTACKER_MIDGAME: i32 = 8;
pub const BONUS_ATTACKER_ENDGAME: i32 = 12;
