//! Checkers engine core: board model, move generation and a time-bounded
//! alpha-beta search for the computer player.

pub mod engine;
pub mod logic;
