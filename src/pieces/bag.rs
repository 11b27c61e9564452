//! The canonical tile set and the shared draw bag.
//!
//! The game ships exactly 36 road tiles. Their numbers, road stubs, and
//! coins are fixed; only the draw order is random. A game shuffles the bag
//! once at creation and deals every participant's personal queue from that
//! single shuffle.

use crate::core::GameRng;
use crate::pieces::Piece;

/// Number of tiles in the canonical set.
pub const TILE_COUNT: usize = 36;

const fn tile(number: u8, lines: u32) -> Piece {
    Piece::from_bits(((number as u32) << 6) | lines)
}

/// The canonical tile set, in table order. The low six bits of each entry
/// are the road stubs (up, down, left, right) and coins (silver, gold).
pub const TILE_SET: [Piece; TILE_COUNT] = [
    tile(1, 0b001100),
    tile(7, 0b001100),
    tile(13, 0b011110),
    tile(19, 0b011010),
    tile(25, 0b011100),
    tile(31, 0b011100),
    tile(2, 0b111100),
    tile(8, 0b111100),
    tile(14, 0b100110),
    tile(20, 0b101010),
    tile(26, 0b101110),
    tile(32, 0b101100),
    tile(3, 0b001110),
    tile(9, 0b001101),
    tile(15, 0b001110),
    tile(21, 0b001101),
    tile(27, 0b110000),
    tile(33, 0b110000),
    tile(4, 0b001100),
    tile(10, 0b001100),
    tile(16, 0b010000),
    tile(22, 0b001000),
    tile(28, 0b110100),
    tile(34, 0b111000),
    tile(5, 0b111100),
    tile(11, 0b111100),
    tile(17, 0b100110),
    tile(23, 0b101000),
    tile(29, 0b110100),
    tile(35, 0b111000),
    tile(6, 0b110010),
    tile(12, 0b110001),
    tile(18, 0b110010),
    tile(24, 0b110001),
    tile(30, 0b110000),
    tile(36, 0b110000),
];

/// A freshly shuffled copy of the canonical tile set.
///
/// Every call reshuffles. Callers that need one shared bag (the game state
/// machine does) must shuffle once and keep the result, not call this
/// repeatedly.
#[must_use]
pub fn draw_bag(rng: &mut GameRng) -> Vec<Piece> {
    let mut bag = TILE_SET.to_vec();
    rng.shuffle(&mut bag);
    bag
}
