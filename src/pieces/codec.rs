//! The packed piece value and its codec.
//!
//! Every piece in the game is an 18-bit non-negative integer. Keeping the
//! packed encoding (rather than a field-per-member struct) keeps saved games
//! byte-compatible: `Piece` serializes transparently as that integer.
//!
//! ## Bit layout
//!
//! | Bits  | Field                                                 |
//! |-------|-------------------------------------------------------|
//! | 17-15 | house color, 0 = none, 1-4 = color index              |
//! | 14-12 | person color, 0 = none, 1-4 = color index             |
//! | 11-6  | piece number (see sentinels below)                    |
//! | 5     | road stub on the upper edge                           |
//! | 4     | road stub on the lower edge                           |
//! | 3     | road stub on the left edge                            |
//! | 2     | road stub on the right edge                           |
//! | 1     | silver coin                                           |
//! | 0     | gold coin                                             |
//!
//! Piece numbers 1-36 are the drawable road tiles. Four numbers are
//! reserved as sentinels: 60 is the plain green-grass tile, 61 signals
//! failure, 62 success, and 63 end of turn. Sentinels are number-only
//! values with every other field zero and must be produced through their
//! dedicated constructors, never synthesized by field arithmetic, so that
//! equality against a constructed sentinel is always reliable.

use serde::{Deserialize, Serialize};

const GOLD: u32 = 1;
const SILVER: u32 = 1 << 1;
const ROAD_RIGHT: u32 = 1 << 2;
const ROAD_LEFT: u32 = 1 << 3;
const ROAD_DOWN: u32 = 1 << 4;
const ROAD_UP: u32 = 1 << 5;
const ROADS: u32 = ROAD_UP | ROAD_DOWN | ROAD_LEFT | ROAD_RIGHT;
const COINS: u32 = SILVER | GOLD;

const NUMBER_SHIFT: u32 = 6;
const NUMBER_MASK: u32 = 0x3F << NUMBER_SHIFT;
const PERSON_SHIFT: u32 = 12;
const PERSON_MASK: u32 = 0x7 << PERSON_SHIFT;
const HOUSE_SHIFT: u32 = 15;
const HOUSE_MASK: u32 = 0x7 << HOUSE_SHIFT;

const ALL_BITS: u32 = (1 << 18) - 1;

const GREEN_GRASS_NUMBER: u8 = 60;
const FAILURE_NUMBER: u8 = 61;
const SUCCESS_NUMBER: u8 = 62;
const END_OF_TURN_NUMBER: u8 = 63;

/// Number of person/house color pairs in the game.
pub const COLOR_COUNT: u8 = 4;

/// One game piece, packed into 18 bits.
///
/// ```
/// use trailhome::Piece;
///
/// let tile = Piece::tile(5).with_roads(true, true, false, false);
/// assert_eq!(tile.number(), 5);
/// assert!(tile.road_up() && tile.road_down());
/// assert_eq!(tile.number_of_moves(), 2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Piece(u32);

/// Every field of a piece, unpacked. The rendering layer works from this
/// form; `Piece::encode` and `Piece::decode` convert at the boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PieceFields {
    pub road_up: bool,
    pub road_down: bool,
    pub road_left: bool,
    pub road_right: bool,
    pub has_silver_coin: bool,
    pub has_gold_coin: bool,
    pub number: u8,
    pub person_color: u8,
    pub house_color: u8,
}

impl Piece {
    /// Pack every field into a piece.
    #[must_use]
    pub const fn encode(fields: PieceFields) -> Self {
        Self::tile(fields.number)
            .with_roads(
                fields.road_up,
                fields.road_down,
                fields.road_left,
                fields.road_right,
            )
            .with_coins(fields.has_silver_coin, fields.has_gold_coin)
            .with_person_color(fields.person_color)
            .with_house_color(fields.house_color)
    }

    /// Unpack every field of this piece.
    #[must_use]
    pub const fn decode(self) -> PieceFields {
        PieceFields {
            road_up: self.road_up(),
            road_down: self.road_down(),
            road_left: self.road_left(),
            road_right: self.road_right(),
            has_silver_coin: self.has_silver_coin(),
            has_gold_coin: self.has_gold_coin(),
            number: self.number(),
            person_color: self.person_color(),
            house_color: self.house_color(),
        }
    }
    /// Reconstruct a piece from its raw 18-bit encoding. Bits above the
    /// eighteenth are discarded.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & ALL_BITS)
    }

    /// The raw 18-bit encoding. Stable across saved games.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    // === Constructors ===

    /// The blank piece: an empty board square.
    #[must_use]
    pub const fn blank() -> Self {
        Self(0)
    }

    /// A bare tile with the given piece number and no other fields.
    #[must_use]
    pub const fn tile(number: u8) -> Self {
        Self(((number as u32) & 0x3F) << NUMBER_SHIFT)
    }

    /// A pure person piece of the given color.
    #[must_use]
    pub const fn person(color: u8) -> Self {
        Self(((color as u32) & 0x7) << PERSON_SHIFT)
    }

    /// A pure house piece of the given color.
    #[must_use]
    pub const fn house(color: u8) -> Self {
        Self(((color as u32) & 0x7) << HOUSE_SHIFT)
    }

    /// The plain green-grass tile that fills the board perimeter.
    #[must_use]
    pub const fn green_grass() -> Self {
        Self::tile(GREEN_GRASS_NUMBER)
    }

    /// The failure sentinel.
    #[must_use]
    pub const fn failure() -> Self {
        Self::tile(FAILURE_NUMBER)
    }

    /// The success sentinel.
    #[must_use]
    pub const fn success() -> Self {
        Self::tile(SUCCESS_NUMBER)
    }

    /// The end-of-turn sentinel.
    #[must_use]
    pub const fn end_of_turn() -> Self {
        Self::tile(END_OF_TURN_NUMBER)
    }

    // === Field extractors ===

    /// Road stub on the upper edge.
    #[must_use]
    pub const fn road_up(self) -> bool {
        self.0 & ROAD_UP != 0
    }

    /// Road stub on the lower edge.
    #[must_use]
    pub const fn road_down(self) -> bool {
        self.0 & ROAD_DOWN != 0
    }

    /// Road stub on the left edge.
    #[must_use]
    pub const fn road_left(self) -> bool {
        self.0 & ROAD_LEFT != 0
    }

    /// Road stub on the right edge.
    #[must_use]
    pub const fn road_right(self) -> bool {
        self.0 & ROAD_RIGHT != 0
    }

    /// Whether the piece carries a silver coin.
    #[must_use]
    pub const fn has_silver_coin(self) -> bool {
        self.0 & SILVER != 0
    }

    /// Whether the piece carries a gold coin.
    #[must_use]
    pub const fn has_gold_coin(self) -> bool {
        self.0 & GOLD != 0
    }

    /// The piece number, 0-63.
    #[must_use]
    pub const fn number(self) -> u8 {
        ((self.0 & NUMBER_MASK) >> NUMBER_SHIFT) as u8
    }

    /// The person color, 0 = no person.
    #[must_use]
    pub const fn person_color(self) -> u8 {
        ((self.0 & PERSON_MASK) >> PERSON_SHIFT) as u8
    }

    /// The house color, 0 = no house.
    #[must_use]
    pub const fn house_color(self) -> u8 {
        ((self.0 & HOUSE_MASK) >> HOUSE_SHIFT) as u8
    }

    /// Number of road stubs on the piece, 0-4. When a tile is played onto a
    /// square occupied by a person, this is the person's movement budget.
    #[must_use]
    pub const fn number_of_moves(self) -> u32 {
        (self.0 & ROADS).count_ones()
    }

    // === Classification ===

    /// True for the all-zero blank piece.
    #[must_use]
    pub const fn is_blank(self) -> bool {
        self.0 == 0
    }

    /// True iff only the person color is non-zero.
    #[must_use]
    pub const fn is_person(self) -> bool {
        self.0 & !PERSON_MASK == 0 && self.person_color() != 0
    }

    /// True iff only the house color is non-zero.
    #[must_use]
    pub const fn is_house(self) -> bool {
        self.0 & !HOUSE_MASK == 0 && self.house_color() != 0
    }

    /// True iff only the person and house colors are non-zero.
    #[must_use]
    pub const fn is_person_and_house(self) -> bool {
        self.0 & !(PERSON_MASK | HOUSE_MASK) == 0
            && self.person_color() != 0
            && self.house_color() != 0
    }

    /// True for every piece that is not blank and not a pure person, house,
    /// or person-and-house. A tile may itself carry a person or house
    /// riding on it.
    #[must_use]
    pub const fn is_tile(self) -> bool {
        !self.is_blank() && !self.is_person() && !self.is_house() && !self.is_person_and_house()
    }

    /// True for the plain green-grass tile with no riders, roads, or coins.
    #[must_use]
    pub fn is_green_grass(self) -> bool {
        self == Self::green_grass()
    }

    /// True for the failure sentinel.
    #[must_use]
    pub fn is_failure(self) -> bool {
        self == Self::failure()
    }

    /// True for the success sentinel.
    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::success()
    }

    /// True for the end-of-turn sentinel.
    #[must_use]
    pub fn is_end_of_turn(self) -> bool {
        self == Self::end_of_turn()
    }

    // === Mutators (return a new value) ===

    /// Add road stubs. Existing stubs are kept.
    #[must_use]
    pub const fn with_roads(self, up: bool, down: bool, left: bool, right: bool) -> Self {
        let mut bits = self.0;
        if up {
            bits |= ROAD_UP;
        }
        if down {
            bits |= ROAD_DOWN;
        }
        if left {
            bits |= ROAD_LEFT;
        }
        if right {
            bits |= ROAD_RIGHT;
        }
        Self(bits)
    }

    /// Add coins. Existing coins are kept.
    #[must_use]
    pub const fn with_coins(self, silver: bool, gold: bool) -> Self {
        let mut bits = self.0;
        if silver {
            bits |= SILVER;
        }
        if gold {
            bits |= GOLD;
        }
        Self(bits)
    }

    /// Strip both coins, leaving roads and riders untouched.
    #[must_use]
    pub const fn without_coins(self) -> Self {
        Self(self.0 & !COINS)
    }

    /// Overwrite the person color (0 removes the person) without disturbing
    /// the road, coin, number, or house fields.
    #[must_use]
    pub const fn with_person_color(self, color: u8) -> Self {
        Self((self.0 & !PERSON_MASK) | (((color as u32) & 0x7) << PERSON_SHIFT))
    }

    /// Overwrite the house color (0 removes the house) without disturbing
    /// the road, coin, number, or person fields.
    #[must_use]
    pub const fn with_house_color(self, color: u8) -> Self {
        Self((self.0 & !HOUSE_MASK) | (((color as u32) & 0x7) << HOUSE_SHIFT))
    }

    /// The pure person piece riding on this one, or the failure sentinel if
    /// no person is present.
    #[must_use]
    pub const fn person_piece(self) -> Self {
        if self.person_color() == 0 {
            Self::failure()
        } else {
            Self::person(self.person_color())
        }
    }

    /// The pure house piece riding on this one, or the failure sentinel if
    /// no house is present.
    #[must_use]
    pub const fn house_piece(self) -> Self {
        if self.house_color() == 0 {
            Self::failure()
        } else {
            Self::house(self.house_color())
        }
    }
}

impl std::fmt::Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Piece(#{} person={} house={} roads={}{}{}{} coins={}{})",
            self.number(),
            self.person_color(),
            self.house_color(),
            if self.road_up() { 'U' } else { '-' },
            if self.road_down() { 'D' } else { '-' },
            if self.road_left() { 'L' } else { '-' },
            if self.road_right() { 'R' } else { '-' },
            if self.has_silver_coin() { 'S' } else { '-' },
            if self.has_gold_coin() { 'G' } else { '-' },
        )
    }
}

/// Merge a pure person or house piece with a tile, in either order.
///
/// Returns the tile with the rider's field set, or the failure sentinel if
/// the operands are not a pure person/house plus a tile.
///
/// ```
/// use trailhome::{combine, Piece};
///
/// let grass = Piece::green_grass();
/// let person = Piece::person(2);
/// assert_eq!(combine(person, grass), grass.with_person_color(2));
/// assert_eq!(combine(grass, person), combine(person, grass));
/// assert!(combine(person, Piece::person(3)).is_failure());
/// ```
#[must_use]
pub fn combine(a: Piece, b: Piece) -> Piece {
    let (rider, tile) = if a.is_tile() { (b, a) } else { (a, b) };
    if rider.is_person() && tile.is_tile() {
        return tile.with_person_color(rider.person_color());
    }
    if rider.is_house() && tile.is_tile() {
        return tile.with_house_color(rider.house_color());
    }
    Piece::failure()
}

/// Whether a person may step between two squares.
///
/// The squares must be adjacent along exactly one axis (no diagonals, no
/// staying put) and the shared edge must have a road stub open on both
/// sides: stepping downward needs `a`'s down stub and `b`'s up stub, and so
/// on. `y` grows downward.
#[must_use]
pub fn pieces_connect(a: Piece, b: Piece, ax: i32, ay: i32, bx: i32, by: i32) -> bool {
    if (ax - bx).abs() > 1 || (ay - by).abs() > 1 {
        return false;
    }
    if ax == bx && ay == by {
        return false;
    }
    if ax == bx && ay < by && a.road_down() && b.road_up() {
        return true;
    }
    if ax == bx && ay > by && a.road_up() && b.road_down() {
        return true;
    }
    if ay == by && ax < bx && a.road_right() && b.road_left() {
        return true;
    }
    if ay == by && ax > bx && a.road_left() && b.road_right() {
        return true;
    }
    // Diagonals and mismatched stubs: not connected.
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_round_trip() {
        let piece = Piece::tile(36)
            .with_roads(true, false, true, false)
            .with_coins(false, true)
            .with_person_color(3)
            .with_house_color(4);

        assert_eq!(piece.number(), 36);
        assert_eq!(piece.person_color(), 3);
        assert_eq!(piece.house_color(), 4);
        assert!(piece.road_up());
        assert!(!piece.road_down());
        assert!(piece.road_left());
        assert!(!piece.road_right());
        assert!(!piece.has_silver_coin());
        assert!(piece.has_gold_coin());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let fields = PieceFields {
            road_up: true,
            road_right: true,
            has_gold_coin: true,
            number: 23,
            person_color: 1,
            house_color: 4,
            ..PieceFields::default()
        };
        assert_eq!(Piece::encode(fields).decode(), fields);
        assert_eq!(Piece::decode(Piece::blank()), PieceFields::default());
    }

    #[test]
    fn test_bits_round_trip() {
        let piece = Piece::tile(17).with_roads(true, true, false, true);
        assert_eq!(Piece::from_bits(piece.bits()), piece);
    }

    #[test]
    fn test_from_bits_masks_high_bits() {
        assert_eq!(Piece::from_bits(1 << 20), Piece::blank());
    }

    #[test]
    fn test_sentinels_are_distinct() {
        let sentinels = [
            Piece::blank(),
            Piece::green_grass(),
            Piece::failure(),
            Piece::success(),
            Piece::end_of_turn(),
        ];
        for (i, a) in sentinels.iter().enumerate() {
            for b in &sentinels[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_sentinel_predicates() {
        assert!(Piece::green_grass().is_green_grass());
        assert!(Piece::failure().is_failure());
        assert!(Piece::success().is_success());
        assert!(Piece::end_of_turn().is_end_of_turn());
        assert!(Piece::blank().is_blank());

        // A green-grass square with a rider is no longer plain green grass.
        assert!(!Piece::green_grass().with_house_color(1).is_green_grass());
    }

    #[test]
    fn test_classification() {
        assert!(Piece::person(1).is_person());
        assert!(Piece::house(2).is_house());
        assert!(!Piece::person(1).is_house());
        assert!(!Piece::person(1).is_tile());

        let pair = Piece::person(1).with_house_color(1);
        assert!(pair.is_person_and_house());
        assert!(!pair.is_person());
        assert!(!pair.is_tile());

        // Blank is none of person/house/tile.
        assert!(!Piece::blank().is_person());
        assert!(!Piece::blank().is_house());
        assert!(!Piece::blank().is_person_and_house());

        // Sentinels and grass are tiles; so is a tile with a rider.
        assert!(Piece::green_grass().is_tile());
        assert!(Piece::failure().is_tile());
        assert!(Piece::tile(7).with_person_color(2).is_tile());
    }

    #[test]
    fn test_number_of_moves() {
        for bits in 0u32..16 {
            let piece = Piece::from_bits(bits << 2);
            assert_eq!(piece.number_of_moves(), bits.count_ones());
        }
    }

    #[test]
    fn test_without_coins() {
        let piece = Piece::tile(9)
            .with_roads(true, false, false, false)
            .with_coins(true, true);
        let bare = piece.without_coins();
        assert!(!bare.has_silver_coin());
        assert!(!bare.has_gold_coin());
        assert_eq!(bare.number(), 9);
        assert!(bare.road_up());
    }

    #[test]
    fn test_with_person_color_overwrites() {
        let piece = Piece::tile(12).with_person_color(2);
        assert_eq!(piece.with_person_color(4).person_color(), 4);
        assert_eq!(piece.with_person_color(0).person_color(), 0);
        assert_eq!(piece.with_person_color(0).number(), 12);
    }

    #[test]
    fn test_rider_extraction() {
        let piece = Piece::tile(20).with_person_color(3).with_house_color(1);
        assert_eq!(piece.person_piece(), Piece::person(3));
        assert_eq!(piece.house_piece(), Piece::house(1));
        assert!(Piece::tile(20).person_piece().is_failure());
        assert!(Piece::tile(20).house_piece().is_failure());
    }

    #[test]
    fn test_combine_person_with_grass() {
        let combined = combine(Piece::person(2), Piece::green_grass());
        assert_eq!(combined.person_color(), 2);
        assert_eq!(combined.number(), Piece::green_grass().number());
    }

    #[test]
    fn test_combine_house_with_tile() {
        let tile = Piece::tile(14).with_roads(true, false, false, true);
        let combined = combine(tile, Piece::house(4));
        assert_eq!(combined.house_color(), 4);
        assert!(combined.road_up() && combined.road_right());
    }

    #[test]
    fn test_combine_failures() {
        assert!(combine(Piece::person(1), Piece::person(2)).is_failure());
        assert!(combine(Piece::house(1), Piece::house(2)).is_failure());
        assert!(combine(Piece::tile(1), Piece::tile(2)).is_failure());
        assert!(combine(Piece::blank(), Piece::tile(1)).is_failure());
    }

    #[test]
    fn test_connect_requires_both_stubs() {
        let right_open = Piece::tile(1).with_roads(false, false, false, true);
        let left_open = Piece::tile(2).with_roads(false, false, true, false);

        assert!(pieces_connect(right_open, left_open, 2, 3, 3, 3));
        // Destination stub missing.
        assert!(!pieces_connect(right_open, Piece::tile(2), 2, 3, 3, 3));
        // Source stub missing.
        assert!(!pieces_connect(Piece::tile(1), left_open, 2, 3, 3, 3));
    }

    #[test]
    fn test_connect_vertical() {
        let down_open = Piece::tile(1).with_roads(false, true, false, false);
        let up_open = Piece::tile(2).with_roads(true, false, false, false);

        assert!(pieces_connect(down_open, up_open, 3, 1, 3, 2));
        assert!(pieces_connect(up_open, down_open, 3, 2, 3, 1));
        assert!(!pieces_connect(up_open, down_open, 3, 1, 3, 2));
    }

    #[test]
    fn test_connect_rejects_non_adjacent() {
        let open = Piece::tile(1).with_roads(true, true, true, true);
        // Same square.
        assert!(!pieces_connect(open, open, 3, 3, 3, 3));
        // Diagonal.
        assert!(!pieces_connect(open, open, 3, 3, 4, 4));
        // Two apart.
        assert!(!pieces_connect(open, open, 3, 3, 5, 3));
    }

    #[test]
    fn test_debug_format() {
        let piece = Piece::tile(5).with_roads(true, false, false, true);
        let text = format!("{piece:?}");
        assert!(text.contains("#5"));
        assert!(text.contains("U--R"));
    }

    #[test]
    fn test_serde_is_transparent() {
        let piece = Piece::tile(36).with_coins(true, false);
        let json = serde_json::to_string(&piece).unwrap();
        assert_eq!(json, piece.bits().to_string());
        let restored: Piece = serde_json::from_str(&json).unwrap();
        assert_eq!(piece, restored);
    }
}
