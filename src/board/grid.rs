//! One participant's board.
//!
//! A fixed 7-row by 8-column grid of pieces. The perimeter starts as green
//! grass (the surface people and houses are placed on); the interior starts
//! blank. Out-of-range accesses are defensively clamped to a no-op rather
//! than treated as errors: the presentation layer forwards raw click
//! coordinates, and a stray click must never corrupt state.

use serde::{Deserialize, Serialize};

use crate::board::coord::{distance, Coord, FAR};
use crate::pieces::{Piece, COLOR_COUNT};

/// Board width in columns.
pub const BOARD_WIDTH: usize = 8;

/// Board height in rows.
pub const BOARD_HEIGHT: usize = 7;

/// A 7x8 grid of pieces owned by one participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Row-major: `cells[y][x]`.
    cells: [[Piece; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Board {
    /// Create a board with a green-grass perimeter and a blank interior.
    #[must_use]
    pub fn new() -> Self {
        let mut cells = [[Piece::blank(); BOARD_WIDTH]; BOARD_HEIGHT];
        for (y, row) in cells.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if y == 0 || x == 0 || y + 1 == BOARD_HEIGHT || x + 1 == BOARD_WIDTH {
                    *cell = Piece::green_grass();
                }
            }
        }
        Self { cells }
    }

    /// Board width in columns.
    #[must_use]
    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    /// Board height in rows.
    #[must_use]
    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// The piece at `(x, y)`, or blank for out-of-range coordinates.
    #[must_use]
    pub fn get(&self, x: i32, y: i32) -> Piece {
        if !self.is_valid(Coord::new(x, y)) {
            return Piece::blank();
        }
        self.cells[y as usize][x as usize]
    }

    /// Set the piece at `(x, y)`. Out-of-range coordinates are a no-op.
    pub fn set(&mut self, x: i32, y: i32, piece: Piece) {
        if !self.is_valid(Coord::new(x, y)) {
            return;
        }
        self.cells[y as usize][x as usize] = piece;
    }

    /// The piece at a possibly-absent coordinate, or the failure sentinel
    /// when the coordinate is `None`.
    #[must_use]
    pub fn get_at(&self, coord: Option<Coord>) -> Piece {
        match coord {
            Some(c) => self.get(c.x, c.y),
            None => Piece::failure(),
        }
    }

    /// Set the piece at a possibly-absent coordinate. `None` is a no-op.
    pub fn set_at(&mut self, coord: Option<Coord>, piece: Piece) {
        if let Some(c) = coord {
            self.set(c.x, c.y, piece);
        }
    }

    /// Locate the first cell (row-major) carrying a person of this color.
    #[must_use]
    pub fn locate_person(&self, color: u8) -> Option<Coord> {
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.person_color() == color {
                    return Some(Coord::new(x as i32, y as i32));
                }
            }
        }
        None
    }

    /// Locate the first cell (row-major) carrying a house of this color.
    #[must_use]
    pub fn locate_house(&self, color: u8) -> Option<Coord> {
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.house_color() == color {
                    return Some(Coord::new(x as i32, y as i32));
                }
            }
        }
        None
    }

    /// Whether the coordinate lies on the board.
    #[must_use]
    pub fn is_valid(&self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as usize) < BOARD_WIDTH && (c.y as usize) < BOARD_HEIGHT
    }

    /// Whether the coordinate lies on the board's perimeter, where people
    /// and houses are placed. Invalid coordinates are not on the edge.
    #[must_use]
    pub fn is_on_edge(&self, c: Coord) -> bool {
        if !self.is_valid(c) {
            return false;
        }
        c.x == 0
            || c.y == 0
            || c.x as usize == BOARD_WIDTH - 1
            || c.y as usize == BOARD_HEIGHT - 1
    }

    /// Distance from `c` to the partner of a pure person or house piece:
    /// person to its house, house to its person. Returns [`FAR`] when the
    /// piece is not a pure person/house or the partner is not on the board.
    #[must_use]
    pub fn distance_to_partner(&self, piece: Piece, c: Coord) -> u32 {
        if piece.is_person() {
            distance(self.locate_house(piece.person_color()), Some(c))
        } else if piece.is_house() {
            distance(self.locate_person(piece.house_color()), Some(c))
        } else {
            FAR
        }
    }

    /// Build the goal piece for an edge coordinate: green grass carrying the
    /// given house/person colors, with a single road stub pointing inward
    /// from whichever edge `c` sits on. That stub is the goal cell's only
    /// legal entry direction.
    #[must_use]
    pub fn create_goal_piece(&self, house_color: u8, person_color: u8, c: Coord) -> Piece {
        Piece::green_grass()
            .with_house_color(house_color)
            .with_person_color(person_color)
            .with_roads(
                c.y as usize == BOARD_HEIGHT - 1,
                c.y == 0,
                c.x as usize == BOARD_WIDTH - 1,
                c.x == 0,
            )
    }

    /// Whether every color's house and person are present and share a cell.
    #[must_use]
    pub fn is_winning_board(&self) -> bool {
        for color in 1..=COLOR_COUNT {
            match (self.locate_house(color), self.locate_person(color)) {
                (Some(house), Some(person)) if house == person => {}
                _ => return false,
            }
        }
        true
    }

    /// Overwrite this board's full extent from another board.
    pub fn copy_from(&mut self, other: &Board) {
        self.cells = other.cells;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_layout() {
        let board = Board::new();
        for y in 0..BOARD_HEIGHT as i32 {
            for x in 0..BOARD_WIDTH as i32 {
                let cell = board.get(x, y);
                if board.is_on_edge(Coord::new(x, y)) {
                    assert!(cell.is_green_grass(), "({x}, {y}) should be grass");
                } else {
                    assert!(cell.is_blank(), "({x}, {y}) should be blank");
                }
            }
        }
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut board = Board::new();
        let piece = Piece::tile(5).with_roads(true, true, false, false);
        board.set(3, 3, piece);
        assert_eq!(board.get(3, 3), piece);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), Piece::blank());
        assert_eq!(board.get(0, -1), Piece::blank());
        assert_eq!(board.get(8, 0), Piece::blank());
        assert_eq!(board.get(0, 7), Piece::blank());

        let before = board.clone();
        board.set(-1, 0, Piece::tile(1));
        board.set(99, 99, Piece::tile(1));
        assert_eq!(board, before);
    }

    #[test]
    fn test_get_at_missing_coordinate() {
        let mut board = Board::new();
        assert!(board.get_at(None).is_failure());

        let before = board.clone();
        board.set_at(None, Piece::tile(1));
        assert_eq!(board, before);

        board.set_at(Some(Coord::new(2, 2)), Piece::tile(3));
        assert_eq!(board.get_at(Some(Coord::new(2, 2))), Piece::tile(3));
    }

    #[test]
    fn test_locate_person_and_house() {
        let mut board = Board::new();
        assert_eq!(board.locate_person(1), None);

        board.set(4, 2, Piece::tile(9).with_person_color(1));
        board.set(6, 5, Piece::green_grass().with_house_color(1));

        assert_eq!(board.locate_person(1), Some(Coord::new(4, 2)));
        assert_eq!(board.locate_house(1), Some(Coord::new(6, 5)));
        assert_eq!(board.locate_person(2), None);
    }

    #[test]
    fn test_locate_is_row_major_first_match() {
        let mut board = Board::new();
        board.set(7, 1, Piece::green_grass().with_person_color(2));
        board.set(0, 3, Piece::green_grass().with_person_color(2));
        // Row 1 is scanned before row 3.
        assert_eq!(board.locate_person(2), Some(Coord::new(7, 1)));
    }

    #[test]
    fn test_edges() {
        let board = Board::new();
        assert!(board.is_on_edge(Coord::new(0, 0)));
        assert!(board.is_on_edge(Coord::new(7, 6)));
        assert!(board.is_on_edge(Coord::new(3, 0)));
        assert!(board.is_on_edge(Coord::new(0, 4)));
        assert!(!board.is_on_edge(Coord::new(3, 3)));
        assert!(!board.is_on_edge(Coord::new(-1, 0)));
        assert!(!board.is_on_edge(Coord::new(8, 0)));
    }

    #[test]
    fn test_distance_to_partner() {
        let mut board = Board::new();
        // No partner on the board yet: maximal.
        assert_eq!(board.distance_to_partner(Piece::person(1), Coord::new(0, 0)), FAR);

        board.set(7, 3, Piece::green_grass().with_house_color(1));
        assert_eq!(board.distance_to_partner(Piece::person(1), Coord::new(0, 3)), 7);
        assert_eq!(board.distance_to_partner(Piece::person(1), Coord::new(7, 0)), 3);

        // Not a pure person/house: maximal.
        assert_eq!(board.distance_to_partner(Piece::tile(5), Coord::new(0, 0)), FAR);
    }

    #[test]
    fn test_goal_piece_points_inward() {
        let board = Board::new();

        let top = board.create_goal_piece(1, 0, Coord::new(3, 0));
        assert!(top.road_down() && !top.road_up() && !top.road_left() && !top.road_right());

        let bottom = board.create_goal_piece(1, 0, Coord::new(3, 6));
        assert!(bottom.road_up() && !bottom.road_down());

        let left = board.create_goal_piece(1, 0, Coord::new(0, 3));
        assert!(left.road_right() && !left.road_left());

        let right = board.create_goal_piece(1, 0, Coord::new(7, 3));
        assert!(right.road_left() && !right.road_right());

        assert_eq!(top.house_color(), 1);
        assert_eq!(top.number(), Piece::green_grass().number());
    }

    #[test]
    fn test_winning_board() {
        let mut board = Board::new();
        assert!(!board.is_winning_board());

        for color in 1..=COLOR_COUNT {
            let cell = Piece::green_grass()
                .with_house_color(color)
                .with_person_color(color);
            board.set(color as i32, 0, cell);
        }
        assert!(board.is_winning_board());

        // Split one pair onto different cells: no longer winning.
        board.set(1, 0, Piece::green_grass().with_house_color(1));
        board.set(1, 6, Piece::green_grass().with_person_color(1));
        assert!(!board.is_winning_board());

        // Remove a person entirely: no longer winning.
        board.set(1, 6, Piece::green_grass());
        assert!(!board.is_winning_board());
    }

    #[test]
    fn test_copy_from() {
        let mut source = Board::new();
        source.set(2, 2, Piece::tile(12).with_coins(true, false));
        source.set(5, 4, Piece::tile(30));

        let mut target = Board::new();
        target.set(1, 1, Piece::tile(1));
        target.copy_from(&source);

        assert_eq!(target, source);
        assert_eq!(target.get(1, 1), Piece::blank());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut board = Board::new();
        board.set(3, 3, Piece::tile(8).with_person_color(2));
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(board, restored);
    }
}
