//! The coordinate value type and the per-participant board grid.

pub mod coord;
pub mod grid;

pub use coord::{distance, Coord, FAR};
pub use grid::{Board, BOARD_HEIGHT, BOARD_WIDTH};
