//! The piece codec and the canonical tile set.
//!
//! ## Key items
//!
//! - `Piece`: one game piece packed into an 18-bit integer
//! - `combine` / `pieces_connect`: the two piece-level rules
//! - `TILE_SET` / `draw_bag`: the fixed 36-tile set and its shuffle

pub mod bag;
pub mod codec;

pub use bag::{draw_bag, TILE_COUNT, TILE_SET};
pub use codec::{combine, pieces_connect, Piece, PieceFields, COLOR_COUNT};
