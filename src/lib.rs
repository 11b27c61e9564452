//! # trailhome
//!
//! A deterministic rules engine for a turn-based tile-laying board game:
//! participants draw road tiles from a shared shuffled bag and lay them on a
//! personal 7x8 grid, trying to walk each "person" token along connected
//! roads into its matching "house" on the board's edge, collecting coins
//! along the way.
//!
//! ## Design principles
//!
//! 1. **Deterministic**: the only randomness is the one-time bag shuffle at
//!    game creation. A seed plus the sequence of turn calls reproduces a
//!    game bit for bit.
//!
//! 2. **Rule violations are values**: every validating operation returns
//!    `Result<_, RuleError>` and mutates nothing on failure. There are no
//!    fatal errors inside the engine; stray coordinates clamp to no-ops.
//!
//! 3. **Turns are transactions**: plays run against a transient working
//!    board and are committed by `end_turn`. `rewind_turn` discards an
//!    uncommitted turn atomically.
//!
//! ## Modules
//!
//! - `core`: participants, RNG, configuration, rule errors
//! - `pieces`: the 18-bit packed piece codec and the canonical tile set
//! - `board`: coordinates and the per-participant grid
//! - `game`: persistent game state and the turn protocol
//!
//! ## Example
//!
//! ```
//! use trailhome::{Game, PlayOutcome};
//!
//! let mut game = Game::new(["alice", "bob"], 42);
//!
//! game.begin_turn("alice");
//! let piece = game.get_next_piece();
//! assert!(piece.is_person());
//!
//! // People start on the board's edge.
//! let outcome = game.play_piece_at(piece, 0, 3).unwrap();
//! assert_eq!(outcome, PlayOutcome::Placed);
//! game.end_turn();
//! ```

pub mod board;
pub mod core;
pub mod game;
pub mod pieces;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, ParticipantId, ParticipantRecord, RuleError};

pub use crate::pieces::{
    combine, draw_bag, pieces_connect, Piece, PieceFields, COLOR_COUNT, TILE_COUNT, TILE_SET,
};

pub use crate::board::{distance, Board, Coord, BOARD_HEIGHT, BOARD_WIDTH, FAR};

pub use crate::game::{Game, PlayOutcome, MIN_PARTNER_DISTANCE};
