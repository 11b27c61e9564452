//! Participant identification and per-participant state.
//!
//! ## ParticipantId
//!
//! Opaque identifier assigned by the match-making layer. The engine never
//! interprets it; it only needs equality, hashing, and a stable join order.
//!
//! ## ParticipantRecord
//!
//! Everything the game owns for one participant: their personal play queue
//! (a trailing slice of the shared bag), their score, and their board.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::pieces::Piece;

/// Opaque participant identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a new participant ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParticipantId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParticipantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for ParticipantId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-participant game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    /// Pieces still to play, front first. A trailing slice of the shared bag.
    pub(crate) queue: Vec<Piece>,

    /// Accumulated score.
    pub(crate) score: i64,

    /// This participant's permanent board.
    pub(crate) board: Board,
}

impl ParticipantRecord {
    /// Create a record dealt from the shared bag, truncated from the front
    /// so the joiner's queue matches the `watermark` of pieces everyone
    /// else still has left.
    pub(crate) fn deal(bag: &[Piece], watermark: usize) -> Self {
        let skip = bag.len().saturating_sub(watermark);
        Self {
            queue: bag[skip..].to_vec(),
            score: 0,
            board: Board::new(),
        }
    }

    /// Pieces still to play, front first.
    #[must_use]
    pub fn queue(&self) -> &[Piece] {
        &self.queue
    }

    /// Accumulated score.
    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    /// This participant's permanent board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }
}
