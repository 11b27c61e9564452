//! Per-turn scratch state.
//!
//! Everything here is rebuilt by `begin_turn` and discarded by `end_turn`
//! or `rewind_turn`; none of it is ever serialized. The working board is a
//! snapshot of the acting participant's permanent board, so a rewound turn
//! leaves no trace.

use smallvec::SmallVec;

use crate::board::{Board, Coord};
use crate::core::{ParticipantId, RuleError};
use crate::pieces::Piece;

/// A required-play queue holds at most four pieces (two person/house pairs)
/// plus a force-consumed person at turn end.
pub(crate) type PieceQueue = SmallVec<[Piece; 5]>;

/// A person in mid-move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MovingPerson {
    /// The pure person piece being walked.
    pub(crate) person: Piece,
    /// The cell the person currently stands on.
    pub(crate) at: Coord,
    /// Steps remaining this turn.
    pub(crate) moves_left: u32,
}

/// Transient state for the turn in progress.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TurnState {
    /// The acting participant.
    pub(crate) participant: ParticipantId,
    /// Working copy of the acting participant's board.
    pub(crate) board: Board,
    /// Pieces still required to be played this turn, front first.
    pub(crate) to_play: PieceQueue,
    /// Pieces consumed this turn, pending permanent removal at turn end.
    pub(crate) played: PieceQueue,
    /// Sub-state entered when a played tile puts a person in motion.
    pub(crate) moving: Option<MovingPerson>,
    /// Code of the most recent rejection this turn.
    pub(crate) last_error: Option<RuleError>,
}

impl TurnState {
    /// Move the head of the required-play queue onto the played pile.
    /// No-op when the queue is empty.
    pub(crate) fn play_head(&mut self) {
        if self.to_play.is_empty() {
            return;
        }
        let head = self.to_play.remove(0);
        self.played.push(head);
    }
}
