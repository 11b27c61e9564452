//! Rule violation codes.
//!
//! Every rule violation is a recoverable, expected outcome: the engine
//! rejects the move, leaves state untouched, and reports one of these codes.
//! Localized player-facing text is the presentation layer's concern; the
//! `Display` strings here are developer-facing diagnostics.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Symbolic code for a rejected move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum RuleError {
    /// The moving person has no steps left this turn.
    #[error("the moving person has no moves left")]
    AllMovesFinished,

    /// No pieces remain to play this turn.
    #[error("no pieces left to play this turn")]
    TurnFinished,

    /// Coordinates fall outside the board.
    #[error("coordinates are outside the board")]
    InvalidCoords,

    /// The target square already holds a person.
    #[error("only one person may stand on a square")]
    OnlyOnePersonPerSquare,

    /// No connected road leads from the person to the target square.
    #[error("the person has no path to that square")]
    PersonHasNoPath,

    /// A person may only step onto the edge to enter their own house.
    #[error("a person on the edge may only go to their own house")]
    PersonOnEdgeOnlyToOwnHouse,

    /// People and houses may only be placed on edge squares.
    #[error("people and houses may only be placed on the edge")]
    PeopleHousesEdgeOnly,

    /// The piece would sit too close to its partner.
    #[error("a house and its person must start at least five squares apart")]
    HousePersonTooClose,

    /// People and houses may only be placed on plain green grass.
    #[error("houses and people may only be placed on green grass")]
    HousesPeopleOnlyOnGreenGrass,

    /// Combining the pieces failed after all checks passed.
    #[error("unexpected problem while combining pieces")]
    UnexpectedProblem,

    /// Path tiles cannot be played on edge squares.
    #[error("path pieces cannot be played on the edge")]
    CantPlayPathPieceOnEdge,

    /// The target square cannot accept this piece.
    #[error("that piece cannot be played there")]
    CantMoveThere,

    /// Discarding is not allowed while a person is moving.
    #[error("cannot discard while a person is moving")]
    CantDiscardMovingPerson,

    /// House pieces cannot be discarded.
    #[error("house pieces cannot be discarded")]
    CantDiscardHouse,

    /// Person pieces cannot be discarded.
    #[error("person pieces cannot be discarded")]
    CantDiscardPerson,
}
