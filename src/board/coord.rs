//! Grid coordinates.
//!
//! Lookups that can miss (locating a person or house) return
//! `Option<Coord>`; `distance` propagates a miss as the maximal sentinel
//! distance instead of erroring, so "too far" and "absent" compare the
//! same way.

use serde::{Deserialize, Serialize};

/// Sentinel distance reported when either coordinate of a lookup is absent.
pub const FAR: u32 = u32::MAX;

/// A position on a board grid. `x` is the column, `y` the row; `y` grows
/// downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate.
    #[must_use]
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Manhattan distance between two possibly-absent coordinates.
///
/// Returns [`FAR`] if either coordinate is `None`.
#[must_use]
pub fn distance(a: Option<Coord>, b: Option<Coord>) -> u32 {
    match (a, b) {
        (Some(a), Some(b)) => a.manhattan(b),
        _ => FAR,
    }
}
